pub mod form;
pub mod plan;
pub mod settings;
pub mod trip;
