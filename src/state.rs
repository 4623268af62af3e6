use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::AppConfig, planner::Planner, services::storage::PlanStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub planner: Planner,
    pub store: Arc<dyn PlanStore>,
    /// Held across every load/save of the stored plan so updates are not lost.
    pub plan_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn PlanStore>) -> Self {
        Self {
            config,
            planner: Planner::new(),
            store,
            plan_lock: Arc::new(Mutex::new(())),
        }
    }
}
