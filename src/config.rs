use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use crate::{error::AppError, models::settings::IntakeDefaults};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub data_root: PathBuf,
    pub intake: IntakeDefaults,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr = env_or("APP_LISTEN_ADDR", "127.0.0.1:3000".parse().ok())?;

        let data_root = env::var("DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let fallback = IntakeDefaults::default();
        let intake = IntakeDefaults {
            travel_minutes: env_or("DEFAULT_TRAVEL_MINUTES", Some(fallback.travel_minutes))?,
            return_trip_buffer_minutes: env_or(
                "RETURN_TRIP_BUFFER_MINUTES",
                Some(fallback.return_trip_buffer_minutes),
            )?,
            essential_item_minutes: env_or(
                "ESSENTIAL_ITEM_MINUTES",
                Some(fallback.essential_item_minutes),
            )?,
            optional_item_minutes: env_or(
                "OPTIONAL_ITEM_MINUTES",
                Some(fallback.optional_item_minutes),
            )?,
            traffic_start: env_or("DEFAULT_TRAFFIC_START", Some(fallback.traffic_start))?,
            traffic_end: env_or("DEFAULT_TRAFFIC_END", Some(fallback.traffic_end))?,
        };

        Ok(Self {
            listen_addr,
            data_root,
            intake,
        })
    }
}

fn env_or<T>(key: &str, default: Option<T>) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err| AppError::Config(format!("invalid {key}: {err}"))),
        Err(_) => default.ok_or_else(|| AppError::Config(format!("missing {key}"))),
    }
}
