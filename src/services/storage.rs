use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::{error::AppError, models::plan::TripPlan};

const PLAN_FILE: &str = "current_plan.json";

/// Where the current plan lives between requests.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn load_plan(&self) -> Result<Option<TripPlan>, AppError>;
    async fn save_plan(&self, plan: &TripPlan) -> Result<(), AppError>;
}

/// Keeps the plan as pretty-printed JSON under a data directory.
#[derive(Clone)]
pub struct StorageService {
    root: Arc<PathBuf>,
}

impl StorageService {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn plan_path(&self) -> PathBuf {
        self.root().join(PLAN_FILE)
    }

    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        Ok(())
    }
}

#[async_trait]
impl PlanStore for StorageService {
    async fn load_plan(&self) -> Result<Option<TripPlan>, AppError> {
        let path = self.plan_path();
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let raw = fs::read(&path).await?;
        if raw.is_empty() {
            return Ok(None);
        }
        let plan = serde_json::from_slice(&raw)?;
        Ok(Some(plan))
    }

    async fn save_plan(&self, plan: &TripPlan) -> Result<(), AppError> {
        self.ensure_structure().await?;
        let path = self.plan_path();
        let data = serde_json::to_vec_pretty(plan)?;
        fs::write(&path, data).await?;
        debug!(path = %path.display(), "stored trip plan");
        Ok(())
    }
}
