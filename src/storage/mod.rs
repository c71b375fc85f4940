use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;
pub mod seed;

pub use backend::{LeaderboardEntry, SeaOrmStorage};
pub use models::{
    AssignmentUpdate, NewAssignment, NewFace, NewImage, NewOfficer, NewUser, OfficerFilter,
    OfficerUpdate, UserUpdate,
};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = &config.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = backend::SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
