//! 服务器启动准备

use std::sync::Arc;

use actix_web::web;
use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::config::StaticConfig;
use crate::services::{LogMailer, Mailer};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub state: web::Data<AppState>,
}

/// 准备服务器启动的上下文
/// 包括存储、上传目录和共享的请求状态
pub async fn prepare_server_startup(config: Arc<StaticConfig>) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    tokio::fs::create_dir_all(&config.uploads.directory)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.uploads.directory
            )
        })?;

    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer::new(&config.mail));
    let state = AppState::new(config.clone(), storage.clone(), mailer)
        .context("Failed to build application state")?;

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(StartupContext {
        storage,
        state: web::Data::new(state),
    })
}
