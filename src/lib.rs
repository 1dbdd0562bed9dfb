pub mod api;
pub mod config;
pub mod services;
pub mod utils;

use crate::config::UploadConfig;
use crate::services::upload_service::UploadService;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub uploads: Arc<UploadService>,
    pub config: UploadConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::handlers::health::health_check))
        .route("/fileUpload", post(api::handlers::upload::file_upload))
        .with_state(state)
}
