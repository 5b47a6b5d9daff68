pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod wizard;

use crate::services::{
    job_service::JobService, request_service::RequestService, wizard_service::WizardService,
};
use sqlx::PgPool;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub job_service: JobService,
    pub request_service: RequestService,
    pub wizard_service: WizardService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let job_service = JobService::new(pool.clone());
        let request_service = RequestService::new(pool.clone(), job_service.clone());
        let wizard_service = WizardService::new(
            job_service.clone(),
            Duration::from_millis(config.wizard_typing_delay_ms),
        );

        Self {
            pool,
            job_service,
            request_service,
            wizard_service,
        }
    }
}
