use std::sync::Arc;

use rapid_console_application::{
    DatasetGateway, DatasetService, JobGateway, JobService, PermissionCatalogGateway,
    SubjectGateway, SubjectService,
};
use rapid_console_core::AppError;
use rapid_console_infrastructure::{HttpRapidClient, InMemoryRapidGateway};
use tracing::{info, warn};

use crate::api_config::{ConsoleConfig, RapidGatewayConfig};
use crate::state::AppState;

pub fn build_app_state(config: &ConsoleConfig) -> Result<AppState, AppError> {
    match &config.gateway {
        RapidGatewayConfig::Http {
            base_url,
            access_token,
            timeout,
        } => {
            if access_token.is_none() {
                warn!("RAPID_ACCESS_TOKEN is not set; rAPId calls are unauthenticated");
            }
            info!(rapid_url = %base_url, "using rAPId HTTP gateway");
            let client = HttpRapidClient::new(base_url.clone(), access_token.clone(), *timeout)?;
            Ok(app_state_from_gateway(
                Arc::new(client),
                config.frontend_url.clone(),
            ))
        }
        RapidGatewayConfig::Memory => {
            info!("using in-memory rAPId gateway");
            in_memory_app_state(config.frontend_url.clone())
        }
    }
}

pub fn in_memory_app_state(frontend_url: String) -> Result<AppState, AppError> {
    let gateway = InMemoryRapidGateway::seeded()?;
    Ok(app_state_from_gateway(Arc::new(gateway), frontend_url))
}

fn app_state_from_gateway<G>(gateway: Arc<G>, frontend_url: String) -> AppState
where
    G: PermissionCatalogGateway + SubjectGateway + DatasetGateway + JobGateway + 'static,
{
    AppState {
        subject_service: SubjectService::new(gateway.clone(), gateway.clone()),
        dataset_service: DatasetService::new(gateway.clone()),
        job_service: JobService::new(gateway),
        frontend_url,
    }
}
