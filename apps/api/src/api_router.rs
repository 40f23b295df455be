use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use rapid_console_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let console_routes = Router::new()
        .route(
            "/api/permissions/catalog",
            get(handlers::permissions::permission_catalog_handler),
        )
        .route(
            "/api/permissions/options",
            post(handlers::permissions::permission_options_handler),
        )
        .route(
            "/api/subjects",
            get(handlers::subjects::list_subjects_handler),
        )
        .route(
            "/api/subjects/users",
            post(handlers::subjects::create_user_handler),
        )
        .route(
            "/api/subjects/clients",
            post(handlers::subjects::create_client_handler),
        )
        .route(
            "/api/subjects/users/{user_id}",
            delete(handlers::subjects::delete_user_handler),
        )
        .route(
            "/api/subjects/clients/{client_id}",
            delete(handlers::subjects::delete_client_handler),
        )
        .route(
            "/api/subjects/{subject_id}/permissions",
            get(handlers::subjects::subject_permissions_handler)
                .put(handlers::subjects::update_subject_permissions_handler),
        )
        .route(
            "/api/datasets",
            get(handlers::datasets::list_datasets_handler),
        )
        .route(
            "/api/datasets/{layer}/{domain}/{dataset}",
            delete(handlers::datasets::delete_dataset_handler),
        )
        .route(
            "/api/datasets/{layer}/{domain}/{dataset}/info",
            get(handlers::datasets::dataset_info_handler),
        )
        .route(
            "/api/catalog/search",
            get(handlers::datasets::search_catalog_handler),
        )
        .route("/api/jobs", get(handlers::jobs::list_jobs_handler))
        .route("/api/jobs/{job_id}", get(handlers::jobs::job_handler));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(console_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
