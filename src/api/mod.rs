pub mod format;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::services::{EmployeeService, FormService};

/// Shared handler state: one store handle behind both services
#[derive(Clone)]
pub struct AppState {
    pub forms: FormService,
    pub employees: EmployeeService,
    pub store: Arc<dyn Store>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            forms: FormService::new(store.clone()),
            employees: EmployeeService::new(store.clone()),
            store,
            jwt_secret: jwt_secret.into(),
        }
    }
}

/// Build the full application router
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Protected API
        .merge(form_routes(state.clone()))
        .merge(employee_routes(state.clone()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn form_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::forms;

    Router::new()
        .route("/api/forms", get(forms::form_list).post(forms::form_create))
        .route(
            "/api/forms/:id",
            get(forms::form_get)
                .put(forms::form_update)
                .patch(forms::form_update)
                .delete(forms::form_delete),
        )
        .route("/api/forms/:id/fields", get(forms::form_fields))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn employee_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::employees;

    Router::new()
        .route(
            "/api/employees",
            get(employees::employee_list).post(employees::employee_create),
        )
        .route("/api/employees/statistics", get(employees::employee_statistics))
        .route(
            "/api/employees/:id",
            get(employees::employee_get)
                .put(employees::employee_update)
                .delete(employees::employee_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(allowed))
}
