use super::{
    handlers::{customers, health},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Customers
        .route("/api/v1/customers", post(customers::register_customer))
        .route("/api/v1/customers/search", get(customers::search_customers))
        .route(
            "/api/v1/customers/{id}",
            get(customers::get_customer)
                .patch(customers::update_customer)
                .delete(customers::remove_customer),
        )
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
