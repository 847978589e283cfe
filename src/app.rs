use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    docs,
    middleware::{
        auth::require_auth,
        cors::api_cors,
        rate_limit::{rps_middleware, RateLimiter},
    },
    routes, AppState,
};

const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/openapi.json", get(docs::openapi_json));

    let public_api = Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .layer(from_fn_with_state(
            RateLimiter::new(state.config.public_rps),
            rps_middleware,
        ));

    let protected_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route("/api/admin/users", get(routes::admin::list_users))
        .route("/api/admin/users/:id/approve", put(routes::admin::approve_user))
        .route(
            "/api/admin/users/:id/reject",
            delete(routes::admin::reject_user),
        )
        .route(
            "/api/positions",
            get(routes::position::list_positions).post(routes::position::create_position),
        )
        .route(
            "/api/positions/:id",
            get(routes::position::get_position)
                .put(routes::position::update_position)
                .delete(routes::position::delete_position),
        )
        .route("/api/positions/:id/close", put(routes::position::close_position))
        .route(
            "/api/candidates",
            get(routes::candidate::list_candidates).post(routes::candidate::create_candidate),
        )
        .route("/api/candidates/me", get(routes::candidate::my_candidate))
        .route(
            "/api/candidates/:id",
            get(routes::candidate::get_candidate)
                .put(routes::candidate::update_candidate)
                .delete(routes::candidate::delete_candidate),
        )
        .route(
            "/api/applications",
            get(routes::application::list_applications).post(routes::application::apply),
        )
        .route("/api/submissions", post(routes::application::submit))
        .route(
            "/api/applications/history/:email",
            get(routes::application::history),
        )
        .route(
            "/api/applications/:id",
            get(routes::application::get_application),
        )
        .route("/api/applications/:id/review", put(routes::application::review))
        .route(
            "/api/applications/:id/schedule",
            put(routes::application::schedule),
        )
        .route("/api/applications/:id/reject", put(routes::application::reject))
        .route("/api/applications/:id/hire", put(routes::application::hire))
        .route(
            "/api/applications/:id/status",
            put(routes::application::set_status),
        )
        .route(
            "/api/interviews",
            get(routes::interview::list_interviews).post(routes::interview::create_interview),
        )
        .route("/api/interviews/mine", get(routes::interview::my_interviews))
        .route(
            "/api/interviews/:id",
            get(routes::interview::get_interview)
                .put(routes::interview::update_interview)
                .delete(routes::interview::delete_interview),
        )
        .route(
            "/api/interviews/:id/send-link",
            put(routes::interview::send_link),
        )
        .route("/api/onboarding", get(routes::onboarding::list_onboarding))
        .route(
            "/api/onboarding/:id/status",
            put(routes::onboarding::update_onboarding_status),
        )
        .route("/api/inbox", get(routes::inbox::list_messages))
        .route("/api/inbox/unread-count", get(routes::inbox::unread_count))
        .route("/api/inbox/read-all", put(routes::inbox::read_all))
        .route(
            "/api/inbox/:id/status",
            put(routes::inbox::set_message_status),
        )
        .route(
            "/api/purchase-orders",
            get(routes::purchase_order::list_purchase_orders)
                .post(routes::purchase_order::create_purchase_order),
        )
        .route(
            "/api/purchase-orders/:id",
            get(routes::purchase_order::get_purchase_order),
        )
        .route(
            "/api/purchase-orders/:id/status",
            put(routes::purchase_order::decide_purchase_order),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth))
        .layer(from_fn_with_state(
            RateLimiter::new(state.config.api_rps),
            rps_middleware,
        ));

    base_routes
        .merge(public_api)
        .merge(protected_api)
        .with_state(state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
