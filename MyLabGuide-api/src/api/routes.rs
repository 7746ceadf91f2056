use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use my_lab_guide_domain::evaluator::BloodTestEvaluator;
use my_lab_guide_domain::health::HealthServiceTrait;

use crate::api::handlers::{blood_test, health};
use crate::openapi::configure_swagger_routes;

/// Create the application router with the default services
pub fn create_app(evaluator: BloodTestEvaluator) -> Router {
    create_app_with_services(
        blood_test::create_service(evaluator),
        health::create_health_service(),
    )
}

/// Create the application router around the given services
pub fn create_app_with_services(
    blood_test_service: blood_test::BloodTestService,
    health_service: Arc<dyn HealthServiceTrait + Send + Sync>,
) -> Router {
    debug!("Creating application router");

    // Static segments are matched before `:id`
    let api_routes = Router::new()
        .route("/bloodtests/evaluate", post(blood_test::evaluate_blood_test))
        .route(
            "/users/:user_id/bloodtests",
            get(blood_test::get_blood_test_history)
                .post(blood_test::create_blood_test)
                .delete(blood_test::delete_blood_tests),
        )
        .route(
            "/users/:user_id/bloodtests/latest",
            get(blood_test::get_latest_blood_test),
        )
        .route("/users/:user_id/bloodtests/:id", get(blood_test::get_blood_test));

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(blood_test_service);

    let app = add_swagger_ui(app);
    debug!("Swagger UI merged");

    let app = configure_security(app).layer(TraceLayer::new_for_http());

    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

/// Apply CORS and security headers to the whole application
pub fn configure_security(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("camera=(), microphone=(), geolocation=(), interest-cohort=()"),
        ));

    app.layer(cors).layer(security_headers)
}
