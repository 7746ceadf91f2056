pub mod handlers;
pub mod routes;

use axum::Router;
use my_lab_guide_domain::evaluator::BloodTestEvaluator;

/// Create the application router
pub fn create_application(evaluator: BloodTestEvaluator) -> Router {
    routes::create_app(evaluator)
}
