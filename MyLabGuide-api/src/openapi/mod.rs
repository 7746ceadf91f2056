use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Blood test endpoints
        crate::api::handlers::blood_test::evaluate_blood_test,
        crate::api::handlers::blood_test::create_blood_test,
        crate::api::handlers::blood_test::get_blood_test_history,
        crate::api::handlers::blood_test::get_latest_blood_test,
        crate::api::handlers::blood_test::get_blood_test,
        crate::api::handlers::blood_test::delete_blood_tests
    ),
    components(
        schemas(
            // Entities
            crate::entities::blood_test::FieldValue,
            crate::entities::blood_test::CreateBloodTestRequest,
            crate::entities::blood_test::EvaluateRequest,
            crate::entities::blood_test::RejectedFieldResponse,
            crate::entities::blood_test::AnalysisLineResponse,
            crate::entities::blood_test::EvaluationResponse,
            crate::entities::blood_test::BloodTestResponse,
            crate::entities::common::ErrorResponse,
            crate::entities::common::DeleteResponse,
            crate::entities::common::BloodTestPaginatedResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Blood test handlers
            crate::api::handlers::blood_test::HistoryQueryParams
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "blood_tests", description = "Blood test evaluation and history endpoints")
    ),
    info(
        title = "MyLabGuide API",
        version = "0.1.0",
        description = "API for evaluating blood test results and tracking them over time",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
