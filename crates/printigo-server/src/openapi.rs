use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Printigo API",
        version = "0.1.0",
        description = "Printing service listings and customer reviews."
    ),
    paths(
        crate::routes::issue_token,
        crate::routes::list_services,
        crate::routes::list_home_services,
        crate::routes::get_service,
        crate::routes::create_service,
        crate::routes::create_review,
        crate::routes::list_reviews,
        crate::routes::get_review,
        crate::routes::update_review,
        crate::routes::list_reviews_by_service,
        crate::routes::list_my_reviews,
        crate::routes::delete_review,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::RecordResponse,
        crate::dto::NewDocumentRequest,
        crate::dto::UpdateReviewRequest,
        crate::dto::InsertResponse,
        crate::dto::UpdateResponse,
        crate::dto::DeleteResponse,
        crate::dto::IssueTokenRequest,
        crate::dto::TokenResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Bearer credential issuance"),
        (name = "services", description = "Service listings"),
        (name = "reviews", description = "Customer reviews"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme that `/my-reviews/{email}` declares.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some(
                "HS256 credential from `POST /jwt`. Expires one day after issue.",
            ))
            .build();

        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme("bearer", SecurityScheme::Http(bearer));
    }
}
