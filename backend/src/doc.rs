//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response DTOs, and wrapper schemas for domain types
//! ([`ErrorSchema`], [`ErrorCodeSchema`], [`UserSchema`]) so the domain stays
//! free of utoipa. The session cookie is declared as the default security
//! scheme; login, registration and the probes opt out per operation.
//!
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::shipments_dto::{
    DeliveryForecastResponse, PageLinksResponse, PaginationResponse, ShipmentListResponse,
    ShipmentPayload, ShipmentResponse, ShipmentSummaryResponse,
};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the shipment REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shipment logistics API",
        description = "Owner-scoped shipment tracking with session authentication, paging, summaries and delivery forecasts.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::register,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::shipments::list_shipments,
        crate::inbound::http::shipments::shipment_summary,
        crate::inbound::http::shipments::get_shipment,
        crate::inbound::http::shipments::create_shipment,
        crate::inbound::http::shipments::update_shipment,
        crate::inbound::http::shipments::delete_shipment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        RegisterRequest,
        ShipmentPayload,
        ShipmentResponse,
        DeliveryForecastResponse,
        ShipmentListResponse,
        PaginationResponse,
        PageLinksResponse,
        ShipmentSummaryResponse,
    )),
    tags(
        (name = "users", description = "Registration, sign-in and the current account"),
        (name = "shipments", description = "Shipments owned by the signed-in user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "crate.domain.User";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/register")]
    #[case("/api/v1/logout")]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/shipments")]
    #[case("/api/v1/shipments/stats/summary")]
    #[case("/api/v1/shipments/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn shipment_item_path_documents_read_update_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/api/v1/shipments/{id}")
            .expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn user_schema_has_identity_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get(USER_SCHEMA_NAME).expect("User schema");

        assert_object_schema_has_field(user_schema, "id");
        assert_object_schema_has_field(user_schema, "displayName");
    }

    #[rstest]
    fn shipment_response_schema_is_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let shipment = schemas.get("ShipmentResponse").expect("ShipmentResponse");

        for field in ["trackingNumber", "estimatedDeliveryDate", "deliveryForecast"] {
            assert_object_schema_has_field(shipment, field);
        }
    }

    #[rstest]
    fn items_per_page_documents_the_page_size_cap() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let page_meta = schemas.get("PaginationResponse").expect("PaginationResponse");
        let RefOr::T(Schema::Object(object)) = page_meta else {
            panic!("expected Object schema");
        };
        let Some(RefOr::T(Schema::Object(field))) = object.properties.get("itemsPerPage") else {
            panic!("expected inline itemsPerPage schema");
        };

        let description = field.description.as_deref().unwrap_or_default();
        assert!(
            description.contains(&pagination::MAX_PAGE_SIZE.to_string()),
            "itemsPerPage description should name the cap: {description}"
        );
        assert!(field.maximum.is_some());
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
