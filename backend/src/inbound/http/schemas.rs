//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of `utoipa` derives. The wrappers here mirror
//! their wire shape and are registered under the domain type's path.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state, such as a taken tracking
    /// number.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Shipment not found")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "8f14e45f-ceea-467f-a9c3-1b0b9a2c7d55")]
    trace_id: Option<String>,
    /// Field-level detail such as `{"field": "shipDate", "code": "invalid_date"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Login name.
    #[schema(example = "coordinator")]
    username: String,
    /// Lowercase email address.
    #[schema(example = "coordinator@example.com")]
    email: String,
    /// Name shown in the dashboard.
    #[schema(example = "Demo Coordinator")]
    display_name: String,
    /// `coordinator` or `admin`.
    #[schema(example = "coordinator")]
    role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("forbidden")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[rstest]
    fn schemas_are_registered_under_domain_names() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert_eq!(UserSchema::name(), "crate.domain.User");
    }

    #[rstest]
    fn object_schemas_use_camel_case_fields() {
        let error = schema_to_json::<ErrorSchema>();
        assert!(error.contains("traceId"));
        assert!(!error.contains("trace_id"));

        let user = schema_to_json::<UserSchema>();
        assert!(user.contains("displayName"));
    }
}
