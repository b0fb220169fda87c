//! Account handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"coordinator","password":"shipment123"}
//! POST /api/v1/register
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationField,
    RegistrationInput, RegistrationValidationError, User, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrorCode, FieldName, field_error};

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"coordinator","password":"shipment123"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Registration body for `POST /api/v1/register`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// 3–50 letters, digits or underscores.
    pub username: String,
    /// Contact address; stored lowercase.
    pub email: String,
    /// At least six characters.
    pub password: String,
    /// Name shown in the dashboard, 2–100 characters.
    #[serde(alias = "full_name")]
    pub full_name: String,
    /// `coordinator` (default) or `admin`.
    #[serde(default)]
    pub role: Option<String>,
}

impl RegisterRequest {
    fn to_registration(&self) -> Result<Registration, RegistrationValidationError> {
        Registration::try_from_input(RegistrationInput {
            username: &self.username,
            email: &self.email,
            password: &self.password,
            full_name: &self.full_name,
            role: self.role.as_deref(),
        })
    }
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

const fn registration_field_name(field: RegistrationField) -> FieldName {
    match field {
        RegistrationField::Username => FieldName::new("username"),
        RegistrationField::Email => FieldName::new("email"),
        RegistrationField::Password => FieldName::new("password"),
        RegistrationField::FullName => FieldName::new("fullName"),
        RegistrationField::Role => FieldName::new("role"),
    }
}

fn map_registration_error(err: &RegistrationValidationError) -> Error {
    let code = match err {
        RegistrationValidationError::PasswordTooShort { .. } => FieldErrorCode::TooShort,
        RegistrationValidationError::Field { source, .. } => match source {
            UserValidationError::UsernameTooShort { .. }
            | UserValidationError::DisplayNameTooShort { .. } => FieldErrorCode::TooShort,
            UserValidationError::UsernameTooLong { .. }
            | UserValidationError::DisplayNameTooLong { .. } => FieldErrorCode::TooLong,
            UserValidationError::EmptyId
            | UserValidationError::InvalidId
            | UserValidationError::UsernameInvalidCharacters
            | UserValidationError::InvalidEmail
            | UserValidationError::UnknownRole => FieldErrorCode::InvalidValue,
        },
    };
    field_error(registration_field_name(err.field()), code, err.to_string())
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Account store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&*payload).map_err(|err| map_login_validation_error(&err))?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.sign_in(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Create an account. The caller is not signed in afterwards.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username or email already registered", body = ErrorSchema),
        (status = 503, description = "Account store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = payload
        .to_registration()
        .map_err(|err| map_registration_error(&err))?;
    let user = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// Profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.users.current_user(&user_id).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
