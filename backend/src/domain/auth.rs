//! Authentication primitives: login credentials and account registration.
//!
//! Constructors validate raw strings so handlers can reject malformed input
//! before a port or service is involved. Passwords are held in
//! [`Zeroizing`] buffers and wiped on drop.

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, Role, UserValidationError, Username};

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use shipment_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("coordinator", "shipment123").unwrap();
/// assert_eq!(creds.username(), "coordinator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Field that failed registration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    /// `username`
    Username,
    /// `email`
    Email,
    /// `password`
    Password,
    /// `fullName`
    FullName,
    /// `role`
    Role,
}

/// Registration validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// One of the profile fields was rejected.
    #[error("{source}")]
    Field {
        /// Which field failed.
        field: RegistrationField,
        /// Underlying rule violation.
        source: UserValidationError,
    },
    /// The password is shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

fn field_error(
    field: RegistrationField,
) -> impl Fn(UserValidationError) -> RegistrationValidationError {
    move |source| RegistrationValidationError::Field { field, source }
}

impl RegistrationValidationError {
    /// Field the error refers to.
    pub fn field(&self) -> RegistrationField {
        match self {
            Self::Field { field, .. } => *field,
            Self::PasswordTooShort { .. } => RegistrationField::Password,
        }
    }
}

/// Raw registration input, as received from a client.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    /// Requested login name.
    pub username: &'a str,
    /// Contact email address.
    pub email: &'a str,
    /// Plain-text password.
    pub password: &'a str,
    /// Full name for display.
    pub full_name: &'a str,
    /// Requested role; defaults to coordinator.
    pub role: Option<&'a str>,
}

/// Validated request to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
    display_name: DisplayName,
    role: Role,
}

impl Registration {
    /// Validate every field, reporting the first failure in declaration
    /// order.
    ///
    /// # Examples
    /// ```
    /// use shipment_backend::domain::{Registration, RegistrationInput, Role};
    ///
    /// let registration = Registration::try_from_input(RegistrationInput {
    ///     username: "dispatch_1",
    ///     email: "Dispatch@Example.test",
    ///     password: "secret1",
    ///     full_name: "Dispatch Desk",
    ///     role: None,
    /// })
    /// .unwrap();
    /// assert_eq!(registration.email().as_ref(), "dispatch@example.test");
    /// assert_eq!(registration.role(), Role::Coordinator);
    /// ```
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(input.username).map_err(field_error(RegistrationField::Username))?;
        let email = EmailAddress::new(input.email).map_err(field_error(RegistrationField::Email))?;
        if input.password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let display_name =
            DisplayName::new(input.full_name).map_err(field_error(RegistrationField::FullName))?;
        let role = input
            .role
            .map(str::parse::<Role>)
            .transpose()
            .map_err(field_error(RegistrationField::Role))?
            .unwrap_or_default();

        Ok(Self {
            username,
            email,
            password: Zeroizing::new(input.password.to_owned()),
            display_name,
            role,
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plain-text password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Full name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn credentials_trim_username_but_not_password() {
        let creds = LoginCredentials::try_from_parts("  coordinator ", " pw ").expect("valid");
        assert_eq!(creds.username(), "coordinator");
        assert_eq!(creds.password(), " pw ");
    }

    fn valid_input() -> RegistrationInput<'static> {
        RegistrationInput {
            username: "dispatch_1",
            email: "dispatch@example.test",
            password: "secret1",
            full_name: "Dispatch Desk",
            role: Some("admin"),
        }
    }

    #[fixture]
    fn input() -> RegistrationInput<'static> {
        valid_input()
    }

    #[rstest]
    fn registration_accepts_valid_input(input: RegistrationInput<'static>) {
        let registration = Registration::try_from_input(input).expect("valid registration");
        assert_eq!(registration.username().as_ref(), "dispatch_1");
        assert_eq!(registration.role(), Role::Admin);
        assert_eq!(registration.password(), "secret1");
    }

    #[rstest]
    fn registration_rejects_short_password(input: RegistrationInput<'static>) {
        let err = Registration::try_from_input(RegistrationInput {
            password: "12345",
            ..input
        })
        .expect_err("short password");
        assert_eq!(err, RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        assert_eq!(err.field(), RegistrationField::Password);
    }

    #[rstest]
    #[case(RegistrationInput { username: "x", ..valid_input() }, RegistrationField::Username)]
    #[case(RegistrationInput { email: "nope", ..valid_input() }, RegistrationField::Email)]
    #[case(RegistrationInput { full_name: "Z", ..valid_input() }, RegistrationField::FullName)]
    #[case(RegistrationInput { role: Some("root"), ..valid_input() }, RegistrationField::Role)]
    fn registration_reports_failing_field(
        #[case] raw: RegistrationInput<'static>,
        #[case] expected: RegistrationField,
    ) {
        let err = Registration::try_from_input(raw).expect_err("invalid registration");
        assert_eq!(err.field(), expected);
    }
}
