//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use std::sync::Arc;

use crate::domain::UserId;
use crate::domain::ports::{
    MockAccountRegistration, MockLoginService, MockShipmentCommand, MockShipmentQuery,
    MockUsersQuery,
};
use crate::inbound::http::state::HttpState;

/// Name of the session cookie used by the test middleware.
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Pull the session cookie out of a response, panicking when it is absent.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("response should set the session cookie")
}

/// Mock driving ports, converted into [`HttpState`] once expectations are
/// set. Ports a test leaves untouched panic if a handler calls them.
#[derive(Default)]
pub struct MockPorts {
    /// `POST /login`
    pub login: MockLoginService,
    /// `POST /register`
    pub registration: MockAccountRegistration,
    /// `GET /users/me`
    pub users: MockUsersQuery,
    /// Shipment mutations.
    pub shipments: MockShipmentCommand,
    /// Shipment reads.
    pub shipments_query: MockShipmentQuery,
}

impl MockPorts {
    /// Wrap the mocks for `web::Data`.
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            users: Arc::new(self.users),
            shipments: Arc::new(self.shipments),
            shipments_query: Arc::new(self.shipments_query),
        }
    }
}

/// Identity used by handler tests that need a signed-in caller.
pub fn fixture_user_id() -> UserId {
    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture user id")
}
