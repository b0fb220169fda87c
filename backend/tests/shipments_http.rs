//! End-to-end HTTP behaviour over the in-memory adapters.
//!
//! The app is assembled the same way the server does it: session cookies,
//! trace identifiers, the JSON error handlers and the 404 fallback all sit in
//! front of the real services.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use shipment_backend::Trace;
use shipment_backend::inbound::http::error::{
    json_error_handler, path_error_handler, query_error_handler, route_not_found,
};
use shipment_backend::inbound::http::shipments;
use shipment_backend::inbound::http::users::{current_user, login, logout, register};
use shipment_backend::outbound::memory::{InMemoryShipmentRepository, InMemoryUserRepository};
use shipment_backend::services::ServiceGraph;

macro_rules! shipment_app {
    () => {{
        let graph = ServiceGraph::assemble(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryShipmentRepository::new()),
            Arc::new(DefaultClock),
        );
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".into())
            .cookie_secure(false)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(SameSite::Lax)
            .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
            .build();
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(graph.http_state))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .wrap(Trace)
                .service(
                    web::scope("/api/v1")
                        .wrap(session)
                        .service(login)
                        .service(register)
                        .service(logout)
                        .service(current_user)
                        .configure(shipments::configure),
                )
                .default_service(web::to(route_not_found)),
        )
        .await
    }};
}

async fn call<S, B>(app: &S, request: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, request).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

async fn sign_up<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, _) = call(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "parcel-pass",
                "fullName": format!("{username} desk"),
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {username}");

    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": "parcel-pass"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

fn shipment_body(tracking: &str, status: &str, eta: &str) -> Value {
    json!({
        "trackingNumber": tracking,
        "destinationAddress": "12 Harbour Road, Leith",
        "status": status,
        "isFragile": false,
        "shipDate": "2024-01-02",
        "estimatedDeliveryDate": eta,
    })
}

async fn create<S, B>(app: &S, cookie: &Cookie<'static>, body: Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    call(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/shipments")
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await
}

fn get(uri: &str, cookie: &Cookie<'static>) -> actix_http::Request {
    actix_test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request()
}

#[rstest]
#[actix_rt::test]
async fn shipment_lifecycle_round_trips_through_the_api() {
    let app = shipment_app!();
    let cookie = sign_up(&app, "harbour").await;

    let (status, created) = create(
        &app,
        &cookie,
        shipment_body("TRK-LIFE-1", "IN_TRANSIT", "2999-06-01"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["deliveryForecast"]["label"], "On schedule");
    let id = created["id"].as_str().expect("id").to_owned();

    let (status, fetched) = call(&app, get(&format!("/api/v1/shipments/{id}"), &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["trackingNumber"], "TRK-LIFE-1");

    let (status, updated) = call(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/shipments/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({"status": "DELIVERED"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "DELIVERED");
    assert_eq!(updated["trackingNumber"], "TRK-LIFE-1");
    assert_eq!(updated["deliveryForecast"]["label"], "Delivered successfully");

    let (status, summary) = call(&app, get("/api/v1/shipments/stats/summary", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["delivered"], 1);

    let (status, _) = call(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/shipments/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, get(&format!("/api/v1/shipments/{id}"), &cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_rt::test]
async fn owners_cannot_see_each_others_shipments_but_share_tracking_numbers() {
    let app = shipment_app!();
    let alice = sign_up(&app, "alice").await;
    let bob = sign_up(&app, "bobby").await;

    let (status, created) = create(
        &app,
        &alice,
        shipment_body("TRK-SHARED", "PENDING", "2999-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id").to_owned();

    let (status, _) = call(&app, get(&format!("/api/v1/shipments/{id}"), &bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = create(&app, &bob, shipment_body("TRK-SHARED", "PENDING", "2999-01-01")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let (status, listing) = call(&app, get("/api/v1/shipments", &bob)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["pagination"]["totalItems"], 0);
    assert_eq!(listing["pagination"]["totalPages"], 0);
}

#[rstest]
#[actix_rt::test]
async fn listing_pages_filters_and_links() {
    let app = shipment_app!();
    let cookie = sign_up(&app, "paging").await;
    for (tracking, status) in [
        ("TRK-P-1", "IN_TRANSIT"),
        ("TRK-P-2", "IN_TRANSIT"),
        ("TRK-P-3", "IN_TRANSIT"),
        ("TRK-P-4", "DELAYED"),
    ] {
        let (code, _) = create(&app, &cookie, shipment_body(tracking, status, "2999-03-01")).await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (status, body) = call(
        &app,
        get(
            "/api/v1/shipments?status=IN_TRANSIT&sortBy=trackingNumber&sortOrder=asc&page=2&limit=2",
            &cookie,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let shipments = body["shipments"].as_array().expect("shipments array");
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments.first().expect("row")["trackingNumber"], "TRK-P-3");
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert!(body["links"]["prev"].is_string());
    assert!(body["links"].get("next").is_none());

    let (status, body) = call(&app, get("/api/v1/shipments?search=p-4", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["totalItems"], 1);
}

#[rstest]
#[actix_rt::test]
async fn past_estimates_are_reported_overdue() {
    let app = shipment_app!();
    let cookie = sign_up(&app, "latecomer").await;

    let (status, created) = create(
        &app,
        &cookie,
        shipment_body("TRK-LATE", "OUT_FOR_DELIVERY", "2024-01-05"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["deliveryForecast"]["label"], "Overdue");
    assert_eq!(created["deliveryForecast"]["tone"], "overdue");
}

#[rstest]
#[actix_rt::test]
async fn shipments_require_a_session() {
    let app = shipment_app!();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/shipments")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key("trace-id"));
}

#[rstest]
#[actix_rt::test]
async fn logout_ends_access() {
    let app = shipment_app!();
    let cookie = sign_up(&app, "leaving").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let (status, _) = call(&app, get("/api/v1/users/me", &cleared)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
