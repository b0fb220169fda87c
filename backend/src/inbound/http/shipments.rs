//! Shipment HTTP handlers.
//!
//! ```text
//! GET /api/v1/shipments?search=trk&status=IN_TRANSIT&sortBy=shipDate&sortOrder=asc&page=1&limit=10
//! GET /api/v1/shipments/stats/summary
//! GET /api/v1/shipments/{id}
//! POST /api/v1/shipments
//! PUT /api/v1/shipments/{id}
//! DELETE /api/v1/shipments/{id}
//! ```
//!
//! Every handler scopes its work to the signed-in user. Shipments owned by
//! someone else read exactly like missing ones.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{PageLinks, PageRequest};
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{
    CreateShipmentRequest, DeleteShipmentRequest, GetShipmentRequest, ListShipmentsRequest,
    UpdateShipmentRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::shipments_dto::{
    ListShipmentsQuery, ShipmentListResponse, ShipmentPayload, ShipmentResponse,
    ShipmentSummaryResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_shipment_id;

const SHIPMENT_NOT_FOUND: &str = "Shipment not found";

/// List the caller's shipments.
#[utoipa::path(
    get,
    path = "/api/v1/shipments",
    params(ListShipmentsQuery),
    responses(
        (status = 200, description = "One page of shipments", body = ShipmentListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Shipment store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "listShipments"
)]
#[get("/shipments")]
pub async fn list_shipments(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    query: web::Query<ListShipmentsQuery>,
) -> ApiResult<web::Json<ShipmentListResponse>> {
    let owner = session.require_user_id()?;
    let params = query.to_params()?;
    let page = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref());

    let listing = state
        .shipments_query
        .list_shipments(ListShipmentsRequest {
            owner,
            params,
            page,
        })
        .await?;

    let links = PageLinks::new(&request.full_url(), page, listing.pagination).map_err(|err| {
        warn!(error = %err, "request URL cannot carry pagination links");
        Error::internal(err.to_string())
    })?;

    Ok(web::Json(ShipmentListResponse {
        shipments: listing
            .shipments
            .into_iter()
            .map(ShipmentResponse::from)
            .collect(),
        pagination: listing.pagination.into(),
        links: links.into(),
    }))
}

/// Per-status counts over the caller's shipments.
#[utoipa::path(
    get,
    path = "/api/v1/shipments/stats/summary",
    responses(
        (status = 200, description = "Status counts", body = ShipmentSummaryResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Shipment store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "shipmentSummary"
)]
#[get("/shipments/stats/summary")]
pub async fn shipment_summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ShipmentSummaryResponse>> {
    let owner = session.require_user_id()?;
    let summary = state.shipments_query.summarize(&owner).await?;
    Ok(web::Json(summary.into()))
}

/// Fetch one shipment.
#[utoipa::path(
    get,
    path = "/api/v1/shipments/{id}",
    params(("id" = String, Path, description = "Shipment id")),
    responses(
        (status = 200, description = "Shipment", body = ShipmentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Shipment not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "getShipment"
)]
#[get("/shipments/{id}")]
pub async fn get_shipment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShipmentResponse>> {
    let owner = session.require_user_id()?;
    let shipment_id = parse_shipment_id(&path, SHIPMENT_NOT_FOUND)?;
    let view = state
        .shipments_query
        .get_shipment(GetShipmentRequest { owner, shipment_id })
        .await?;
    Ok(web::Json(view.into()))
}

/// Create a shipment owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/shipments",
    request_body = ShipmentPayload,
    responses(
        (status = 201, description = "Shipment created", body = ShipmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Tracking number already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "createShipment"
)]
#[post("/shipments")]
pub async fn create_shipment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ShipmentPayload>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let view = state
        .shipments
        .create_shipment(CreateShipmentRequest { owner, draft })
        .await?;
    Ok(HttpResponse::Created().json(ShipmentResponse::from(view)))
}

/// Change some fields of a shipment. Omitted fields are left alone.
#[utoipa::path(
    put,
    path = "/api/v1/shipments/{id}",
    params(("id" = String, Path, description = "Shipment id")),
    request_body = ShipmentPayload,
    responses(
        (status = 200, description = "Updated shipment", body = ShipmentResponse),
        (status = 400, description = "Invalid request or no fields to update", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Shipment not found", body = ErrorSchema),
        (status = 409, description = "Tracking number already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "updateShipment"
)]
#[put("/shipments/{id}")]
pub async fn update_shipment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ShipmentPayload>,
) -> ApiResult<web::Json<ShipmentResponse>> {
    let owner = session.require_user_id()?;
    let shipment_id = parse_shipment_id(&path, SHIPMENT_NOT_FOUND)?;
    let patch = payload.into_inner().into_patch()?;
    let view = state
        .shipments
        .update_shipment(UpdateShipmentRequest {
            owner,
            shipment_id,
            patch,
        })
        .await?;
    Ok(web::Json(view.into()))
}

/// Delete a shipment.
#[utoipa::path(
    delete,
    path = "/api/v1/shipments/{id}",
    params(("id" = String, Path, description = "Shipment id")),
    responses(
        (status = 204, description = "Shipment deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Shipment not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "deleteShipment"
)]
#[delete("/shipments/{id}")]
pub async fn delete_shipment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let shipment_id = parse_shipment_id(&path, SHIPMENT_NOT_FOUND)?;
    state
        .shipments
        .delete_shipment(DeleteShipmentRequest { owner, shipment_id })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the shipment routes. The summary route is registered ahead of
/// `{id}` so `stats` is never read as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_shipments)
        .service(shipment_summary)
        .service(get_shipment)
        .service(create_shipment)
        .service(update_shipment)
        .service(delete_shipment);
}

#[cfg(test)]
#[path = "shipments_tests.rs"]
mod tests;
