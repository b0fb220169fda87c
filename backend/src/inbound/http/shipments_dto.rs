//! Wire types for the shipment endpoints.
//!
//! Request bodies arrive loosely typed (every field optional, dates as
//! strings) and are converted into [`ShipmentDraft`] or [`ShipmentPatch`]
//! here, so handlers only ever pass validated values to the domain.

use pagination::{PageLinks, PageMeta};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ShipmentView;
use crate::domain::{
    DestinationAddress, Error, ListShipmentsParams, ShipmentDraft, ShipmentNotes, ShipmentPatch,
    ShipmentStatus, ShipmentSummary, ShipmentValidationError, StatusFilter, TrackingNumber,
};
use crate::inbound::http::validation::{
    FieldErrorCode, FieldName, field_error, parse_date, parse_optional_date, require,
};

const TRACKING_NUMBER: FieldName = FieldName::new("trackingNumber");
const DESTINATION_ADDRESS: FieldName = FieldName::new("destinationAddress");
const STATUS: FieldName = FieldName::new("status");
const SHIP_DATE: FieldName = FieldName::new("shipDate");
const ESTIMATED_DELIVERY_DATE: FieldName = FieldName::new("estimatedDeliveryDate");
const NOTES: FieldName = FieldName::new("notes");

/// Body of `POST /shipments` and `PUT /shipments/{id}`.
///
/// Creation requires `trackingNumber`, `destinationAddress`, `shipDate` and
/// `estimatedDeliveryDate`; updates accept any non-empty subset.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPayload {
    /// Globally unique, at most 50 characters.
    #[serde(default, alias = "tracking_number")]
    pub tracking_number: Option<String>,
    /// Free-text delivery address.
    #[serde(default, alias = "destination_address")]
    pub destination_address: Option<String>,
    /// One of the five lifecycle values.
    #[serde(default)]
    #[schema(example = "IN_TRANSIT")]
    pub status: Option<String>,
    /// Handle with care.
    #[serde(default, alias = "is_fragile")]
    pub is_fragile: Option<bool>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[serde(default, alias = "ship_date")]
    #[schema(example = "2026-03-01")]
    pub ship_date: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[serde(default, alias = "estimated_delivery_date")]
    #[schema(example = "2026-03-05")]
    pub estimated_delivery_date: Option<String>,
    /// At most 1000 characters.
    #[serde(default)]
    pub notes: Option<String>,
}

fn validation_error(field: FieldName, err: &ShipmentValidationError) -> Error {
    let code = match err {
        ShipmentValidationError::EmptyTrackingNumber
        | ShipmentValidationError::EmptyDestinationAddress => FieldErrorCode::MissingField,
        ShipmentValidationError::TrackingNumberTooLong { .. }
        | ShipmentValidationError::NotesTooLong { .. } => FieldErrorCode::TooLong,
        ShipmentValidationError::InvalidId => FieldErrorCode::InvalidUuid,
        ShipmentValidationError::UnknownStatus => FieldErrorCode::InvalidValue,
    };
    field_error(field, code, err.to_string())
}

fn parse_tracking_number(raw: String) -> Result<TrackingNumber, Error> {
    TrackingNumber::new(raw).map_err(|err| validation_error(TRACKING_NUMBER, &err))
}

fn parse_destination(raw: String) -> Result<DestinationAddress, Error> {
    DestinationAddress::new(raw).map_err(|err| validation_error(DESTINATION_ADDRESS, &err))
}

fn parse_status(raw: &str) -> Result<ShipmentStatus, Error> {
    raw.parse()
        .map_err(|err: ShipmentValidationError| validation_error(STATUS, &err))
}

fn parse_notes(raw: String) -> Result<ShipmentNotes, Error> {
    ShipmentNotes::new(raw).map_err(|err| validation_error(NOTES, &err))
}

impl ShipmentPayload {
    /// Validate a creation body.
    pub fn into_draft(self) -> Result<ShipmentDraft, Error> {
        let tracking_number = parse_tracking_number(require(self.tracking_number, TRACKING_NUMBER)?)?;
        let destination_address =
            parse_destination(require(self.destination_address, DESTINATION_ADDRESS)?)?;
        let ship_date = parse_date(&require(self.ship_date, SHIP_DATE)?, SHIP_DATE)?;
        let estimated_delivery_date = parse_date(
            &require(self.estimated_delivery_date, ESTIMATED_DELIVERY_DATE)?,
            ESTIMATED_DELIVERY_DATE,
        )?;

        let mut draft = ShipmentDraft::new(
            tracking_number,
            destination_address,
            ship_date,
            estimated_delivery_date,
        );
        if let Some(status) = self.status.as_deref() {
            draft.status = parse_status(status)?;
        }
        if let Some(is_fragile) = self.is_fragile {
            draft.is_fragile = is_fragile;
        }
        if let Some(notes) = self.notes {
            draft.notes = parse_notes(notes)?;
        }
        Ok(draft)
    }

    /// Validate an update body. Absent fields stay `None`; emptiness is the
    /// service's call.
    pub fn into_patch(self) -> Result<ShipmentPatch, Error> {
        Ok(ShipmentPatch {
            tracking_number: self.tracking_number.map(parse_tracking_number).transpose()?,
            destination_address: self.destination_address.map(parse_destination).transpose()?,
            status: self.status.as_deref().map(parse_status).transpose()?,
            is_fragile: self.is_fragile,
            ship_date: parse_optional_date(self.ship_date.as_deref(), SHIP_DATE)?,
            estimated_delivery_date: parse_optional_date(
                self.estimated_delivery_date.as_deref(),
                ESTIMATED_DELIVERY_DATE,
            )?,
            notes: self.notes.map(parse_notes).transpose()?,
        })
    }
}

/// Query string of `GET /shipments`.
///
/// `page` and `limit` stay strings so junk values fall back to defaults
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListShipmentsQuery {
    /// Case-insensitive substring of the tracking number or address.
    #[serde(default)]
    pub search: Option<String>,
    /// A status value, or `ALL`.
    #[serde(default)]
    pub status: Option<String>,
    /// Sort column, e.g. `trackingNumber` or `ship_date`. Defaults to
    /// `createdAt`.
    #[serde(default, alias = "sort_by")]
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    #[serde(default, alias = "sort_order")]
    pub sort_order: Option<String>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<String>,
    /// Page size, default 10. Values above 100 are clamped to 100.
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListShipmentsQuery {
    /// Convert into domain listing parameters. Only the status is checked;
    /// everything else degrades to defaults.
    pub fn to_params(&self) -> Result<ListShipmentsParams, Error> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => StatusFilter::All,
            Some(raw) => raw
                .parse()
                .map_err(|err: ShipmentValidationError| validation_error(STATUS, &err))?,
        };
        Ok(ListShipmentsParams {
            search: self.search.clone(),
            status,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
        })
    }
}

/// Derived delivery label shown next to a shipment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeliveryForecastResponse {
    /// For example `On schedule` or `Overdue`.
    #[schema(example = "On schedule")]
    pub label: String,
    /// `delivered`, `overdue` or `on-schedule`.
    #[schema(example = "on-schedule")]
    pub tone: String,
}

/// Shipment as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponse {
    /// Shipment id.
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub id: String,
    /// Tracking number.
    #[schema(example = "TRK001")]
    pub tracking_number: String,
    /// Destination address.
    pub destination_address: String,
    /// Lifecycle status.
    #[schema(example = "IN_TRANSIT")]
    pub status: String,
    /// Fragility flag.
    pub is_fragile: bool,
    /// RFC 3339.
    pub ship_date: String,
    /// RFC 3339.
    pub estimated_delivery_date: String,
    /// Notes, possibly empty.
    pub notes: String,
    /// RFC 3339.
    pub created_at: String,
    /// RFC 3339.
    pub updated_at: String,
    /// Computed at read time; never stored.
    pub delivery_forecast: DeliveryForecastResponse,
}

impl From<ShipmentView> for ShipmentResponse {
    fn from(value: ShipmentView) -> Self {
        let ShipmentView { shipment, forecast } = value;
        Self {
            id: shipment.id().to_string(),
            tracking_number: shipment.tracking_number().to_string(),
            destination_address: shipment.destination_address().as_ref().to_owned(),
            status: shipment.status().as_str().to_owned(),
            is_fragile: shipment.is_fragile(),
            ship_date: shipment.ship_date().to_rfc3339(),
            estimated_delivery_date: shipment.estimated_delivery_date().to_rfc3339(),
            notes: shipment.notes().as_ref().to_owned(),
            created_at: shipment.created_at().to_rfc3339(),
            updated_at: shipment.updated_at().to_rfc3339(),
            delivery_forecast: DeliveryForecastResponse {
                label: forecast.label.as_str().to_owned(),
                tone: forecast.tone.as_str().to_owned(),
            },
        }
    }
}

/// `{currentPage, totalPages, totalItems, itemsPerPage}`
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    /// 1-based page served.
    pub current_page: u32,
    /// Zero when nothing matched.
    pub total_pages: u64,
    /// Matches across all pages.
    pub total_items: u64,
    /// Page size used. Requested limits above 100 are clamped to 100, and
    /// missing or non-numeric limits fall back to 10.
    #[schema(minimum = 1, maximum = 100)]
    pub items_per_page: u32,
}

impl From<PageMeta> for PaginationResponse {
    fn from(value: PageMeta) -> Self {
        Self {
            current_page: value.current_page,
            total_pages: value.total_pages,
            total_items: value.total_items,
            items_per_page: value.items_per_page,
        }
    }
}

/// Navigation links for the served page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageLinksResponse {
    /// Current page.
    #[serde(rename = "self")]
    pub self_: String,
    /// First page.
    pub first: String,
    /// Previous page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Next page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Last page.
    pub last: String,
}

impl From<PageLinks> for PageLinksResponse {
    fn from(value: PageLinks) -> Self {
        Self {
            self_: value.self_.into(),
            first: value.first.into(),
            prev: value.prev.map(Into::into),
            next: value.next.map(Into::into),
            last: value.last.into(),
        }
    }
}

/// Body of `GET /shipments`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShipmentListResponse {
    /// Shipments on this page.
    pub shipments: Vec<ShipmentResponse>,
    /// Window metadata.
    pub pagination: PaginationResponse,
    /// Navigation links.
    pub links: PageLinksResponse,
}

/// Body of `GET /shipments/stats/summary`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShipmentSummaryResponse {
    /// Every owned shipment.
    pub total: u64,
    /// `PENDING`
    pub pending: u64,
    /// `IN_TRANSIT`
    pub in_transit: u64,
    /// `OUT_FOR_DELIVERY`
    pub out_for_delivery: u64,
    /// `DELIVERED`
    pub delivered: u64,
    /// `DELAYED`
    pub delayed: u64,
}

impl From<ShipmentSummary> for ShipmentSummaryResponse {
    fn from(value: ShipmentSummary) -> Self {
        let ShipmentSummary {
            total,
            pending,
            in_transit,
            out_for_delivery,
            delivered,
            delayed,
        } = value;
        Self {
            total,
            pending,
            in_transit,
            out_for_delivery,
            delivered,
            delayed,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn full_payload() -> ShipmentPayload {
        serde_json::from_value(json!({
            "trackingNumber": " TRK100 ",
            "destinationAddress": "1 Dock Road, Leith",
            "status": "IN_TRANSIT",
            "isFragile": true,
            "shipDate": "2026-03-01",
            "estimatedDeliveryDate": "2026-03-05T12:00:00Z",
            "notes": "Leave at reception",
        }))
        .expect("payload")
    }

    #[rstest]
    fn draft_carries_every_supplied_field(full_payload: ShipmentPayload) {
        let draft = full_payload.into_draft().expect("valid draft");
        assert_eq!(draft.tracking_number.as_ref(), "TRK100");
        assert_eq!(draft.status, ShipmentStatus::InTransit);
        assert!(draft.is_fragile);
        assert_eq!(
            Some(draft.ship_date),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single()
        );
        assert_eq!(draft.notes.as_ref(), "Leave at reception");
    }

    #[rstest]
    fn draft_applies_defaults() {
        let payload: ShipmentPayload = serde_json::from_value(json!({
            "tracking_number": "TRK101",
            "destination_address": "2 Quay Street",
            "ship_date": "2026-03-01",
            "estimated_delivery_date": "2026-03-04",
        }))
        .expect("snake_case aliases");
        let draft = payload.into_draft().expect("valid draft");
        assert_eq!(draft.status, ShipmentStatus::Pending);
        assert!(!draft.is_fragile);
        assert_eq!(draft.notes.as_ref(), "");
    }

    #[rstest]
    #[case(json!({"destinationAddress": "x", "shipDate": "2026-03-01", "estimatedDeliveryDate": "2026-03-02"}), "trackingNumber", "missing_field")]
    #[case(json!({"trackingNumber": "   ", "destinationAddress": "x", "shipDate": "2026-03-01", "estimatedDeliveryDate": "2026-03-02"}), "trackingNumber", "missing_field")]
    #[case(json!({"trackingNumber": "T".repeat(51), "destinationAddress": "x", "shipDate": "2026-03-01", "estimatedDeliveryDate": "2026-03-02"}), "trackingNumber", "too_long")]
    #[case(json!({"trackingNumber": "T1", "shipDate": "2026-03-01", "estimatedDeliveryDate": "2026-03-02"}), "destinationAddress", "missing_field")]
    #[case(json!({"trackingNumber": "T1", "destinationAddress": "x", "estimatedDeliveryDate": "2026-03-02"}), "shipDate", "missing_field")]
    #[case(json!({"trackingNumber": "T1", "destinationAddress": "x", "shipDate": "soon", "estimatedDeliveryDate": "2026-03-02"}), "shipDate", "invalid_date")]
    #[case(json!({"trackingNumber": "T1", "destinationAddress": "x", "shipDate": "2026-03-01", "estimatedDeliveryDate": "2026-03-02", "status": "LOST"}), "status", "invalid_value")]
    #[case(json!({"trackingNumber": "T1", "destinationAddress": "x", "shipDate": "2026-03-01", "estimatedDeliveryDate": "2026-03-02", "notes": "n".repeat(1001)}), "notes", "too_long")]
    fn draft_rejections_name_the_field(
        #[case] body: serde_json::Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let payload: ShipmentPayload = serde_json::from_value(body).expect("payload");
        let error = payload.into_draft().expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }

    #[rstest]
    fn patch_keeps_absent_fields_empty() {
        let payload: ShipmentPayload =
            serde_json::from_value(json!({ "status": "DELIVERED" })).expect("payload");
        let patch = payload.into_patch().expect("valid patch");
        assert_eq!(patch.status, Some(ShipmentStatus::Delivered));
        assert!(patch.notes.is_none());
        assert!(patch.destination_address.is_none());
        assert!(!patch.is_empty());
    }

    #[rstest]
    fn empty_body_gives_empty_patch() {
        let patch = ShipmentPayload::default().into_patch().expect("valid patch");
        assert!(patch.is_empty());
    }

    #[rstest]
    #[case(None, StatusFilter::All)]
    #[case(Some("ALL"), StatusFilter::All)]
    #[case(Some(""), StatusFilter::All)]
    #[case(Some("DELAYED"), StatusFilter::Only(ShipmentStatus::Delayed))]
    fn list_query_parses_status(#[case] raw: Option<&str>, #[case] expected: StatusFilter) {
        let query = ListShipmentsQuery {
            status: raw.map(str::to_owned),
            ..ListShipmentsQuery::default()
        };
        assert_eq!(query.to_params().expect("valid").status, expected);
    }

    #[rstest]
    fn list_query_rejects_unknown_status() {
        let query = ListShipmentsQuery {
            status: Some("SHIPPED".to_owned()),
            ..ListShipmentsQuery::default()
        };
        let error = query.to_params().expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.details().expect("details")["field"], "status");
    }
}
