//! Driving port for shipment reads.

use async_trait::async_trait;
use pagination::{PageMeta, PageRequest};

use crate::domain::{
    DeliveryForecast, Error, ListShipmentsParams, Shipment, ShipmentId, ShipmentSummary, UserId,
};

/// A shipment together with its forecast at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentView {
    /// Stored shipment.
    pub shipment: Shipment,
    /// Forecast computed from the status, estimate and current time.
    pub forecast: DeliveryForecast,
}

/// Request for a single shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetShipmentRequest {
    /// Authenticated caller.
    pub owner: UserId,
    /// Target shipment.
    pub shipment_id: ShipmentId,
}

/// Request for one page of the caller's shipments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListShipmentsRequest {
    /// Authenticated caller.
    pub owner: UserId,
    /// Search, status and sort parameters.
    pub params: ListShipmentsParams,
    /// Page window.
    pub page: PageRequest,
}

/// One page of shipments with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListShipmentsResponse {
    /// Shipments on the page, in order.
    pub shipments: Vec<ShipmentView>,
    /// Page position and totals.
    pub pagination: PageMeta,
}

/// Domain use-case port for shipment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentQuery: Send + Sync {
    /// Fetch one owned shipment. Absent and foreign shipments are both
    /// reported as not found.
    async fn get_shipment(&self, request: GetShipmentRequest) -> Result<ShipmentView, Error>;

    /// List owned shipments.
    async fn list_shipments(
        &self,
        request: ListShipmentsRequest,
    ) -> Result<ListShipmentsResponse, Error>;

    /// Per-status counts over every owned shipment.
    async fn summarize(&self, owner: &UserId) -> Result<ShipmentSummary, Error>;
}
