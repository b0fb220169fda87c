//! Driving port for shipment mutations.

use async_trait::async_trait;

use crate::domain::{Error, ShipmentDraft, ShipmentId, ShipmentPatch, UserId};

use super::ShipmentView;

/// Request to create a shipment owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShipmentRequest {
    /// Authenticated caller.
    pub owner: UserId,
    /// Validated shipment fields.
    pub draft: ShipmentDraft,
}

/// Request to partially update one of the caller's shipments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateShipmentRequest {
    /// Authenticated caller.
    pub owner: UserId,
    /// Target shipment.
    pub shipment_id: ShipmentId,
    /// Fields to change.
    pub patch: ShipmentPatch,
}

/// Request to delete one of the caller's shipments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteShipmentRequest {
    /// Authenticated caller.
    pub owner: UserId,
    /// Target shipment.
    pub shipment_id: ShipmentId,
}

/// Domain use-case port for shipment mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentCommand: Send + Sync {
    /// Create a shipment. Fails with a conflict when the tracking number is
    /// taken by any owner.
    async fn create_shipment(&self, request: CreateShipmentRequest) -> Result<ShipmentView, Error>;

    /// Merge the supplied fields into an owned shipment.
    async fn update_shipment(&self, request: UpdateShipmentRequest) -> Result<ShipmentView, Error>;

    /// Delete an owned shipment. A repeated delete reports not-found.
    async fn delete_shipment(&self, request: DeleteShipmentRequest) -> Result<(), Error>;
}
