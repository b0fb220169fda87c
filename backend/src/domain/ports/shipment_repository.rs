//! Port for shipment persistence.
//!
//! Every read and mutation is scoped by owner except [`insert`], which must
//! reject a tracking number already used by *any* owner.
//!
//! [`insert`]: ShipmentRepository::insert

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{
    Shipment, ShipmentFilter, ShipmentId, ShipmentPatch, ShipmentSelection, ShipmentStatus,
    UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shipment repository adapters.
    pub enum ShipmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "shipment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "shipment repository query failed: {message}",
        /// Another shipment already uses the tracking number.
        DuplicateTrackingNumber { tracking_number: String } =>
            "tracking number {tracking_number} already exists",
    }
}

/// Port for storing and querying shipments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Persist a new shipment, enforcing global tracking-number uniqueness.
    async fn insert(&self, shipment: &Shipment) -> Result<(), ShipmentRepositoryError>;

    /// Find a shipment by id, visible only to its owner.
    async fn find_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError>;

    /// Return one page of shipments matching `selection`, in its order.
    async fn list(
        &self,
        selection: &ShipmentSelection,
        page: PageRequest,
    ) -> Result<Vec<Shipment>, ShipmentRepositoryError>;

    /// Count shipments matching `filter`.
    async fn count(&self, filter: &ShipmentFilter) -> Result<u64, ShipmentRepositoryError>;

    /// Apply `patch` to the owner's shipment in a single write and stamp
    /// `updated_at`. Fields absent from the patch keep their stored values,
    /// so concurrent patches touching different fields both survive.
    ///
    /// Returns the merged shipment, or `None` when no such shipment exists
    /// for that owner.
    async fn update_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
        patch: &ShipmentPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError>;

    /// Delete a shipment by id for its owner.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
    ) -> Result<bool, ShipmentRepositoryError>;

    /// Count an owner's shipments grouped by status. Statuses without
    /// shipments may be omitted.
    async fn count_by_status(
        &self,
        owner: &UserId,
    ) -> Result<Vec<(ShipmentStatus, u64)>, ShipmentRepositoryError>;
}
