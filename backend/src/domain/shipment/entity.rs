//! The shipment aggregate and its create/update inputs.

use chrono::{DateTime, Utc};

use super::fields::{DestinationAddress, ShipmentId, ShipmentNotes, ShipmentStatus, TrackingNumber};
use crate::domain::UserId;

/// A tracked delivery owned by exactly one user.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `updated_at` is refreshed on every mutation and never precedes
///   `created_at` when both come from the same clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    id: ShipmentId,
    owner: UserId,
    tracking_number: TrackingNumber,
    destination_address: DestinationAddress,
    status: ShipmentStatus,
    is_fragile: bool,
    ship_date: DateTime<Utc>,
    estimated_delivery_date: DateTime<Utc>,
    notes: ShipmentNotes,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Every stored attribute of a shipment, used by persistence adapters to
/// rebuild a [`Shipment`].
#[derive(Debug, Clone)]
pub struct ShipmentParts {
    /// Identifier.
    pub id: ShipmentId,
    /// Owning user.
    pub owner: UserId,
    /// Tracking number.
    pub tracking_number: TrackingNumber,
    /// Destination address.
    pub destination_address: DestinationAddress,
    /// Lifecycle status.
    pub status: ShipmentStatus,
    /// Fragility flag.
    pub is_fragile: bool,
    /// Date the shipment left the origin.
    pub ship_date: DateTime<Utc>,
    /// Promised delivery date.
    pub estimated_delivery_date: DateTime<Utc>,
    /// Free-text notes.
    pub notes: ShipmentNotes,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<ShipmentParts> for Shipment {
    fn from(parts: ShipmentParts) -> Self {
        Self {
            id: parts.id,
            owner: parts.owner,
            tracking_number: parts.tracking_number,
            destination_address: parts.destination_address,
            status: parts.status,
            is_fragile: parts.is_fragile,
            ship_date: parts.ship_date,
            estimated_delivery_date: parts.estimated_delivery_date,
            notes: parts.notes,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }
}

impl Shipment {
    /// Materialise a draft for `owner`, stamping both timestamps with `now`.
    pub fn create(id: ShipmentId, owner: UserId, draft: ShipmentDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            tracking_number: draft.tracking_number,
            destination_address: draft.destination_address,
            status: draft.status,
            is_fragile: draft.is_fragile,
            ship_date: draft.ship_date,
            estimated_delivery_date: draft.estimated_delivery_date,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `patch`, leaving the rest untouched, and
    /// refresh `updated_at`.
    pub fn apply(&mut self, patch: ShipmentPatch, now: DateTime<Utc>) {
        let ShipmentPatch {
            tracking_number,
            destination_address,
            status,
            is_fragile,
            ship_date,
            estimated_delivery_date,
            notes,
        } = patch;

        if let Some(value) = tracking_number {
            self.tracking_number = value;
        }
        if let Some(value) = destination_address {
            self.destination_address = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = is_fragile {
            self.is_fragile = value;
        }
        if let Some(value) = ship_date {
            self.ship_date = value;
        }
        if let Some(value) = estimated_delivery_date {
            self.estimated_delivery_date = value;
        }
        if let Some(value) = notes {
            self.notes = value;
        }
        self.updated_at = now;
    }

    /// Identifier.
    pub fn id(&self) -> ShipmentId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Tracking number.
    pub fn tracking_number(&self) -> &TrackingNumber {
        &self.tracking_number
    }

    /// Destination address.
    pub fn destination_address(&self) -> &DestinationAddress {
        &self.destination_address
    }

    /// Lifecycle status.
    pub fn status(&self) -> ShipmentStatus {
        self.status
    }

    /// Whether the parcel needs careful handling.
    pub fn is_fragile(&self) -> bool {
        self.is_fragile
    }

    /// Date the shipment left the origin.
    pub fn ship_date(&self) -> DateTime<Utc> {
        self.ship_date
    }

    /// Promised delivery date.
    pub fn estimated_delivery_date(&self) -> DateTime<Utc> {
        self.estimated_delivery_date
    }

    /// Free-text notes.
    pub fn notes(&self) -> &ShipmentNotes {
        &self.notes
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated input for creating a shipment.
///
/// Optional fields fall back to the documented defaults: status
/// [`ShipmentStatus::Pending`], not fragile, empty notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentDraft {
    /// Tracking number; must be unique across every owner.
    pub tracking_number: TrackingNumber,
    /// Destination address.
    pub destination_address: DestinationAddress,
    /// Initial status.
    pub status: ShipmentStatus,
    /// Fragility flag.
    pub is_fragile: bool,
    /// Ship date.
    pub ship_date: DateTime<Utc>,
    /// Estimated delivery date.
    pub estimated_delivery_date: DateTime<Utc>,
    /// Notes.
    pub notes: ShipmentNotes,
}

impl ShipmentDraft {
    /// Draft with only the required fields; everything else defaulted.
    pub fn new(
        tracking_number: TrackingNumber,
        destination_address: DestinationAddress,
        ship_date: DateTime<Utc>,
        estimated_delivery_date: DateTime<Utc>,
    ) -> Self {
        Self {
            tracking_number,
            destination_address,
            status: ShipmentStatus::default(),
            is_fragile: false,
            ship_date,
            estimated_delivery_date,
            notes: ShipmentNotes::default(),
        }
    }
}

/// Partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentPatch {
    /// Replacement tracking number.
    pub tracking_number: Option<TrackingNumber>,
    /// Replacement destination address.
    pub destination_address: Option<DestinationAddress>,
    /// Replacement status.
    pub status: Option<ShipmentStatus>,
    /// Replacement fragility flag.
    pub is_fragile: Option<bool>,
    /// Replacement ship date.
    pub ship_date: Option<DateTime<Utc>>,
    /// Replacement estimated delivery date.
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    /// Replacement notes.
    pub notes: Option<ShipmentNotes>,
}

impl ShipmentPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
