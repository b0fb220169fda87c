//! Validated shipment field types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a tracking number, in characters.
pub const TRACKING_NUMBER_MAX: usize = 50;
/// Maximum length of shipment notes, in characters.
pub const NOTES_MAX: usize = 1000;

/// Validation errors raised by the shipment field types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShipmentValidationError {
    /// The shipment id was not a UUID.
    #[error("shipment id must be a valid UUID")]
    InvalidId,
    /// The tracking number was blank.
    #[error("tracking number is required")]
    EmptyTrackingNumber,
    /// The tracking number exceeded [`TRACKING_NUMBER_MAX`].
    #[error("tracking number must be at most {max} characters")]
    TrackingNumberTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The destination address was blank.
    #[error("destination address is required")]
    EmptyDestinationAddress,
    /// The notes exceeded [`NOTES_MAX`].
    #[error("notes must be at most {max} characters")]
    NotesTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The status was not one of the five lifecycle values.
    #[error("status must be one of PENDING, IN_TRANSIT, OUT_FOR_DELIVERY, DELIVERED, DELAYED")]
    UnknownStatus,
}

/// Stable shipment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentId(Uuid);

impl ShipmentId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ShipmentId {
    type Err = ShipmentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ShipmentValidationError::InvalidId)
    }
}

/// Globally unique external tracking number.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`TRACKING_NUMBER_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Validate and construct a tracking number.
    ///
    /// # Examples
    /// ```
    /// use shipment_backend::domain::TrackingNumber;
    ///
    /// assert_eq!(TrackingNumber::new(" TRK001 ").unwrap().as_ref(), "TRK001");
    /// assert!(TrackingNumber::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, ShipmentValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ShipmentValidationError::EmptyTrackingNumber);
        }
        if trimmed.chars().count() > TRACKING_NUMBER_MAX {
            return Err(ShipmentValidationError::TrackingNumberTooLong {
                max: TRACKING_NUMBER_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TrackingNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TrackingNumber> for String {
    fn from(value: TrackingNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for TrackingNumber {
    type Error = ShipmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text destination address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DestinationAddress(String);

impl DestinationAddress {
    /// Validate and construct a destination address.
    pub fn new(raw: impl Into<String>) -> Result<Self, ShipmentValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ShipmentValidationError::EmptyDestinationAddress);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DestinationAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<DestinationAddress> for String {
    fn from(value: DestinationAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for DestinationAddress {
    type Error = ShipmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text notes attached to a shipment. Empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShipmentNotes(String);

impl ShipmentNotes {
    /// Validate and construct notes. Whitespace is preserved.
    pub fn new(raw: impl Into<String>) -> Result<Self, ShipmentValidationError> {
        let raw = raw.into();
        if raw.chars().count() > NOTES_MAX {
            return Err(ShipmentValidationError::NotesTooLong { max: NOTES_MAX });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for ShipmentNotes {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ShipmentNotes> for String {
    fn from(value: ShipmentNotes) -> Self {
        value.0
    }
}

impl TryFrom<String> for ShipmentNotes {
    type Error = ShipmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Shipment lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    /// Registered but not yet shipped.
    #[default]
    Pending,
    /// Moving between facilities.
    InTransit,
    /// On the last-mile vehicle.
    OutForDelivery,
    /// Handed over to the recipient.
    Delivered,
    /// Held up somewhere along the route.
    Delayed,
}

impl ShipmentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InTransit,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Delayed,
    ];

    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InTransit => "IN_TRANSIT",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Delayed => "DELAYED",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = ShipmentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(ShipmentValidationError::UnknownStatus)
    }
}
