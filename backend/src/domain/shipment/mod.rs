//! Shipment aggregate, field types, listing queries, forecasts and
//! summaries.

mod entity;
mod fields;
mod forecast;
mod query;
mod summary;

pub use entity::{Shipment, ShipmentDraft, ShipmentParts, ShipmentPatch};
pub use fields::{
    DestinationAddress, NOTES_MAX, ShipmentId, ShipmentNotes, ShipmentStatus,
    ShipmentValidationError, TRACKING_NUMBER_MAX, TrackingNumber,
};
pub use forecast::{DeliveryForecast, ForecastLabel, ForecastTone};
pub use query::{
    ALL_STATUSES, ListShipmentsParams, ShipmentFilter, ShipmentSelection, ShipmentSort,
    ShipmentSortField, SortDirection, StatusFilter,
};
pub use summary::ShipmentSummary;
