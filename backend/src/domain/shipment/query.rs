//! Listing query construction.
//!
//! [`ShipmentSelection::build`] turns raw listing parameters into an
//! owner-scoped [`ShipmentFilter`] and a total [`ShipmentSort`]. Nothing
//! here fails: unknown sort fields fall back to newest-first and absent
//! filters are omitted. Persistence adapters translate the selection into
//! their own query language; [`ShipmentFilter::matches`] and
//! [`ShipmentSort::compare`] give the reference semantics.

use std::cmp::Ordering;
use std::str::FromStr;

use super::entity::Shipment;
use super::fields::{ShipmentStatus, ShipmentValidationError};
use crate::domain::UserId;

/// Status filter value meaning "every status".
pub const ALL_STATUSES: &str = "ALL";

/// Requested status restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No restriction.
    #[default]
    All,
    /// Only shipments in exactly this status.
    Only(ShipmentStatus),
}

impl FromStr for StatusFilter {
    type Err = ShipmentValidationError;

    /// Parse `"ALL"` or one of the status values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_STATUSES {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShipmentSortField {
    /// `tracking_number`
    TrackingNumber,
    /// `destination_address`
    DestinationAddress,
    /// `status`
    Status,
    /// `ship_date`
    ShipDate,
    /// `estimated_delivery_date`
    EstimatedDeliveryDate,
    /// Creation timestamp.
    #[default]
    CreatedAt,
}

impl ShipmentSortField {
    /// Resolve a client-supplied field name.
    ///
    /// Both the snake_case storage names and the camelCase JSON names are
    /// accepted. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tracking_number" | "trackingNumber" => Some(Self::TrackingNumber),
            "destination_address" | "destinationAddress" => Some(Self::DestinationAddress),
            "status" => Some(Self::Status),
            "ship_date" | "shipDate" => Some(Self::ShipDate),
            "estimated_delivery_date" | "estimatedDeliveryDate" => {
                Some(Self::EstimatedDeliveryDate)
            }
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// `"asc"` in any case is ascending; anything else, including absence,
    /// is descending.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

/// Raw listing parameters as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListShipmentsParams {
    /// Substring to look for in tracking numbers and destination addresses.
    pub search: Option<String>,
    /// Status restriction.
    pub status: StatusFilter,
    /// Requested sort field name.
    pub sort_by: Option<String>,
    /// Requested sort direction name.
    pub sort_order: Option<String>,
}

/// Owner-scoped filter: owner AND (search-or-clause)? AND (status)?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentFilter {
    /// Owner every matching shipment must belong to.
    pub owner: UserId,
    /// Trimmed, non-empty search text.
    pub search: Option<String>,
    /// Exact status to match.
    pub status: Option<ShipmentStatus>,
}

impl ShipmentFilter {
    /// Filter matching every shipment of `owner`.
    pub fn for_owner(owner: UserId) -> Self {
        Self {
            owner,
            search: None,
            status: None,
        }
    }

    /// Whether `shipment` satisfies the filter.
    ///
    /// Search is a case-insensitive substring match on the tracking number
    /// or the destination address; the text is taken literally.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        if shipment.owner() != &self.owner {
            return false;
        }
        if self.status.is_some_and(|status| shipment.status() != status) {
            return false;
        }
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                contains_folded(shipment.tracking_number().as_ref(), &needle)
                    || contains_folded(shipment.destination_address().as_ref(), &needle)
            }
        }
    }
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Sort key and direction. Ties are broken by ascending shipment id so
/// that every ordering is total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipmentSort {
    /// Primary sort key.
    pub field: ShipmentSortField,
    /// Direction of the primary key.
    pub direction: SortDirection,
}

impl ShipmentSort {
    /// Order two shipments under this sort.
    pub fn compare(&self, a: &Shipment, b: &Shipment) -> Ordering {
        let primary = match self.field {
            ShipmentSortField::TrackingNumber => a
                .tracking_number()
                .as_ref()
                .cmp(b.tracking_number().as_ref()),
            ShipmentSortField::DestinationAddress => a
                .destination_address()
                .as_ref()
                .cmp(b.destination_address().as_ref()),
            ShipmentSortField::Status => a.status().as_str().cmp(b.status().as_str()),
            ShipmentSortField::ShipDate => a.ship_date().cmp(&b.ship_date()),
            ShipmentSortField::EstimatedDeliveryDate => a
                .estimated_delivery_date()
                .cmp(&b.estimated_delivery_date()),
            ShipmentSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        };
        let directed = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        directed.then_with(|| a.id().cmp(&b.id()))
    }
}

/// A complete listing query minus the page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentSelection {
    /// Which shipments match.
    pub filter: ShipmentFilter,
    /// How they are ordered.
    pub sort: ShipmentSort,
}

impl ShipmentSelection {
    /// Build the selection for `owner` from raw parameters.
    ///
    /// # Examples
    /// ```
    /// use shipment_backend::domain::{
    ///     ListShipmentsParams, ShipmentSelection, ShipmentSortField, SortDirection, UserId,
    /// };
    ///
    /// let params = ListShipmentsParams {
    ///     sort_by: Some("not_a_column".into()),
    ///     sort_order: Some("asc".into()),
    ///     ..ListShipmentsParams::default()
    /// };
    /// let selection = ShipmentSelection::build(UserId::random(), &params);
    /// assert_eq!(selection.sort.field, ShipmentSortField::CreatedAt);
    /// assert_eq!(selection.sort.direction, SortDirection::Desc);
    /// ```
    pub fn build(owner: UserId, params: &ListShipmentsParams) -> Self {
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);
        let status = match params.status {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        };
        let sort = params
            .sort_by
            .as_deref()
            .and_then(ShipmentSortField::from_name)
            .map_or_else(ShipmentSort::default, |field| ShipmentSort {
                field,
                direction: SortDirection::from_name(params.sort_order.as_deref()),
            });

        Self {
            filter: ShipmentFilter {
                owner,
                search,
                status,
            },
            sort,
        }
    }

    /// Apply the selection to an in-memory collection, returning matching
    /// shipments in order.
    pub fn apply<'a>(&self, shipments: impl IntoIterator<Item = &'a Shipment>) -> Vec<&'a Shipment> {
        let mut matching: Vec<&Shipment> = shipments
            .into_iter()
            .filter(|shipment| self.filter.matches(shipment))
            .collect();
        matching.sort_by(|a, b| self.sort.compare(a, b));
        matching
    }
}
