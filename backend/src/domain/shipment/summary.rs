//! Per-owner status counts.

use serde::{Deserialize, Serialize};

use super::fields::ShipmentStatus;

/// Shipment counts for one owner. Every field is zero for an owner with no
/// shipments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentSummary {
    /// Every owned shipment regardless of status.
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

impl ShipmentSummary {
    /// Fold per-status counts into a summary. Repeated statuses accumulate.
    ///
    /// # Examples
    /// ```
    /// use shipment_backend::domain::{ShipmentStatus, ShipmentSummary};
    ///
    /// let summary = ShipmentSummary::from_counts([
    ///     (ShipmentStatus::Delivered, 2),
    ///     (ShipmentStatus::Pending, 1),
    /// ]);
    /// assert_eq!(summary.total, 3);
    /// assert_eq!(summary.in_transit, 0);
    /// ```
    pub fn from_counts(counts: impl IntoIterator<Item = (ShipmentStatus, u64)>) -> Self {
        counts
            .into_iter()
            .fold(Self::default(), |mut summary, (status, count)| {
                summary.add(status, count);
                summary
            })
    }

    /// Count shipments one status at a time.
    pub fn tally(statuses: impl IntoIterator<Item = ShipmentStatus>) -> Self {
        Self::from_counts(statuses.into_iter().map(|status| (status, 1)))
    }

    fn add(&mut self, status: ShipmentStatus, count: u64) {
        let bucket = match status {
            ShipmentStatus::Pending => &mut self.pending,
            ShipmentStatus::InTransit => &mut self.in_transit,
            ShipmentStatus::OutForDelivery => &mut self.out_for_delivery,
            ShipmentStatus::Delivered => &mut self.delivered,
            ShipmentStatus::Delayed => &mut self.delayed,
        };
        *bucket = bucket.saturating_add(count);
        self.total = self.total.saturating_add(count);
    }
}
