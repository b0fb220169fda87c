//! Delivery forecast classification.
//!
//! The forecast is derived on every read from the status, the estimated
//! delivery date and the current time. It is never stored.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::fields::ShipmentStatus;

/// Human readable forecast label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForecastLabel {
    /// The shipment was delivered.
    #[serde(rename = "Delivered successfully")]
    DeliveredSuccessfully,
    /// The estimated delivery date has passed.
    #[serde(rename = "Overdue")]
    Overdue,
    /// In transit and still within the estimate.
    #[serde(rename = "On schedule")]
    OnSchedule,
    /// Flagged as delayed but not yet past the estimate.
    #[serde(rename = "Delayed")]
    Delayed,
    /// Anything else.
    #[serde(rename = "Pending")]
    Pending,
}

impl ForecastLabel {
    /// Display text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeliveredSuccessfully => "Delivered successfully",
            Self::Overdue => "Overdue",
            Self::OnSchedule => "On schedule",
            Self::Delayed => "Delayed",
            Self::Pending => "Pending",
        }
    }
}

/// Presentation tone a client can map to a badge colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastTone {
    /// Terminal, positive.
    Delivered,
    /// Needs attention.
    Overdue,
    /// Nothing to worry about yet.
    OnSchedule,
}

impl ForecastTone {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Overdue => "overdue",
            Self::OnSchedule => "on-schedule",
        }
    }
}

/// Forecast label plus tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryForecast {
    /// Label text.
    pub label: ForecastLabel,
    /// Presentation tone.
    pub tone: ForecastTone,
}

impl DeliveryForecast {
    /// Classify a shipment. The first matching rule wins:
    ///
    /// 1. delivered;
    /// 2. overdue when `now` is strictly after the estimate;
    /// 3. on schedule when in transit;
    /// 4. delayed;
    /// 5. pending.
    ///
    /// `OUT_FOR_DELIVERY` before the estimate lands in the pending bucket.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use shipment_backend::domain::{DeliveryForecast, ForecastLabel, ShipmentStatus};
    ///
    /// let now = Utc::now();
    /// let late = DeliveryForecast::classify(ShipmentStatus::InTransit, now - Duration::days(1), now);
    /// assert_eq!(late.label, ForecastLabel::Overdue);
    /// ```
    pub fn classify(
        status: ShipmentStatus,
        estimated_delivery_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let label = if status == ShipmentStatus::Delivered {
            ForecastLabel::DeliveredSuccessfully
        } else if now > estimated_delivery_date {
            ForecastLabel::Overdue
        } else if status == ShipmentStatus::InTransit {
            ForecastLabel::OnSchedule
        } else if status == ShipmentStatus::Delayed {
            ForecastLabel::Delayed
        } else {
            ForecastLabel::Pending
        };
        Self::from_label(label)
    }

    fn from_label(label: ForecastLabel) -> Self {
        let tone = match label {
            ForecastLabel::DeliveredSuccessfully => ForecastTone::Delivered,
            ForecastLabel::Overdue | ForecastLabel::Delayed => ForecastTone::Overdue,
            ForecastLabel::OnSchedule | ForecastLabel::Pending => ForecastTone::OnSchedule,
        };
        Self { label, tone }
    }
}
