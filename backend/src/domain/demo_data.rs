//! Demo account and sample shipments for local environments.
//!
//! Seeding is idempotent: the coordinator account is only registered when
//! missing, and sample shipments whose tracking numbers already exist are
//! skipped.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AccountRegistration, CreateShipmentRequest, ShipmentCommand, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    DestinationAddress, Error, ErrorCode, Registration, RegistrationInput, ShipmentDraft,
    ShipmentNotes, ShipmentStatus, TrackingNumber, UserId, Username,
};

/// Username of the demo coordinator.
pub const DEMO_USERNAME: &str = "coordinator";
/// Password of the demo coordinator.
pub const DEMO_PASSWORD: &str = "shipment123";
const DEMO_EMAIL: &str = "coordinator@example.com";
const DEMO_FULL_NAME: &str = "Logistics Coordinator";

struct SampleShipment {
    tracking_number: &'static str,
    destination_address: &'static str,
    status: ShipmentStatus,
    is_fragile: bool,
    ship_offset_days: i64,
    eta_offset_days: i64,
    notes: &'static str,
}

// Dates are relative to the seeding time so forecasts stay varied.
const SAMPLE_SHIPMENTS: [SampleShipment; 5] = [
    SampleShipment {
        tracking_number: "TRK001",
        destination_address: "123 Main St, New York, NY 10001",
        status: ShipmentStatus::InTransit,
        is_fragile: true,
        ship_offset_days: -3,
        eta_offset_days: 2,
        notes: "Handle with care - fragile electronics",
    },
    SampleShipment {
        tracking_number: "TRK002",
        destination_address: "456 Oak Ave, Los Angeles, CA 90210",
        status: ShipmentStatus::Delivered,
        is_fragile: false,
        ship_offset_days: -8,
        eta_offset_days: -1,
        notes: "Standard delivery completed",
    },
    SampleShipment {
        tracking_number: "TRK003",
        destination_address: "789 Pine Rd, Chicago, IL 60601",
        status: ShipmentStatus::Pending,
        is_fragile: false,
        ship_offset_days: 1,
        eta_offset_days: 6,
        notes: "Awaiting pickup",
    },
    SampleShipment {
        tracking_number: "TRK004",
        destination_address: "321 Elm St, Houston, TX 77001",
        status: ShipmentStatus::OutForDelivery,
        is_fragile: true,
        ship_offset_days: -4,
        eta_offset_days: 1,
        notes: "Fragile - glass items",
    },
    SampleShipment {
        tracking_number: "TRK005",
        destination_address: "654 Maple Dr, Phoenix, AZ 85001",
        status: ShipmentStatus::Delayed,
        is_fragile: false,
        ship_offset_days: -10,
        eta_offset_days: -2,
        notes: "Weather delay",
    },
];

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSeedOutcome {
    /// Whether the coordinator account was registered by this run.
    pub user_created: bool,
    /// Sample shipments inserted by this run.
    pub shipments_created: usize,
    /// Sample shipments skipped because their tracking number existed.
    pub shipments_skipped: usize,
}

/// Seeds the demo coordinator and sample shipments.
pub struct DemoDataSeeder<U> {
    user_repo: Arc<U>,
    registration: Arc<dyn AccountRegistration>,
    shipments: Arc<dyn ShipmentCommand>,
    clock: Arc<dyn Clock>,
}

impl<U> DemoDataSeeder<U>
where
    U: UserRepository,
{
    /// Create a seeder from the account and shipment ports.
    pub fn new(
        user_repo: Arc<U>,
        registration: Arc<dyn AccountRegistration>,
        shipments: Arc<dyn ShipmentCommand>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            registration,
            shipments,
            clock,
        }
    }

    /// Run the seed. Safe to repeat.
    pub async fn seed(&self) -> Result<DemoSeedOutcome, Error> {
        let mut outcome = DemoSeedOutcome::default();
        let owner = match self.find_coordinator().await? {
            Some(id) => id,
            None => {
                outcome.user_created = true;
                self.registration
                    .register(&demo_registration()?)
                    .await?
                    .id()
                    .clone()
            }
        };

        let now = self.clock.utc();
        for sample in &SAMPLE_SHIPMENTS {
            let draft = sample_draft(sample, now)?;
            let request = CreateShipmentRequest {
                owner: owner.clone(),
                draft,
            };
            match self.shipments.create_shipment(request).await {
                Ok(_) => outcome.shipments_created += 1,
                Err(error) if error.code() == ErrorCode::Conflict => {
                    outcome.shipments_skipped += 1;
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            user_created = outcome.user_created,
            shipments_created = outcome.shipments_created,
            shipments_skipped = outcome.shipments_skipped,
            "demo data seeded"
        );
        Ok(outcome)
    }

    async fn find_coordinator(&self) -> Result<Option<UserId>, Error> {
        let username = Username::new(DEMO_USERNAME)
            .map_err(|err| Error::internal(format!("invalid demo username: {err}")))?;
        let account = self
            .user_repo
            .find_by_username(&username)
            .await
            .map_err(|err| match err {
                UserRepositoryError::Connection { message } => Error::service_unavailable(message),
                other => Error::internal(other.to_string()),
            })?;
        Ok(account.map(|account| account.user.id().clone()))
    }
}

fn demo_registration() -> Result<Registration, Error> {
    Registration::try_from_input(RegistrationInput {
        username: DEMO_USERNAME,
        email: DEMO_EMAIL,
        password: DEMO_PASSWORD,
        full_name: DEMO_FULL_NAME,
        role: None,
    })
    .map_err(|err| Error::internal(format!("invalid demo registration: {err}")))
}

fn sample_draft(
    sample: &SampleShipment,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<ShipmentDraft, Error> {
    let invalid = |err: crate::domain::ShipmentValidationError| {
        Error::internal(format!("invalid sample shipment {}: {err}", sample.tracking_number))
    };
    let mut draft = ShipmentDraft::new(
        TrackingNumber::new(sample.tracking_number).map_err(invalid)?,
        DestinationAddress::new(sample.destination_address).map_err(invalid)?,
        now + Duration::days(sample.ship_offset_days),
        now + Duration::days(sample.eta_offset_days),
    );
    draft.status = sample.status;
    draft.is_fragile = sample.is_fragile;
    draft.notes = ShipmentNotes::new(sample.notes).map_err(invalid)?;
    Ok(draft)
}
