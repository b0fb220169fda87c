//! Shipment domain services.
//!
//! [`ShipmentCommandService`] and [`ShipmentQueryService`] implement the
//! shipment driving ports on top of a [`ShipmentRepository`]. Timestamps and
//! forecasts use the injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageMeta;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateShipmentRequest, DeleteShipmentRequest, GetShipmentRequest, ListShipmentsRequest,
    ListShipmentsResponse, ShipmentCommand, ShipmentQuery, ShipmentRepository,
    ShipmentRepositoryError, ShipmentView, UpdateShipmentRequest,
};
use crate::domain::{
    DeliveryForecast, Error, Shipment, ShipmentId, ShipmentSelection, ShipmentSummary, UserId,
};

/// Message returned whenever a shipment is absent or owned by someone else.
pub const SHIPMENT_NOT_FOUND: &str = "Shipment not found";
/// Message returned when a tracking number is already taken.
pub const TRACKING_NUMBER_TAKEN: &str = "Tracking number already exists";
/// Message returned for an update that changes nothing.
pub const NO_FIELDS_TO_UPDATE: &str = "No fields to update";

fn map_repository_error(error: ShipmentRepositoryError) -> Error {
    match error {
        ShipmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("shipment repository unavailable: {message}"))
        }
        ShipmentRepositoryError::Query { message } => {
            Error::internal(format!("shipment repository error: {message}"))
        }
        ShipmentRepositoryError::DuplicateTrackingNumber { tracking_number } => {
            Error::conflict(TRACKING_NUMBER_TAKEN).with_details(serde_json::json!({
                "field": "trackingNumber",
                "code": "duplicate_tracking_number",
                "value": tracking_number,
            }))
        }
    }
}

fn view(shipment: Shipment, clock: &dyn Clock) -> ShipmentView {
    let forecast = DeliveryForecast::classify(
        shipment.status(),
        shipment.estimated_delivery_date(),
        clock.utc(),
    );
    ShipmentView { shipment, forecast }
}

async fn load_owned<R>(repo: &R, id: &ShipmentId, owner: &UserId) -> Result<Shipment, Error>
where
    R: ShipmentRepository + ?Sized,
{
    repo.find_for_owner(id, owner)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(SHIPMENT_NOT_FOUND))
}

/// Shipment service implementing the command driving port.
#[derive(Clone)]
pub struct ShipmentCommandService<R> {
    shipment_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ShipmentCommandService<R> {
    /// Create a new command service.
    pub fn new(shipment_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shipment_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> ShipmentCommand for ShipmentCommandService<R>
where
    R: ShipmentRepository,
{
    async fn create_shipment(&self, request: CreateShipmentRequest) -> Result<ShipmentView, Error> {
        let CreateShipmentRequest { owner, draft } = request;
        let shipment = Shipment::create(ShipmentId::random(), owner, draft, self.clock.utc());

        self.shipment_repo
            .insert(&shipment)
            .await
            .map_err(map_repository_error)?;

        info!(
            shipment_id = %shipment.id(),
            tracking_number = %shipment.tracking_number(),
            "shipment created"
        );
        Ok(view(shipment, self.clock.as_ref()))
    }

    async fn update_shipment(&self, request: UpdateShipmentRequest) -> Result<ShipmentView, Error> {
        let UpdateShipmentRequest {
            owner,
            shipment_id,
            patch,
        } = request;
        if patch.is_empty() {
            return Err(Error::invalid_request(NO_FIELDS_TO_UPDATE));
        }

        let shipment = self
            .shipment_repo
            .update_for_owner(&shipment_id, &owner, &patch, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(SHIPMENT_NOT_FOUND))?;

        debug!(shipment_id = %shipment_id, "shipment updated");
        Ok(view(shipment, self.clock.as_ref()))
    }

    async fn delete_shipment(&self, request: DeleteShipmentRequest) -> Result<(), Error> {
        let deleted = self
            .shipment_repo
            .delete_for_owner(&request.shipment_id, &request.owner)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(SHIPMENT_NOT_FOUND));
        }
        info!(shipment_id = %request.shipment_id, "shipment deleted");
        Ok(())
    }
}

/// Shipment service implementing the query driving port.
#[derive(Clone)]
pub struct ShipmentQueryService<R> {
    shipment_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ShipmentQueryService<R> {
    /// Create a new query service.
    pub fn new(shipment_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shipment_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> ShipmentQuery for ShipmentQueryService<R>
where
    R: ShipmentRepository,
{
    async fn get_shipment(&self, request: GetShipmentRequest) -> Result<ShipmentView, Error> {
        let shipment =
            load_owned(self.shipment_repo.as_ref(), &request.shipment_id, &request.owner).await?;
        Ok(view(shipment, self.clock.as_ref()))
    }

    async fn list_shipments(
        &self,
        request: ListShipmentsRequest,
    ) -> Result<ListShipmentsResponse, Error> {
        let ListShipmentsRequest {
            owner,
            params,
            page,
        } = request;
        let selection = ShipmentSelection::build(owner, &params);

        let total = self
            .shipment_repo
            .count(&selection.filter)
            .await
            .map_err(map_repository_error)?;
        let shipments = self
            .shipment_repo
            .list(&selection, page)
            .await
            .map_err(map_repository_error)?;

        Ok(ListShipmentsResponse {
            shipments: shipments
                .into_iter()
                .map(|shipment| view(shipment, self.clock.as_ref()))
                .collect(),
            pagination: PageMeta::new(page, total),
        })
    }

    async fn summarize(&self, owner: &UserId) -> Result<ShipmentSummary, Error> {
        let counts = self
            .shipment_repo
            .count_by_status(owner)
            .await
            .map_err(map_repository_error)?;
        Ok(ShipmentSummary::from_counts(counts))
    }
}

#[cfg(test)]
#[path = "shipment_service_tests.rs"]
mod tests;
