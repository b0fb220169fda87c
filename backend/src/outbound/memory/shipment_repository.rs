//! Mutex-guarded `ShipmentRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::ports::{ShipmentRepository, ShipmentRepositoryError};
use crate::domain::{
    Shipment, ShipmentFilter, ShipmentId, ShipmentPatch, ShipmentSelection, ShipmentStatus,
    UserId,
};

/// In-memory shipment store keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryShipmentRepository {
    shipments: Mutex<HashMap<ShipmentId, Shipment>>,
}

impl InMemoryShipmentRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ShipmentId, Shipment>>, ShipmentRepositoryError> {
        self.shipments
            .lock()
            .map_err(|_| ShipmentRepositoryError::connection("shipment store poisoned"))
    }
}

fn tracking_number_taken(
    shipments: &HashMap<ShipmentId, Shipment>,
    candidate: &Shipment,
) -> bool {
    shipments.values().any(|existing| {
        existing.id() != candidate.id() && existing.tracking_number() == candidate.tracking_number()
    })
}

fn duplicate(shipment: &Shipment) -> ShipmentRepositoryError {
    ShipmentRepositoryError::duplicate_tracking_number(shipment.tracking_number().as_ref())
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn insert(&self, shipment: &Shipment) -> Result<(), ShipmentRepositoryError> {
        let mut shipments = self.lock()?;
        if shipments.contains_key(&shipment.id()) {
            return Err(ShipmentRepositoryError::query(format!(
                "shipment {} already exists",
                shipment.id()
            )));
        }
        if tracking_number_taken(&shipments, shipment) {
            return Err(duplicate(shipment));
        }
        shipments.insert(shipment.id(), shipment.clone());
        Ok(())
    }

    async fn find_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        let shipments = self.lock()?;
        Ok(shipments
            .get(id)
            .filter(|shipment| shipment.owner() == owner)
            .cloned())
    }

    async fn list(
        &self,
        selection: &ShipmentSelection,
        page: PageRequest,
    ) -> Result<Vec<Shipment>, ShipmentRepositoryError> {
        let shipments = self.lock()?;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(selection
            .apply(shipments.values())
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ShipmentFilter) -> Result<u64, ShipmentRepositoryError> {
        let shipments = self.lock()?;
        let matching = shipments
            .values()
            .filter(|shipment| filter.matches(shipment))
            .count();
        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }

    async fn update_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
        patch: &ShipmentPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        // The merge happens under the lock so no other writer sees a stale copy.
        let mut shipments = self.lock()?;
        let Some(mut merged) = shipments
            .get(id)
            .filter(|existing| existing.owner() == owner)
            .cloned()
        else {
            return Ok(None);
        };
        merged.apply(patch.clone(), updated_at);
        if tracking_number_taken(&shipments, &merged) {
            return Err(duplicate(&merged));
        }
        shipments.insert(merged.id(), merged.clone());
        Ok(Some(merged))
    }

    async fn delete_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
    ) -> Result<bool, ShipmentRepositoryError> {
        let mut shipments = self.lock()?;
        let owned = shipments
            .get(id)
            .is_some_and(|existing| existing.owner() == owner);
        if owned {
            shipments.remove(id);
        }
        Ok(owned)
    }

    async fn count_by_status(
        &self,
        owner: &UserId,
    ) -> Result<Vec<(ShipmentStatus, u64)>, ShipmentRepositoryError> {
        let shipments = self.lock()?;
        let mut counts: HashMap<ShipmentStatus, u64> = HashMap::new();
        for shipment in shipments.values().filter(|s| s.owner() == owner) {
            *counts.entry(shipment.status()).or_default() += 1;
        }
        Ok(ShipmentStatus::ALL
            .iter()
            .filter_map(|status| counts.get(status).map(|count| (*status, *count)))
            .collect())
    }
}

#[cfg(test)]
#[path = "shipment_repository_tests.rs"]
mod tests;
