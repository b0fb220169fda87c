//! PostgreSQL-backed `ShipmentRepository` implementation using Diesel ORM.
//!
//! Listing queries are built as boxed statements so the optional search and
//! status predicates can be attached conditionally. Search uses `ILIKE` with
//! the LIKE metacharacters escaped, so client text is matched literally.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{ShipmentRepository, ShipmentRepositoryError};
use crate::domain::{
    DestinationAddress, Shipment, ShipmentFilter, ShipmentId, ShipmentNotes, ShipmentParts,
    ShipmentPatch, ShipmentSelection, ShipmentSortField, ShipmentStatus, SortDirection,
    TrackingNumber, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, violated_unique_constraint};
use super::models::{ShipmentChangeset, ShipmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::shipments;

/// Unique constraint on `shipments.tracking_number`.
pub(crate) const TRACKING_NUMBER_CONSTRAINT: &str = "shipments_tracking_number_key";

/// Diesel-backed implementation of the shipment repository port.
#[derive(Clone)]
pub struct DieselShipmentRepository {
    pool: DbPool,
}

impl DieselShipmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ShipmentRepositoryError {
    map_pool_error(error, ShipmentRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ShipmentRepositoryError {
    map_diesel_error(
        error,
        ShipmentRepositoryError::query,
        ShipmentRepositoryError::connection,
    )
}

/// Like [`map_diesel`], but reports a tracking-number collision as such.
fn map_write(error: diesel::result::Error, tracking_number: &str) -> ShipmentRepositoryError {
    if violated_unique_constraint(&error) == Some(TRACKING_NUMBER_CONSTRAINT) {
        return ShipmentRepositoryError::duplicate_tracking_number(tracking_number);
    }
    map_diesel(error)
}

/// Escape `\`, `%` and `_` so `text` matches literally inside a LIKE pattern.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn row_to_shipment(row: ShipmentRow) -> Result<Shipment, ShipmentRepositoryError> {
    let corrupt = |err: crate::domain::ShipmentValidationError| {
        ShipmentRepositoryError::query(format!("stored shipment {} is invalid: {err}", row.id))
    };
    Ok(Shipment::from(ShipmentParts {
        id: ShipmentId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        tracking_number: TrackingNumber::new(row.tracking_number.clone()).map_err(corrupt)?,
        destination_address: DestinationAddress::new(row.destination_address.clone())
            .map_err(corrupt)?,
        status: row.status.parse::<ShipmentStatus>().map_err(corrupt)?,
        is_fragile: row.is_fragile,
        ship_date: row.ship_date,
        estimated_delivery_date: row.estimated_delivery_date,
        notes: ShipmentNotes::new(row.notes.clone()).map_err(corrupt)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn shipment_to_row(shipment: &Shipment) -> ShipmentRow {
    ShipmentRow {
        id: *shipment.id().as_uuid(),
        user_id: *shipment.owner().as_uuid(),
        tracking_number: shipment.tracking_number().as_ref().to_owned(),
        destination_address: shipment.destination_address().as_ref().to_owned(),
        status: shipment.status().as_str().to_owned(),
        is_fragile: shipment.is_fragile(),
        ship_date: shipment.ship_date(),
        estimated_delivery_date: shipment.estimated_delivery_date(),
        notes: shipment.notes().as_ref().to_owned(),
        created_at: shipment.created_at(),
        updated_at: shipment.updated_at(),
    }
}

fn patch_to_changeset(patch: &ShipmentPatch, updated_at: DateTime<Utc>) -> ShipmentChangeset<'_> {
    ShipmentChangeset {
        tracking_number: patch.tracking_number.as_ref().map(AsRef::as_ref),
        destination_address: patch.destination_address.as_ref().map(AsRef::as_ref),
        status: patch.status.map(ShipmentStatus::as_str),
        is_fragile: patch.is_fragile,
        ship_date: patch.ship_date,
        estimated_delivery_date: patch.estimated_delivery_date,
        notes: patch.notes.as_ref().map(AsRef::as_ref),
        updated_at,
    }
}

/// Attach owner, search and status predicates to a boxed shipments query.
macro_rules! filtered {
    ($query:expr, $filter:expr) => {{
        let filter: &ShipmentFilter = $filter;
        let mut query = $query.filter(shipments::user_id.eq(*filter.owner.as_uuid()));
        if let Some(search) = filter.search.as_deref() {
            let pattern = contains_pattern(search);
            query = query.filter(
                shipments::tracking_number
                    .ilike(pattern.clone())
                    .or(shipments::destination_address.ilike(pattern)),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(shipments::status.eq(status.as_str()));
        }
        query
    }};
}

macro_rules! order_by_column {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Asc => $query.order_by($column.asc()),
            SortDirection::Desc => $query.order_by($column.desc()),
        }
    };
}

#[async_trait]
impl ShipmentRepository for DieselShipmentRepository {
    async fn insert(&self, shipment: &Shipment) -> Result<(), ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = shipment_to_row(shipment);

        diesel::insert_into(shipments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write(err, &row.tracking_number))
    }

    async fn find_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = shipments::table
            .filter(shipments::id.eq(id.as_uuid()))
            .filter(shipments::user_id.eq(owner.as_uuid()))
            .select(ShipmentRow::as_select())
            .first::<ShipmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_shipment).transpose()
    }

    async fn list(
        &self,
        selection: &ShipmentSelection,
        page: PageRequest,
    ) -> Result<Vec<Shipment>, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let query = filtered!(
            shipments::table
                .select(ShipmentRow::as_select())
                .into_boxed(),
            &selection.filter
        );
        let direction = selection.sort.direction;
        let query = match selection.sort.field {
            ShipmentSortField::TrackingNumber => {
                order_by_column!(query, shipments::tracking_number, direction)
            }
            ShipmentSortField::DestinationAddress => {
                order_by_column!(query, shipments::destination_address, direction)
            }
            ShipmentSortField::Status => order_by_column!(query, shipments::status, direction),
            ShipmentSortField::ShipDate => {
                order_by_column!(query, shipments::ship_date, direction)
            }
            ShipmentSortField::EstimatedDeliveryDate => {
                order_by_column!(query, shipments::estimated_delivery_date, direction)
            }
            ShipmentSortField::CreatedAt => {
                order_by_column!(query, shipments::created_at, direction)
            }
        };

        let rows: Vec<ShipmentRow> = query
            .then_order_by(shipments::id.asc())
            .offset(to_i64(page.offset()))
            .limit(to_i64(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_shipment).collect()
    }

    async fn count(&self, filter: &ShipmentFilter) -> Result<u64, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let total: i64 = filtered!(shipments::table.select(count_star()).into_boxed(), filter)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn update_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
        patch: &ShipmentPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let changes = patch_to_changeset(patch, updated_at);

        let row = diesel::update(
            shipments::table
                .filter(shipments::id.eq(id.as_uuid()))
                .filter(shipments::user_id.eq(owner.as_uuid())),
        )
        .set(&changes)
        .returning(ShipmentRow::as_returning())
        .get_result::<ShipmentRow>(&mut conn)
        .await
        .optional()
        .map_err(|err| map_write(err, changes.tracking_number.unwrap_or_default()))?;

        row.map(row_to_shipment).transpose()
    }

    async fn delete_for_owner(
        &self,
        id: &ShipmentId,
        owner: &UserId,
    ) -> Result<bool, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let affected = diesel::delete(
            shipments::table
                .filter(shipments::id.eq(id.as_uuid()))
                .filter(shipments::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(affected > 0)
    }

    async fn count_by_status(
        &self,
        owner: &UserId,
    ) -> Result<Vec<(ShipmentStatus, u64)>, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let groups: Vec<(String, i64)> = shipments::table
            .filter(shipments::user_id.eq(owner.as_uuid()))
            .group_by(shipments::status)
            .select((shipments::status, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        groups
            .into_iter()
            .map(|(status, count)| {
                let status = status.parse::<ShipmentStatus>().map_err(|_| {
                    ShipmentRepositoryError::query(format!("unknown stored status {status}"))
                })?;
                Ok((status, u64::try_from(count).unwrap_or_default()))
            })
            .collect()
    }
}
