//! Row structs private to the Diesel adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{shipments, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Full shipment row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shipments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShipmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tracking_number: String,
    pub destination_address: String,
    pub status: String,
    pub is_fragile: bool,
    pub ship_date: DateTime<Utc>,
    pub estimated_delivery_date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable shipment columns. Identity, owner and creation time are fixed.
///
/// `None` fields are left out of the generated `SET` clause, so only the
/// columns a patch names are written.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = shipments)]
pub(crate) struct ShipmentChangeset<'a> {
    pub tracking_number: Option<&'a str>,
    pub destination_address: Option<&'a str>,
    pub status: Option<&'a str>,
    pub is_fragile: Option<bool>,
    pub ship_date: Option<DateTime<Utc>>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
