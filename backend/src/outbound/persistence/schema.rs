//! Diesel table definitions. Keep in step with `backend/migrations`.

diesel::table! {
    /// Registered coordinators.
    users (id) {
        id -> Uuid,
        /// Unique, 3 to 50 characters.
        username -> Varchar,
        /// Unique, stored lowercased.
        email -> Varchar,
        display_name -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shipments, each owned by one user.
    shipments (id) {
        id -> Uuid,
        user_id -> Uuid,
        /// Globally unique across owners.
        tracking_number -> Varchar,
        destination_address -> Text,
        /// One of the `ShipmentStatus` wire values, enforced by a CHECK.
        status -> Varchar,
        is_fragile -> Bool,
        ship_date -> Timestamptz,
        estimated_delivery_date -> Timestamptz,
        notes -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(shipments -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(shipments, users);
