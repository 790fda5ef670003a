//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Enumerations are
//! stored as checked `TEXT` columns and parsed at the adapter boundary.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Normalised login email; unique.
        email -> Text,
        /// PHC-format password hash.
        password_hash -> Text,
        /// `employee` or `moderator`.
        role -> Text,
    }
}

diesel::table! {
    /// Pickup points.
    pvz (id) {
        id -> Uuid,
        /// One of the supported city names.
        city -> Text,
        registration_date -> Timestamptz,
    }
}

diesel::table! {
    /// Receptions; at most one per pickup point has `status = 'in_progress'`.
    receptions (id) {
        id -> Uuid,
        date_time -> Timestamptz,
        pvz_id -> Uuid,
        /// `in_progress` or `close`.
        status -> Text,
    }
}

diesel::table! {
    /// Products recorded against a reception.
    products (id) {
        id -> Uuid,
        /// Database-assigned insertion order; never written by the adapter.
        seq -> Int8,
        date_time -> Timestamptz,
        product_type -> Text,
        reception_id -> Uuid,
    }
}

diesel::joinable!(receptions -> pvz (pvz_id));
diesel::joinable!(products -> receptions (reception_id));

diesel::allow_tables_to_appear_in_same_query!(users, pvz, receptions, products);
