//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lowercased.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named roles. `name` is unique.
    roles (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Communities. `slug` is unique and `owner_id` references `users`.
    communities (id) {
        id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Memberships. `(user_id, community_id)` is unique.
    members (id) {
        id -> Uuid,
        user_id -> Uuid,
        community_id -> Uuid,
        role_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(communities -> users (owner_id));
diesel::joinable!(members -> communities (community_id));
diesel::joinable!(members -> roles (role_id));
diesel::joinable!(members -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(communities, members, roles, users);
