//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// One row per counter key (`user`, `admin`, `complaint`).
    sequence_counters (key) {
        key -> Text,
        /// Last value handed out; zero means nothing allocated yet.
        last_value -> Int8,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        /// Sequential identifier, unique (`users_user_id_key`).
        user_id -> Text,
        full_name -> Text,
        /// Lower-cased email, unique (`users_email_key`).
        email -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        phone -> Text,
        location -> Text,
        work -> Text,
        gender -> Text,
        age -> Nullable<Int2>,
        volunteering -> Text,
        volunteering_types -> Array<Text>,
        volunteering_days -> Text,
        role -> Text,
        is_active -> Bool,
        profile_pic -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    complaints (id) {
        id -> Uuid,
        /// Sequential identifier, unique (`complaints_complaint_id_key`).
        complaint_id -> Text,
        title -> Text,
        category -> Array<Text>,
        complaint_type -> Text,
        area_type -> Text,
        description -> Text,
        days -> Int4,
        image -> Nullable<Text>,
        location -> Text,
        latitude -> Nullable<Float8>,
        longitude -> Nullable<Float8>,
        reporter_id -> Nullable<Uuid>,
        status -> Text,
        is_closed -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    feedbacks (id) {
        id -> Uuid,
        user_id -> Text,
        complaint_id -> Nullable<Text>,
        full_name -> Text,
        email -> Text,
        feedback_type -> Text,
        reference_id -> Text,
        rating -> Int2,
        experience_rating -> Int2,
        detailed_feedback -> Text,
        feedback_categories -> Array<Text>,
        attachment_url -> Text,
        experience_date -> Timestamptz,
        location -> Text,
        follow_up -> Bool,
        suggestions -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    contacts (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        phone -> Text,
        subject -> Text,
        message -> Text,
        status -> Text,
        reply_message -> Text,
        replied_at -> Nullable<Timestamptz>,
        user_id -> Nullable<Uuid>,
        assigned_to -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(sequence_counters, users, complaints, feedbacks, contacts);
