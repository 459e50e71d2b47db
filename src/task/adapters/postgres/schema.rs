//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, soft-deleted rows included.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Trimmed task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Completion flag.
        completed -> Bool,
        /// Soft-deletion flag.
        is_deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Monotonic insertion counter used to break `created_at` ties.
        insertion_seq -> Int8,
    }
}
