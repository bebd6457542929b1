/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Flat runtime variable map supplied to a render request.
pub type Variables = serde_json::Map<String, serde_json::Value>;
