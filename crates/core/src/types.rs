/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Stand identifiers are small configured integers (1..=N).
pub type StandId = i16;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
