pub mod bookings;
pub mod broadcasts;
pub mod creators;
pub mod drops;
pub mod users;
pub mod vip;

use anyhow::Result;
use chrono::Utc;

/// RFC 3339 timestamp for inserts; a single format keeps TEXT-column
/// ordering consistent with chronological order.
pub(crate) fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// Extension trait for optional query results
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
