//! Microsecond-resolution message timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in time a message was sent, in microseconds since the Unix epoch.
///
/// The backend reports message times with microsecond resolution, which is
/// also the resolution quotes carry. Keeping the raw integer avoids lossy
/// round trips through floating-point seconds.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::Timestamp;
///
/// let ts = Timestamp::from_micros(1_700_000_000_123_456);
/// let datetime = ts.to_datetime().expect("in range");
/// assert_eq!(Timestamp::from_datetime(datetime), ts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from microseconds since the Unix epoch.
    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Creates a timestamp from a UTC date-time, truncating to microseconds.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp_micros())
    }

    /// Returns microseconds since the Unix epoch.
    #[must_use]
    pub const fn as_micros(self) -> i64 {
        self.0
    }

    /// Converts to a UTC date-time, or `None` when out of `chrono`'s range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
