use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::errors::{Error, Result};

/// Default timezone for view dates.
/// A day boundary must be stable across restarts, so the server never
/// falls back to the host's local zone.
pub const DEFAULT_VIEW_TZ: Tz = chrono_tz::UTC;

/// Source of "now" for services that stamp or bucket by time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Converts a UTC instant to the calendar day it falls on in `tz`.
///
/// This is the single source of truth for normalizing instants to view days.
/// Both recording a view and projecting stats go through here.
pub fn view_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Parses an IANA timezone name such as `Asia/Seoul`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::InvalidConfigValue(format!("unknown timezone '{}'", name)))
}
