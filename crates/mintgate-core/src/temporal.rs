//! # Temporal Types — UTC Timestamps and Sale Windows
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds
//! precision, and `SaleWindow`, the open/close bounds that gate the
//! presale and public-sale paths.
//!
//! ## Security Invariant
//!
//! Sale gating compares instants. Timestamps must be UTC with Z suffix so
//! the same configuration means the same opening instant everywhere; a
//! local-offset timestamp would shift who is allowed to mint. Non-UTC
//! inputs are **rejected at construction** — there is no silent
//! conversion that could introduce ambiguity.
//!
//! ## Phase Derivation
//!
//! A window never stores its phase. [`SaleWindow::phase()`] derives
//! `Upcoming`/`Open`/`Closed` from the clock value the caller supplies,
//! fresh on every call. The opening bound is inclusive and the closing
//! bound exclusive: a sale is open for `opens_at <= now < closes_at`.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::from_epoch_secs()`] — from a Unix timestamp.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

/// Error constructing a timestamp from external input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Only the `Z` suffix is accepted; explicit offsets are rejected
    /// even when semantically UTC.
    #[error("timestamp must use Z suffix (UTC only), got {0:?}")]
    NonUtc(String),

    /// The string is not valid RFC 3339.
    #[error("invalid RFC 3339 timestamp {input:?}: {reason}")]
    Malformed {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Epoch seconds outside the representable range.
    #[error("invalid Unix timestamp: {0}")]
    OutOfRange(i64),
}

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only timestamps with the `Z` suffix are
    /// accepted; `+00:00` is rejected even though it names the same
    /// instant. One spelling per instant keeps window configuration
    /// unambiguous.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339 or uses a
    /// non-Z timezone offset.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        if !s.ends_with('Z') {
            return Err(TimestampError::NonUtc(s.to_string()));
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| TimestampError::Malformed {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, TimestampError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or(TimestampError::OutOfRange(secs))?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// The timestamp `secs` seconds later (or earlier, for negative input).
    ///
    /// Returns `None` if the result is outside the representable range.
    pub fn checked_add_secs(&self, secs: i64) -> Option<Self> {
        self.epoch_secs()
            .checked_add(secs)
            .and_then(|s| Self::from_epoch_secs(s).ok())
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-03-01T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ---------------------------------------------------------------------------
// Sale windows
// ---------------------------------------------------------------------------

/// The phase of a sale window at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalePhase {
    /// Before the opening instant.
    Upcoming,
    /// At or after opening, before the close (if any).
    Open,
    /// At or after the closing instant.
    Closed,
}

/// Error constructing a sale window.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// A window must close strictly after it opens.
    #[error("sale window must close after it opens: opens_at {opens_at}, closes_at {closes_at}")]
    ClosesBeforeOpens {
        /// Configured opening instant.
        opens_at: Timestamp,
        /// Rejected closing instant.
        closes_at: Timestamp,
    },
}

/// The open/close bounds of a sale.
///
/// The opening bound is inclusive, the closing bound exclusive. A window
/// without a close stays open forever once reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaleWindow {
    opens_at: Timestamp,
    closes_at: Option<Timestamp>,
}

impl SaleWindow {
    /// An open-ended window starting at `opens_at`.
    pub fn starting_at(opens_at: Timestamp) -> Self {
        Self {
            opens_at,
            closes_at: None,
        }
    }

    /// A bounded window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ClosesBeforeOpens`] unless
    /// `closes_at > opens_at`.
    pub fn between(opens_at: Timestamp, closes_at: Timestamp) -> Result<Self, WindowError> {
        if closes_at <= opens_at {
            return Err(WindowError::ClosesBeforeOpens { opens_at, closes_at });
        }
        Ok(Self {
            opens_at,
            closes_at: Some(closes_at),
        })
    }

    /// The opening instant (inclusive).
    pub fn opens_at(&self) -> Timestamp {
        self.opens_at
    }

    /// The closing instant (exclusive), if the window is bounded.
    pub fn closes_at(&self) -> Option<Timestamp> {
        self.closes_at
    }

    /// Derive the phase at `now`.
    ///
    /// Recomputed on every call from the supplied clock; nothing is cached.
    pub fn phase(&self, now: Timestamp) -> SalePhase {
        if now < self.opens_at {
            return SalePhase::Upcoming;
        }
        match self.closes_at {
            Some(closes_at) if now >= closes_at => SalePhase::Closed,
            _ => SalePhase::Open,
        }
    }
}

impl<'de> Deserialize<'de> for SaleWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            opens_at: Timestamp,
            #[serde(default)]
            closes_at: Option<Timestamp>,
        }
        let raw = Raw::deserialize(deserializer)?;
        match raw.closes_at {
            Some(closes_at) => {
                SaleWindow::between(raw.opens_at, closes_at).map_err(serde::de::Error::custom)
            }
            None => Ok(SaleWindow::starting_at(raw.opens_at)),
        }
    }
}
