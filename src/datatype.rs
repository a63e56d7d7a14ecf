// used for timestamps and signed durations
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// used to print out readable forms of a data type
use std::fmt;

use crate::error::{PerdureError, Result};

/// The instant type used for all bound ends.
pub type Timestamp = DateTime<Utc>;

/// A closed-or-unknown interval approximating the point in time at which an
/// indivisible event occurred: the event happened no earlier than `from` and
/// no later than `to`. An absent end means that side is unconstrained.
///
/// Invariant: when both ends are present, `from <= to`. Equal ends are a
/// maximally precise instant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Bound {
    from: Option<Timestamp>,
    to: Option<Timestamp>,
}

impl Bound {
    pub fn new(from: Option<Timestamp>, to: Option<Timestamp>) -> Result<Self> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(PerdureError::InvalidBound(format!(
                    "from {} is later than to {}",
                    f, t
                )));
            }
        }
        Ok(Self { from, to })
    }
    /// A bound with both ends unconstrained, used for lifetimes that have
    /// not ended yet.
    pub fn unknown() -> Self {
        Self {
            from: None,
            to: None,
        }
    }
    /// A maximally precise bound where the event instant is known exactly.
    pub fn at(instant: Timestamp) -> Self {
        Self {
            from: Some(instant),
            to: Some(instant),
        }
    }
    pub fn between(from: Timestamp, to: Timestamp) -> Result<Self> {
        Self::new(Some(from), Some(to))
    }
    pub fn earliest(&self) -> Option<Timestamp> {
        self.from
    }
    pub fn latest(&self) -> Option<Timestamp> {
        self.to
    }
    pub fn is_unknown(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let render = |end: &Option<Timestamp>| match end {
            Some(t) => t.to_rfc3339(),
            None => String::from("*"),
        };
        write!(f, "[{}, {}]", render(&self.from), render(&self.to))
    }
}

/// The inclusive range of possible elapsed time between two causally ordered
/// but individually uncertain events. A negative `min` signals that the two
/// uncertainty windows could have overlapped; it is not an error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DurationRange {
    min: Duration,
    max: Duration,
}

impl DurationRange {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }
    pub fn min(&self) -> Duration {
        self.min
    }
    pub fn max(&self) -> Duration {
        self.max
    }
}

impl fmt::Display for DurationRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}
