//! The duration-range calculus for two causally ordered events.
//!
//! Both operations treat events only through their bounds. The sequential
//! validity rule is deliberately weak: it rejects a pair only when the
//! second event's earliest possible instant is strictly before the first
//! event's earliest possible instant while both are known. Overlapping
//! uncertainty windows are permitted and surface as a negative minimum
//! duration instead of an error.

use tracing::trace;

use crate::construct::{Event, Kind};
use crate::datatype::DurationRange;
use crate::error::{PerdureError, Result};

/// Checks that `second` can stand in a "first, then second" relation to
/// `first`. Equal earliest instants are valid; abutting and simultaneous
/// events are permitted. A missing `from` end on either side always passes,
/// since nothing is known that could contradict the ordering.
pub fn ensure_sequential<F: Kind, S: Kind>(first: &Event<F>, second: &Event<S>) -> Result<()> {
    if let (Some(f), Some(s)) = (first.bound().earliest(), second.bound().earliest()) {
        if s < f {
            trace!(first = %first, second = %second, "sequential check rejected");
            return Err(PerdureError::Ordering(format!(
                "{} cannot begin before {}",
                second, first
            )));
        }
    }
    Ok(())
}

/// The inclusive range of possible elapsed time between `first` and
/// `second`, given that each event's own instant is only known to lie
/// within its bound:
///
/// * `min = second.from - first.to`, which may be negative when the two
///   uncertainty windows overlap,
/// * `max = second.to - first.from`.
///
/// Fails with [`PerdureError::Ordering`] when the pair is not sequential
/// and with [`PerdureError::UnknownBound`] when any of the four bound ends
/// needed for the computation is absent.
pub fn duration_range<F: Kind, S: Kind>(
    first: &Event<F>,
    second: &Event<S>,
) -> Result<DurationRange> {
    ensure_sequential(first, second)?;
    let open = |event: String| PerdureError::UnknownBound(format!("{} has an open end", event));
    let first_from = first
        .bound()
        .earliest()
        .ok_or_else(|| open(first.to_string()))?;
    let first_to = first
        .bound()
        .latest()
        .ok_or_else(|| open(first.to_string()))?;
    let second_from = second
        .bound()
        .earliest()
        .ok_or_else(|| open(second.to_string()))?;
    let second_to = second
        .bound()
        .latest()
        .ok_or_else(|| open(second.to_string()))?;
    Ok(DurationRange::new(
        second_from - first_to,
        second_to - first_from,
    ))
}
