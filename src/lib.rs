//! Perdure – a temporal validity and transition algebra for perduring
//! entities: things that persist through time, delimited by discrete,
//! temporally-uncertain events.
//!
//! The vocabulary is small:
//! * A [`datatype::Bound`] approximates when an indivisible event occurred
//!   as a closed-or-unknown `[from, to]` interval.
//! * An [`construct::Event`] is a uniquely identified occurrence carrying
//!   one bound, tagged with a kind that participates in type-level pairing
//!   rules.
//! * An [`construct::Individual`] is an entity whose lifetime is delimited
//!   by exactly two events of matching kinds; a `Birth`-begun individual
//!   can only be `Death`-ended, and a mismatched pairing does not compile.
//! * An [`ownership::Owning`] relates a holder to a held individual for an
//!   interval, and [`assembly::Assembly`] composes individuals into
//!   part-whole structures.
//!
//! Every value is immutable after construction. Change over time is
//! expressed by *supersession*: the transition operations
//! [`ownership::transfer_ownership`] and [`assembly::replace_part`] build a
//! superseded version (the old value, ended at a boundary event) and a
//! successor version (a new value, begun at the same boundary), sharing all
//! unaffected sub-structure by reference. Nothing blocks or performs I/O,
//! so concurrent use needs no coordination beyond an injected
//! [`construct::IdentityGenerator`] for newly minted identities.
//!
//! ## Modules
//! * [`datatype`] – `Timestamp`, `Bound` and `DurationRange` value types.
//! * [`construct`] – Event kinds, events, individuals, activities and
//!   identity generation.
//! * [`chronology`] – The sequential-validity rule and the duration-range
//!   calculator for pairs of causally ordered events.
//! * [`ownership`] – Owning relations and the versioned transfer protocol.
//! * [`assembly`] – Composite structures and structural supersession.
//! * [`error`] – The crate-wide error type.
//!
//! ## Quick Start
//! ```
//! use perdure::construct::{Event, Individual, SerialGenerator, Birth, Death};
//! use perdure::datatype::Bound;
//! use perdure::chronology::duration_range;
//! use chrono::{TimeZone, Utc};
//!
//! let born = Event::<Birth>::with_bound(
//!     "born".into(),
//!     Bound::between(
//!         Utc.with_ymd_and_hms(1948, 2, 4, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(1948, 2, 4, 23, 59, 59).unwrap(),
//!     ).unwrap(),
//! );
//! let died = Event::<Death>::unknown("died".into());
//! let alice = Individual::new("alice".into(), born, died).unwrap();
//! assert!(alice.lifespan().is_none()); // still alive, no finite range
//! ```
//!
//! ## Errors
//! All failures are synchronous, typed and total: a construction or
//! transition either fully succeeds or returns a
//! [`error::PerdureError`] without producing any value. The library never
//! silently corrects inconsistent bounds or orderings.

pub mod assembly;
pub mod chronology;
pub mod construct;
pub mod datatype;
pub mod error;
pub mod ownership;
