use serde::{Deserialize, Serialize};

// event kinds are carried as phantom type parameters
use std::marker::PhantomData;

// identity generation must be collision-free across threads
use std::sync::atomic::{AtomicU64, Ordering};

// used to print out readable forms of a construct
use std::fmt;

use crate::chronology::{duration_range, ensure_sequential};
use crate::datatype::{Bound, DurationRange, Timestamp};
use crate::error::Result;

// ------------- Identity -------------
pub type Identity = String;

/// A collision-free source of identifiers for newly minted events and
/// relations. Transition operations take a generator explicitly rather than
/// reaching for ambient global state.
pub trait IdentityGenerator: Send + Sync {
    fn generate(&self) -> Identity;
}

/// A monotonic, thread-safe generator producing `prefix-n` identifiers.
/// Callers needing globally unique identifiers can supply a UUID-backed
/// implementation instead.
#[derive(Debug)]
pub struct SerialGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SerialGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdentityGenerator for SerialGenerator {
    fn generate(&self) -> Identity {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

// ------------- EventKind -------------
mod sealed {
    pub trait Sealed {}
}

/// A closed kind tag carried by every event. Kinds distinguish semantically
/// different roles an event can play; they are never compared for ordering,
/// only for construction-time compatibility.
pub trait Kind:
    sealed::Sealed + Copy + Eq + std::hash::Hash + fmt::Debug + Default + Send + Sync + 'static
{
    const KIND: EventKind;
}

/// A kind that may delimit the start of an individual's lifetime. The
/// matching terminal kind is fixed at the type level, so an individual
/// begun by e.g. a [`Birth`] can only be ended by a [`Death`].
pub trait BeginningKind: Kind {
    type Closing: EndingKind;
}

/// A kind that may delimit the end of an individual's lifetime.
pub trait EndingKind: Kind {}

macro_rules! kinds {
    ( $( $kind:ident => $label:literal ),+ $(,)? ) => {
        /// The closed set of event kind tags.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub enum EventKind {
            $( $kind, )+
        }
        impl EventKind {
            pub fn label(&self) -> &'static str {
                match self {
                    $( EventKind::$kind => $label, )+
                }
            }
        }
        impl fmt::Display for EventKind {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }
        $(
            #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
            pub struct $kind;
            impl sealed::Sealed for $kind {}
            impl Kind for $kind {
                const KIND: EventKind = EventKind::$kind;
            }
        )+
    };
}

kinds! {
    Created => "created",
    Deleted => "deleted",
    Built => "built",
    Scrapped => "scrapped",
    Birth => "birth",
    Death => "death",
    Formed => "formed",
    Dissolved => "dissolved",
    Appointed => "appointed",
    Removed => "removed",
    Started => "started",
    Stopped => "stopped",
    TransferredFrom => "transferred-from",
    TransferredTo => "transferred-to",
    Assembled => "assembled",
    Disassembled => "disassembled",
    Aggregated => "aggregated",
    Disaggregated => "disaggregated",
    Resignified => "resignified",
}

macro_rules! closes {
    ( $( $begin:ident / $end:ident ),+ $(,)? ) => {
        $(
            impl BeginningKind for $begin {
                type Closing = $end;
            }
        )+
    };
}
macro_rules! ends {
    ( $( $end:ident ),+ $(,)? ) => {
        $( impl EndingKind for $end {} )+
    };
}

closes! {
    Created / Deleted,
    Built / Scrapped,
    Birth / Death,
    Formed / Dissolved,
    Appointed / Removed,
    Started / Stopped,
    TransferredFrom / TransferredTo,
    Assembled / Disassembled,
    Aggregated / Disaggregated,
    Resignified / Resignified,
}
ends! {
    Deleted,
    Scrapped,
    Death,
    Dissolved,
    Removed,
    Stopped,
    TransferredTo,
    Disassembled,
    Disaggregated,
    Resignified,
}

// ------------- Event -------------
/// A uniquely identified occurrence of kind `K`, carrying one [`Bound`]
/// that approximates when it happened. Immutable once created; events are
/// compared only through their bound.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct Event<K: Kind> {
    identifier: Identity,
    bound: Bound,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K: Kind> Event<K> {
    pub fn new(
        identifier: Identity,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Self> {
        Ok(Self {
            identifier,
            bound: Bound::new(from, to)?,
            kind: PhantomData,
        })
    }
    pub fn with_bound(identifier: Identity, bound: Bound) -> Self {
        Self {
            identifier,
            bound,
            kind: PhantomData,
        }
    }
    /// An event whose instant is entirely unknown, used for lifetimes that
    /// have no known end yet.
    pub fn unknown(identifier: Identity) -> Self {
        Self::with_bound(identifier, Bound::unknown())
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn bound(&self) -> Bound {
        self.bound
    }
    pub fn kind(&self) -> EventKind {
        K::KIND
    }
    /// Derives an event of another kind anchored to this event's bound.
    /// The bound is copied unchanged; the new event gets its own identity.
    pub fn reclassify<L: Kind>(&self, identifier: Identity) -> Event<L> {
        Event {
            identifier,
            bound: self.bound,
            kind: PhantomData,
        }
    }
}

impl<K: Kind> fmt::Display for Event<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({}) {}", K::KIND, self.identifier, self.bound)
    }
}

// ------------- Individual -------------
/// An entity that persists through time, delimited by exactly two events:
/// a beginning of kind `B` and an ending of `B`'s closing kind.
///
/// An individual is never mutated in place. Ending one early is modelled by
/// constructing a new value with a changed ending ([`Individual::ended_by`]);
/// the transition operations in [`crate::ownership`] and [`crate::assembly`]
/// do exactly that.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct Individual<B: BeginningKind> {
    identifier: Identity,
    beginning: Event<B>,
    ending: Event<B::Closing>,
}

impl<B: BeginningKind> Individual<B> {
    pub fn new(identifier: Identity, beginning: Event<B>, ending: Event<B::Closing>) -> Result<Self> {
        ensure_sequential(&beginning, &ending)?;
        Ok(Self {
            identifier,
            beginning,
            ending,
        })
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn beginning(&self) -> &Event<B> {
        &self.beginning
    }
    pub fn ending(&self) -> &Event<B::Closing> {
        &self.ending
    }
    /// A new individual value identical to this one except for its ending.
    pub fn ended_by(&self, ending: Event<B::Closing>) -> Result<Self> {
        Self::new(self.identifier.clone(), self.beginning.clone(), ending)
    }
    /// The range of possible lifetimes, when both boundary events have
    /// fully known bounds.
    pub fn lifespan(&self) -> Option<DurationRange> {
        duration_range(&self.beginning, &self.ending).ok()
    }
}

impl<B: BeginningKind> fmt::Display for Individual<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{} .. {}]", self.identifier, self.beginning, self.ending)
    }
}

// ------------- Activity -------------
/// An individual that describes what happened during its lifetime, such as
/// a meal, a journey or a transfer of ownership being carried out.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct Activity<B: BeginningKind> {
    identifier: Identity,
    actions_description: String,
    beginning: Event<B>,
    ending: Event<B::Closing>,
}

impl<B: BeginningKind> Activity<B> {
    pub fn new(
        identifier: Identity,
        actions_description: String,
        beginning: Event<B>,
        ending: Event<B::Closing>,
    ) -> Result<Self> {
        ensure_sequential(&beginning, &ending)?;
        Ok(Self {
            identifier,
            actions_description,
            beginning,
            ending,
        })
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn actions_description(&self) -> &str {
        &self.actions_description
    }
    pub fn beginning(&self) -> &Event<B> {
        &self.beginning
    }
    pub fn ending(&self) -> &Event<B::Closing> {
        &self.ending
    }
    pub fn lifespan(&self) -> Option<DurationRange> {
        duration_range(&self.beginning, &self.ending).ok()
    }
}
