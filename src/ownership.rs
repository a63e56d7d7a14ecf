//! Ownership relations and the versioned transfer protocol.
//!
//! An [`Owning`] records that one individual holds another for the interval
//! delimited by a `TransferredFrom`/`TransferredTo` event pair. Ownership is
//! never rewritten in place: [`transfer_ownership`] produces a superseded
//! version (the current relation closed off at the transfer) and a successor
//! version (the new holder, open ended), linked by a
//! [`TransferringOfOwnership`] transaction record anchored to one shared
//! boundary event pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::chronology::ensure_sequential;
use crate::construct::{
    BeginningKind, Event, Identity, IdentityGenerator, Individual, Started, Stopped,
    TransferredFrom, TransferredTo,
};
use crate::error::Result;

// ------------- Owning -------------
/// "Owner holds owned" for the interval bounded by two transfer events.
/// Owner and owned are shared references; the relation does not own them.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct Owning<O: BeginningKind, T: BeginningKind> {
    identifier: Identity,
    actions_description: String,
    owner: Arc<Individual<O>>,
    owned: Arc<Individual<T>>,
    beginning: Event<TransferredFrom>,
    ending: Event<TransferredTo>,
}

impl<O: BeginningKind, T: BeginningKind> Owning<O, T> {
    pub fn new(
        identifier: Identity,
        actions_description: String,
        owner: Arc<Individual<O>>,
        owned: Arc<Individual<T>>,
        beginning: Event<TransferredFrom>,
        ending: Event<TransferredTo>,
    ) -> Result<Self> {
        ensure_sequential(&beginning, &ending)?;
        Ok(Self {
            identifier,
            actions_description,
            owner,
            owned,
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
    pub fn owner(&self) -> &Arc<Individual<O>> {
        &self.owner
    }
    pub fn owned(&self) -> &Arc<Individual<T>> {
        &self.owned
    }
    pub fn beginning(&self) -> &Event<TransferredFrom> {
        &self.beginning
    }
    pub fn ending(&self) -> &Event<TransferredTo> {
        &self.ending
    }
}

impl<O: BeginningKind, T: BeginningKind> fmt::Display for Owning<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} holds {} [{} .. {}]",
            self.identifier,
            self.owner.identifier(),
            self.owned.identifier(),
            self.beginning,
            self.ending
        )
    }
}

// ------------- TransferringOfOwnership -------------
/// A transaction record pairing the superseded ownership with its successor,
/// both anchored to the same `TransferredFrom`/`TransferredTo` event pair.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct TransferringOfOwnership<O: BeginningKind, T: BeginningKind> {
    identifier: Identity,
    actions_description: String,
    from: Owning<O, T>,
    to: Owning<O, T>,
    beginning: Event<TransferredFrom>,
    ending: Event<TransferredTo>,
}

impl<O: BeginningKind, T: BeginningKind> TransferringOfOwnership<O, T> {
    pub fn new(
        identifier: Identity,
        actions_description: String,
        from: Owning<O, T>,
        to: Owning<O, T>,
        beginning: Event<TransferredFrom>,
        ending: Event<TransferredTo>,
    ) -> Result<Self> {
        ensure_sequential(&beginning, &ending)?;
        Ok(Self {
            identifier,
            actions_description,
            from,
            to,
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
    /// The superseded ownership, closed off at the transfer.
    pub fn from(&self) -> &Owning<O, T> {
        &self.from
    }
    /// The successor ownership, open ended.
    pub fn to(&self) -> &Owning<O, T> {
        &self.to
    }
    pub fn beginning(&self) -> &Event<TransferredFrom> {
        &self.beginning
    }
    pub fn ending(&self) -> &Event<TransferredTo> {
        &self.ending
    }
}

/// Transfers `current.owned` to `new_owner` over the activity delimited by
/// `start` and `stop`.
///
/// The superseded ownership keeps its identity, description, owner, owned
/// and beginning, and is ended by a fresh `TransferredTo` event carrying
/// `stop`'s bound. The successor carries the supplied identifier and
/// description, holds the *same* owned individual, begins at a fresh
/// `TransferredFrom` event carrying `start`'s bound and has no known end.
///
/// Fails with an ordering violation when `start`/`stop` are not sequential
/// with the current ownership's beginning or with each other, or when the
/// owned individual's own ending predates `stop`.
pub fn transfer_ownership<O: BeginningKind, T: BeginningKind>(
    generator: &dyn IdentityGenerator,
    identifier: Identity,
    actions_description: &str,
    current: &Owning<O, T>,
    new_owner: Arc<Individual<O>>,
    start: &Event<Started>,
    stop: &Event<Stopped>,
) -> Result<TransferringOfOwnership<O, T>> {
    ensure_sequential(current.beginning(), start)?;
    ensure_sequential(start, stop)?;
    // the owned individual must still be alive when the transfer completes
    ensure_sequential(stop, current.owned().ending())?;

    let transferred_from: Event<TransferredFrom> = start.reclassify(generator.generate());
    let transferred_to: Event<TransferredTo> = stop.reclassify(generator.generate());

    let superseded = Owning::new(
        current.identifier().to_owned(),
        current.actions_description().to_owned(),
        Arc::clone(current.owner()),
        Arc::clone(current.owned()),
        current.beginning().clone(),
        transferred_to.clone(),
    )?;
    let successor = Owning::new(
        identifier,
        actions_description.to_owned(),
        new_owner,
        Arc::clone(current.owned()),
        transferred_from.clone(),
        Event::unknown(generator.generate()),
    )?;

    debug!(
        superseded = %superseded,
        successor = %successor,
        "ownership transferred"
    );

    TransferringOfOwnership::new(
        generator.generate(),
        actions_description.to_owned(),
        superseded,
        successor,
        transferred_from,
        transferred_to,
    )
}
