//! Composite structures and structural supersession.
//!
//! An [`Assembly`] is an individual whose identity is defined by a fixed
//! arrangement of components, each either a leaf [`Part`] or a nested
//! assembly. Replacing a part never mutates the existing tree:
//! [`replace_part`] produces a superseded version of every level on the
//! path to the part, each closed off at the replacement boundary, and a
//! successor version of each level referencing the substituted part, while
//! everything off the path is shared by reference between the two trees.
//! This generalises the ownership-transfer pattern to arbitrarily nested
//! composition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::chronology::ensure_sequential;
use crate::construct::{
    Assembled, Created, Deleted, Disassembled, Event, Identity, IdentityGenerator, Individual,
    Started, Stopped,
};
use crate::error::{PerdureError, Result};

/// A leaf component with its own created/deleted lifetime.
pub type Part = Individual<Created>;

/// One slot of an assembly: a leaf part or a nested sub-assembly.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Component {
    Part(Arc<Part>),
    Assembly(Arc<Assembly>),
}

impl Component {
    pub fn identifier(&self) -> &str {
        match self {
            Component::Part(part) => part.identifier(),
            Component::Assembly(assembly) => assembly.identifier(),
        }
    }
}

// ------------- Assembly -------------
/// A composite individual delimited by assembled/disassembled events.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Assembly {
    identifier: Identity,
    components: Vec<Component>,
    beginning: Event<Assembled>,
    ending: Event<Disassembled>,
}

impl Assembly {
    pub fn new(
        identifier: Identity,
        components: Vec<Component>,
        beginning: Event<Assembled>,
        ending: Event<Disassembled>,
    ) -> Result<Self> {
        ensure_sequential(&beginning, &ending)?;
        Ok(Self {
            identifier,
            components,
            beginning,
            ending,
        })
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn components(&self) -> &[Component] {
        &self.components
    }
    pub fn component(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }
    pub fn beginning(&self) -> &Event<Assembled> {
        &self.beginning
    }
    pub fn ending(&self) -> &Event<Disassembled> {
        &self.ending
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for c in &self.components {
            s += c.identifier();
            s += ",";
        }
        s.pop();
        write!(f, "{} {{{}}} [{} .. {}]", self.identifier, s, self.beginning, self.ending)
    }
}

// ------------- Replacement -------------
/// The audit record returned by [`replace_part`]: both full trees, the
/// closed-off old part and the activity's own boundary events, so callers
/// can see exactly what changed and when.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Replacement {
    identifier: Identity,
    actions_description: String,
    old_root: Arc<Assembly>,
    new_root: Arc<Assembly>,
    old_part: Arc<Part>,
    beginning: Event<Started>,
    ending: Event<Stopped>,
}

impl Replacement {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn actions_description(&self) -> &str {
        &self.actions_description
    }
    /// The superseded tree: every level on the replacement path closed off
    /// at the boundary, everything else shared with the successor tree.
    pub fn old_root(&self) -> &Arc<Assembly> {
        &self.old_root
    }
    /// The successor tree, open ended at every level on the path.
    pub fn new_root(&self) -> &Arc<Assembly> {
        &self.new_root
    }
    /// The replaced part with its lifetime closed at the boundary.
    pub fn old_part(&self) -> &Arc<Part> {
        &self.old_part
    }
    pub fn beginning(&self) -> &Event<Started> {
        &self.beginning
    }
    pub fn ending(&self) -> &Event<Stopped> {
        &self.ending
    }
}

/// Replaces the part at `path` (a chain of component indices from the root)
/// with `new_part` over the activity delimited by `start` and `stop`.
///
/// One `Assembled` event derived from `start` is shared by all successor
/// levels and one `Disassembled` event derived from `stop` by all
/// superseded levels; the replaced part itself is closed by a `Deleted`
/// event carrying `stop`'s bound. Old levels keep their identifiers and
/// beginnings; new levels get fresh identifiers and open endings.
pub fn replace_part(
    generator: &dyn IdentityGenerator,
    identifier: Identity,
    actions_description: &str,
    root: &Arc<Assembly>,
    path: &[usize],
    new_part: Arc<Part>,
    start: &Event<Started>,
    stop: &Event<Stopped>,
) -> Result<Replacement> {
    if path.is_empty() {
        return Err(PerdureError::Structure(String::from(
            "replacement path is empty",
        )));
    }
    ensure_sequential(root.beginning(), start)?;
    ensure_sequential(start, stop)?;

    let assembled: Event<Assembled> = start.reclassify(generator.generate());
    let disassembled: Event<Disassembled> = stop.reclassify(generator.generate());

    let (old_root, new_root, old_part) = rebuild(
        generator,
        root,
        path,
        &new_part,
        &assembled,
        &disassembled,
        stop,
    )?;

    debug!(
        old_root = %old_root,
        new_root = %new_root,
        old_part = old_part.identifier(),
        new_part = new_part.identifier(),
        "part replaced"
    );

    Ok(Replacement {
        identifier,
        actions_description: actions_description.to_owned(),
        old_root,
        new_root,
        old_part,
        beginning: start.clone(),
        ending: stop.clone(),
    })
}

/// Bottom-up reconstruction of one level: returns the superseded and
/// successor versions of `node` plus the closed-off part found at the end
/// of `path`.
fn rebuild(
    generator: &dyn IdentityGenerator,
    node: &Arc<Assembly>,
    path: &[usize],
    new_part: &Arc<Part>,
    assembled: &Event<Assembled>,
    disassembled: &Event<Disassembled>,
    stop: &Event<Stopped>,
) -> Result<(Arc<Assembly>, Arc<Assembly>, Arc<Part>)> {
    let index = path[0];
    let component = node.component(index).ok_or_else(|| {
        PerdureError::Structure(format!(
            "no component at index {} of assembly {}",
            index,
            node.identifier()
        ))
    })?;

    let (old_child, new_child, old_part) = match component {
        Component::Part(part) => {
            if path.len() != 1 {
                return Err(PerdureError::Structure(format!(
                    "path continues past part {}",
                    part.identifier()
                )));
            }
            let deleted: Event<Deleted> = stop.reclassify(generator.generate());
            let closed = Arc::new(part.ended_by(deleted)?);
            (
                Component::Part(Arc::clone(&closed)),
                Component::Part(Arc::clone(new_part)),
                closed,
            )
        }
        Component::Assembly(inner) => {
            if path.len() == 1 {
                return Err(PerdureError::Structure(format!(
                    "path ends at assembly {}, expected a part",
                    inner.identifier()
                )));
            }
            let (old_inner, new_inner, old_part) = rebuild(
                generator,
                inner,
                &path[1..],
                new_part,
                assembled,
                disassembled,
                stop,
            )?;
            (
                Component::Assembly(old_inner),
                Component::Assembly(new_inner),
                old_part,
            )
        }
    };

    // The superseded level keeps its identity and beginning and is closed
    // at the shared disassembly event, referencing the closed child.
    let mut old_components = node.components().to_vec();
    old_components[index] = old_child;
    let old = Assembly::new(
        node.identifier().to_owned(),
        old_components,
        node.beginning().clone(),
        disassembled.clone(),
    )?;

    // The successor level is a fresh individual with an open ending,
    // sharing every component off the path with the superseded version.
    let mut new_components = node.components().to_vec();
    new_components[index] = new_child;
    let new = Assembly::new(
        generator.generate(),
        new_components,
        assembled.clone(),
        Event::unknown(generator.generate()),
    )?;

    Ok((Arc::new(old), Arc::new(new), old_part))
}
