//! Shared data model for keymap resolution

pub mod key_table;

use std::collections::HashMap;

/// Modifier combination applied to a physical key press.
///
/// The set is fixed and ordered; [`Modifier::ALL`] is the canonical query
/// order used when building a keymap. AltGraph is the "third tier" modifier:
/// Mod5 on X11, Option on macOS, and Ctrl+Alt on Windows where no dedicated
/// AltGr modifier exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Unmodified,
    Shift,
    AltGraph,
    AltGraphShift,
}

impl Modifier {
    /// All modifier combinations, in the fixed resolution order.
    pub const ALL: [Modifier; 4] = [
        Modifier::Unmodified,
        Modifier::Shift,
        Modifier::AltGraph,
        Modifier::AltGraphShift,
    ];

    pub fn shift(self) -> bool {
        matches!(self, Modifier::Shift | Modifier::AltGraphShift)
    }

    pub fn alt_graph(self) -> bool {
        matches!(self, Modifier::AltGraph | Modifier::AltGraphShift)
    }
}

/// Characters one physical key produces under each modifier combination.
///
/// `None` means the combination produces no printable character on the
/// current layout. The empty string is never stored; a key with no output is
/// absent, not empty, so consumers can rely on `Some` implying at least one
/// character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeymapEntry {
    pub unmodified: Option<String>,
    pub with_shift: Option<String>,
    pub with_alt_graph: Option<String>,
    pub with_alt_graph_shift: Option<String>,
}

impl KeymapEntry {
    /// The character produced under the given modifier combination.
    pub fn character(&self, modifier: Modifier) -> Option<&str> {
        let field = match modifier {
            Modifier::Unmodified => &self.unmodified,
            Modifier::Shift => &self.with_shift,
            Modifier::AltGraph => &self.with_alt_graph,
            Modifier::AltGraphShift => &self.with_alt_graph_shift,
        };
        field.as_deref()
    }

    /// True if no modifier combination produces a character.
    pub fn is_empty(&self) -> bool {
        Modifier::ALL.iter().all(|&m| self.character(m).is_none())
    }
}

/// One complete resolution of the canonical key table against the current
/// OS layout, keyed by canonical key identifier.
///
/// Immutable once returned by the builder; a superseded snapshot is simply
/// discarded by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keymap {
    entries: HashMap<&'static str, KeymapEntry>,
}

impl Keymap {
    pub(crate) fn insert(&mut self, code: &'static str, entry: KeymapEntry) {
        self.entries.insert(code, entry);
    }

    pub fn get(&self, code: &str) -> Option<&KeymapEntry> {
        self.entries.get(code)
    }

    pub fn contains_key(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &KeymapEntry)> {
        self.entries.iter().map(|(&code, entry)| (code, entry))
    }
}

/// The OS's current keyboard layout, re-read on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutIdentity {
    /// OS-specific layout identifier (XKB layout/variant/group, macOS input
    /// source ID, or Windows keyboard layout name).
    pub layout: String,
    /// BCP-47-ish language tag; empty when the platform has none (X11).
    pub language: String,
}
