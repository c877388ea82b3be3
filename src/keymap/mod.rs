//! Keymap snapshot builder
//!
//! Walks the canonical key table once, resolving every key that exists on
//! the compiled platform under each modifier combination. This runs at
//! startup and on layout change, never per keystroke: it costs up to four
//! native translations per table entry.

use crate::resolve::KeyResolver;
use crate::types::key_table::CANONICAL_KEYS;
use crate::types::{Keymap, KeymapEntry, Modifier};

/// Builds a fresh snapshot of the current layout.
///
/// Keys without a native code on this platform are omitted entirely, not
/// present with empty values. Repeated calls under an unchanged OS layout
/// produce equal snapshots.
pub fn build_keymap<R: KeyResolver>(resolver: &mut R) -> Keymap {
    let mut keymap = Keymap::default();

    resolver.refresh();

    for entry in CANONICAL_KEYS {
        let Some(code) = entry.code else {
            continue;
        };
        let Some(native) = entry.native_code() else {
            continue;
        };

        keymap.insert(
            code,
            KeymapEntry {
                unmodified: resolver.resolve(native, Modifier::Unmodified),
                with_shift: resolver.resolve(native, Modifier::Shift),
                with_alt_graph: resolver.resolve(native, Modifier::AltGraph),
                with_alt_graph_shift: resolver.resolve(native, Modifier::AltGraphShift),
            },
        );
    }

    keymap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::key_table::lookup_code;

    /// Resolver that records the exact query sequence it receives.
    #[derive(Default)]
    struct RecordingResolver {
        queries: Vec<(u32, Modifier)>,
        refreshes: Vec<usize>,
    }

    impl KeyResolver for RecordingResolver {
        fn refresh(&mut self) {
            // Remember how many resolutions had already happened.
            self.refreshes.push(self.queries.len());
        }

        fn layout_name(&mut self) -> String {
            String::new()
        }

        fn language_tag(&mut self) -> String {
            String::new()
        }

        fn resolve(&mut self, native_code: u32, modifier: Modifier) -> Option<String> {
            self.queries.push((native_code, modifier));
            None
        }
    }

    #[test]
    fn queries_each_key_under_all_modifiers_in_order() {
        let mut resolver = RecordingResolver::default();
        let keymap = build_keymap(&mut resolver);

        assert!(!keymap.is_empty());
        assert_eq!(resolver.queries.len() % 4, 0);
        for group in resolver.queries.chunks(4) {
            let native = group[0].0;
            assert!(group.iter().all(|&(code, _)| code == native));
            let modifiers: Vec<Modifier> = group.iter().map(|&(_, m)| m).collect();
            assert_eq!(modifiers, Modifier::ALL);
        }
    }

    #[test]
    fn skips_keys_without_native_code() {
        let mut resolver = RecordingResolver::default();
        let keymap = build_keymap(&mut resolver);

        // "Fn" has no native code on any supported platform.
        assert!(lookup_code("Fn").unwrap().native_code().is_none());
        assert!(!keymap.contains_key("Fn"));

        // Placeholder rows without a canonical id can never appear.
        for (code, _) in keymap.iter() {
            assert!(lookup_code(code).is_some());
        }
    }

    #[test]
    fn refreshes_resolver_state_once_before_any_resolution() {
        let mut resolver = RecordingResolver::default();
        build_keymap(&mut resolver);

        // One refresh per snapshot, and it ran before the first query.
        assert_eq!(resolver.refreshes, vec![0]);
        assert!(!resolver.queries.is_empty());
    }

    #[test]
    fn unresolved_keys_keep_absent_entries() {
        let mut resolver = RecordingResolver::default();
        let keymap = build_keymap(&mut resolver);

        let entry = keymap.get("KeyA").unwrap();
        assert!(entry.is_empty());
    }
}
