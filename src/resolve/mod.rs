//! Platform key resolver seam
//!
//! Each target OS provides one [`KeyResolver`] implementation, selected at
//! compile time. The snapshot builder and the tests depend only on this
//! trait.

use crate::types::Modifier;

/// Per-platform keyboard state queries.
///
/// Implementations own their platform handles exclusively and never expose
/// them. All operations are synchronous, bounded-latency OS calls; none of
/// them fail once the resolver exists.
pub trait KeyResolver {
    /// Re-reads any keyboard state the resolver caches across [`resolve`]
    /// calls. The snapshot builder calls this once per snapshot so a whole
    /// batch of resolutions shares one state read.
    ///
    /// [`resolve`]: KeyResolver::resolve
    fn refresh(&mut self) {}

    /// OS-specific human-readable layout identifier, or `""` if unavailable.
    fn layout_name(&mut self) -> String;

    /// BCP-47-ish language tag for the current layout, or `""` when the
    /// platform has none.
    fn language_tag(&mut self) -> String;

    /// The character(s) a simple press of `native_code` produces under
    /// `modifier`, or `None` for keys that yield no printable character.
    fn resolve(&mut self, native_code: u32, modifier: Modifier) -> Option<String>;
}

/// Outcome of one native translation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Translation {
    /// The key produced text.
    Text(String),
    /// The key started a combining sequence; translating again with the
    /// retained dead-key state yields the final character.
    DeadKey,
    /// The key produces nothing under this modifier combination.
    NoCharacter,
}

/// Drives a translation to a final character, retrying once on a pending
/// dead key.
///
/// A single retry converges on all known layouts, so no cycle limit is
/// needed: a second `DeadKey` outcome resolves to `None`. Control characters
/// are rejected at both steps.
pub(crate) fn translate_with_dead_key_retry<F>(mut translate: F) -> Option<String>
where
    F: FnMut() -> Translation,
{
    match translate() {
        Translation::Text(text) => printable(text),
        Translation::DeadKey => match translate() {
            Translation::Text(text) => printable(text),
            Translation::DeadKey | Translation::NoCharacter => None,
        },
        Translation::NoCharacter => None,
    }
}

/// Accepts text only when it starts with a printable character.
pub(crate) fn printable(text: String) -> Option<String> {
    match text.chars().next() {
        Some(first) if !first.is_control() => Some(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let result = translate_with_dead_key_retry(|| Translation::Text("a".to_string()));
        assert_eq!(result, Some("a".to_string()));
    }

    #[test]
    fn no_character_resolves_to_none() {
        assert_eq!(
            translate_with_dead_key_retry(|| Translation::NoCharacter),
            None
        );
    }

    #[test]
    fn dead_key_then_text_yields_combined_character() {
        // Circumflex dead key followed by a base letter.
        let mut outcomes = vec![
            Translation::Text("\u{00ea}".to_string()),
            Translation::DeadKey,
        ];
        let result = translate_with_dead_key_retry(|| outcomes.pop().unwrap());
        assert_eq!(result, Some("\u{00ea}".to_string()));
        assert!(outcomes.is_empty(), "both translation steps must run");
    }

    #[test]
    fn dead_key_retries_exactly_once() {
        let mut calls = 0;
        let result = translate_with_dead_key_retry(|| {
            calls += 1;
            Translation::DeadKey
        });
        assert_eq!(result, None);
        assert_eq!(calls, 2);
    }

    #[test]
    fn control_characters_are_rejected() {
        let result = translate_with_dead_key_retry(|| Translation::Text("\u{8}".to_string()));
        assert_eq!(result, None);

        let mut outcomes = vec![Translation::Text("\u{1b}".to_string()), Translation::DeadKey];
        let retried = translate_with_dead_key_retry(|| outcomes.pop().unwrap());
        assert_eq!(retried, None);
    }

    #[test]
    fn empty_translation_is_absent_not_empty() {
        let result = translate_with_dead_key_retry(|| Translation::Text(String::new()));
        assert_eq!(result, None);
    }
}
