//! Keyboard layout resolution
//!
//! Resolves, for the physical keyboard attached to the host, the character
//! each key produces under each modifier combination, and keeps that
//! resolution current as the user switches OS keyboard layouts. Keys are
//! identified by platform-independent canonical names ("KeyA", "Digit1")
//! backed by per-platform native codes.
//!
//! Typical use: call [`KeyboardLayout::init`] once at startup, build a
//! snapshot with [`KeyboardLayout::populate_current_keymap`], subscribe to
//! layout changes, and rebuild the snapshot when notified.

pub mod error;
pub mod keymap;
pub mod notify;
mod platform;
pub mod resolve;
pub mod types;

pub use error::{Error, Result};
pub use keymap::build_keymap;
pub use resolve::KeyResolver;
pub use types::key_table;
pub use types::{Keymap, KeymapEntry, LayoutIdentity, Modifier};

use platform::NativeResolver;

/// Handle to the host's keyboard layout state.
///
/// Owns the platform backend exclusively; the underlying OS handles are
/// never exposed. Initialize once, early, on the consumer's main thread.
pub struct KeyboardLayout {
    resolver: NativeResolver,
}

impl KeyboardLayout {
    /// Acquires the platform keyboard state and starts layout-change
    /// delivery where the OS supports it.
    ///
    /// Fails only when the platform handle cannot be opened (e.g. no X
    /// display); the consumer should then treat layout resolution as
    /// unavailable for the session rather than abort.
    pub fn init() -> Result<Self> {
        let resolver = NativeResolver::new()?;
        platform::register_layout_observer();
        Ok(Self { resolver })
    }

    /// OS-specific identifier of the current layout, re-read from the OS on
    /// every call. Empty when unavailable, never an error.
    pub fn current_layout(&mut self) -> String {
        self.resolver.layout_name()
    }

    /// Language tag of the current layout, re-read from the OS on every
    /// call. Empty when the platform has none (X11), never an error.
    pub fn current_language(&mut self) -> String {
        self.resolver.language_tag()
    }

    /// Both layout identifiers in one query.
    pub fn layout_identity(&mut self) -> LayoutIdentity {
        LayoutIdentity {
            layout: self.current_layout(),
            language: self.current_language(),
        }
    }

    /// Builds a fresh [`Keymap`] snapshot of the current layout, replacing
    /// whatever snapshot the consumer held before.
    ///
    /// Costs up to four native translations per canonical key; call it at
    /// startup and on layout change, not per keystroke.
    pub fn populate_current_keymap(&mut self) -> Keymap {
        keymap::build_keymap(&mut self.resolver)
    }

    /// Registers a layout-change listener invoked with
    /// `(language_tag, layout_name)`.
    ///
    /// Listeners fire in registration order, on the OS notification thread,
    /// for the rest of the process. On Linux/X11 no push notification
    /// exists; registered listeners simply never fire and the consumer must
    /// re-query.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        notify::registry().subscribe(listener);
    }
}
