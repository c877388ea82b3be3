//! Layout change notification
//!
//! The OS delivers layout-change notifications on a thread of its own
//! choosing, so the listener registry is the one structure in this crate
//! shared across threads. Registration is expected during initialization;
//! delivery snapshots the list under the lock and invokes listeners outside
//! it, in registration order.

use std::sync::{Arc, Mutex};

use log::warn;
use once_cell::sync::Lazy;

type Listener = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Ordered collection of layout-change listeners.
///
/// Listeners live for the rest of the process once registered; there is no
/// individual removal, teardown is whole-process.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Mutex<Vec<Listener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener invoked with `(language_tag, layout_name)` on
    /// every layout change.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.lock().push(Arc::new(listener));
    }

    /// Invokes every listener in registration order.
    ///
    /// Called from the OS notification thread with freshly re-derived layout
    /// values; the lock is released before the first callback runs so a slow
    /// listener cannot block registration.
    pub fn notify(&self, language: &str, layout: &str) {
        let listeners: Vec<Listener> = self.lock().clone();
        for listener in listeners {
            listener(language, layout);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Listener>> {
        match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("listener registry mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

static REGISTRY: Lazy<ListenerRegistry> = Lazy::new(ListenerRegistry::new);

/// The process-wide registry the OS notification handlers dispatch into.
pub fn registry() -> &'static ListenerRegistry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_fire_in_registration_order() {
        let registry = ListenerRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.subscribe(move |_, _| order.lock().unwrap().push(tag));
        }

        registry.notify("en", "us");
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn listeners_receive_language_and_layout() {
        let registry = ListenerRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        registry.subscribe(move |language, layout| {
            sink.lock()
                .unwrap()
                .push((language.to_string(), layout.to_string()));
        });

        registry.notify("de", "de,nodeadkeys[0]");
        registry.notify("fr", "fr[0]");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("de".to_string(), "de,nodeadkeys[0]".to_string()));
        assert_eq!(seen[1], ("fr".to_string(), "fr[0]".to_string()));
    }

    #[test]
    fn notify_without_listeners_is_a_no_op() {
        let registry = ListenerRegistry::new();
        assert!(registry.is_empty());
        registry.notify("en", "us");
    }

    #[test]
    fn listeners_are_never_removed() {
        let registry = ListenerRegistry::new();
        registry.subscribe(|_, _| {});
        registry.subscribe(|_, _| {});
        registry.notify("en", "us");
        assert_eq!(registry.len(), 2);
    }
}
