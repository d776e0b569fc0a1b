//! Contextual metadata owned by a piece of tab content
//!
//! A [`ContentItem`] is the title and the leading/trailing bar buttons a tab
//! wants shown while it is active. Every setter that actually changes a
//! value notifies the live observers once, synchronously, before returning.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::{Arc, Weak};

use crate::button::BarButton;
use crate::observer::Registration;

/// A consistent copy of everything a [`ContentItem`] publishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub title: Option<String>,
    pub leading: Vec<BarButton>,
    pub trailing: Vec<BarButton>,
}

#[derive(Default)]
pub struct ContentItem {
    state: RwLock<ItemSnapshot>,
    /// Observers are held weakly; dead entries are pruned on each notify
    registrations: Mutex<Vec<Weak<Registration>>>,
}

impl ContentItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(ItemSnapshot {
                title: Some(title.into()),
                ..ItemSnapshot::default()
            }),
            registrations: Mutex::new(Vec::new()),
        }
    }

    pub fn title(&self) -> Option<String> {
        self.state.read().title.clone()
    }

    pub fn leading_buttons(&self) -> Vec<BarButton> {
        self.state.read().leading.clone()
    }

    pub fn trailing_buttons(&self) -> Vec<BarButton> {
        self.state.read().trailing.clone()
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        self.state.read().clone()
    }

    /// Set the title. Observers are notified only if it differs.
    pub fn set_title(&self, title: Option<String>) {
        let changed = {
            let mut state = self.state.write();
            if state.title == title {
                false
            } else {
                state.title = title;
                true
            }
        };

        if changed {
            self.notify();
        }
    }

    /// Replace the leading button group.
    pub fn set_leading_buttons(&self, buttons: Vec<BarButton>) {
        let changed = {
            let mut state = self.state.write();
            if state.leading == buttons {
                false
            } else {
                state.leading = buttons;
                true
            }
        };

        if changed {
            self.notify();
        }
    }

    /// Replace the trailing button group.
    pub fn set_trailing_buttons(&self, buttons: Vec<BarButton>) {
        let changed = {
            let mut state = self.state.write();
            if state.trailing == buttons {
                false
            } else {
                state.trailing = buttons;
                true
            }
        };

        if changed {
            self.notify();
        }
    }

    /// Number of observers that are still registered and not disposed
    pub fn observer_count(&self) -> usize {
        self.registrations
            .lock()
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|registration| !registration.is_disposed())
            .count()
    }

    pub(crate) fn register(&self, registration: &Arc<Registration>) {
        self.registrations.lock().push(Arc::downgrade(registration));
    }

    pub(crate) fn unregister(&self, registration: &Registration) {
        self.registrations
            .lock()
            .retain(|entry| !std::ptr::eq(entry.as_ptr(), registration));
    }

    fn notify(&self) {
        // Snapshot the live set, then fire with no lock held so callbacks
        // may read the item, add observers or dispose them.
        let live: Vec<Arc<Registration>> = {
            let mut registrations = self.registrations.lock();
            registrations.retain(|entry| entry.strong_count() > 0);
            registrations.iter().filter_map(Weak::upgrade).collect()
        };

        tracing::trace!(observers = live.len(), "Content item changed");

        for registration in live {
            registration.fire();
        }
    }
}

impl fmt::Debug for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentItem")
            .field("state", &*self.state.read())
            .field("observers", &self.observer_count())
            .finish()
    }
}
