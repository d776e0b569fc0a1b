//! Tab Collection Model
//!
//! Owns the ordered tabs and the active-tab pointer. Mutations happen under
//! the state lock; the notifications they raise are queued and delivered to
//! the delegate after the lock is released. A delegate that mutates the
//! model from inside a callback gets its change applied immediately, while
//! the resulting notifications join the queue drained by the outermost
//! operation, so the delegate always sees them in order and every outermost
//! operation returns only after its queue is empty.

use parking_lot::{Mutex, RwLock};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use tabview_item::ContentItemObserver;

use crate::error::TabError;
use crate::event::{StructureChange, TabModelDelegate};
use crate::tab::{Tab, TabId};
use crate::Result;

/// Most notifications one outermost operation will deliver. A delegate that
/// keeps mutating the model past this point is cut off.
pub const MAX_CASCADE: usize = 64;

#[derive(Debug, Clone)]
enum ModelEvent {
    TabsChanged(StructureChange, u64),
    ActiveTabChanged(Option<Tab>),
    ActiveContentChanged,
}

#[derive(Default)]
struct ModelState {
    tabs: Vec<Tab>,
    active: Option<Tab>,
    /// Bumped on every structural change
    revision: u64,
}

impl ModelState {
    fn index_of(&self, tab: &Tab) -> Option<usize> {
        self.tabs.iter().position(|candidate| candidate == tab)
    }
}

#[derive(Default)]
struct Dispatch {
    queue: VecDeque<ModelEvent>,
    draining: bool,
    /// Active tab named by the last delivered active-tab notification.
    /// `None` when unknown, so the next one is always delivered.
    delivered_active: Option<Option<TabId>>,
}

struct ModelInner {
    state: RwLock<ModelState>,
    dispatch: Mutex<Dispatch>,
    delegate: RwLock<Option<Weak<dyn TabModelDelegate>>>,
    /// Follows the active tab's content item
    observer: Mutex<Option<ContentItemObserver>>,
    torn_down: AtomicBool,
}

/// Shared handle to a tab collection; clones refer to the same model.
#[derive(Clone)]
pub struct TabCollectionModel {
    inner: Arc<ModelInner>,
}

impl TabCollectionModel {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ModelInner {
                state: RwLock::new(ModelState::default()),
                dispatch: Mutex::new(Dispatch::default()),
                delegate: RwLock::new(None),
                observer: Mutex::new(None),
                torn_down: AtomicBool::new(false),
            }),
        }
    }

    /// Set the delegate. The model does not keep it alive.
    pub fn set_delegate<D>(&self, delegate: &Arc<D>)
    where
        D: TabModelDelegate + 'static,
    {
        let weak: Weak<D> = Arc::downgrade(delegate);
        let weak: Weak<dyn TabModelDelegate> = weak;
        *self.inner.delegate.write() = Some(weak);
    }

    pub fn clear_delegate(&self) {
        *self.inner.delegate.write() = None;
    }

    // === Queries ===

    pub fn tabs(&self) -> Vec<Tab> {
        self.inner.state.read().tabs.clone()
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.inner.state.read().active.clone()
    }

    pub fn active_index(&self) -> Option<usize> {
        let state = self.inner.state.read();
        state.active.as_ref().and_then(|tab| state.index_of(tab))
    }

    pub fn tab_at(&self, index: usize) -> Option<Tab> {
        self.inner.state.read().tabs.get(index).cloned()
    }

    pub fn index_of(&self, tab: &Tab) -> Option<usize> {
        self.inner.state.read().index_of(tab)
    }

    pub fn contains(&self, tab: &Tab) -> bool {
        self.index_of(tab).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.state.read().tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.read().tabs.is_empty()
    }

    /// Structural revision, bumped by every insert, remove, swap or replace
    pub fn revision(&self) -> u64 {
        self.inner.state.read().revision
    }

    // === Mutations ===

    /// Make `tab` the active tab, appending it first if it is not present.
    ///
    /// Activating a tab that is already present and active changes nothing
    /// and notifies nobody.
    pub fn activate_tab(&self, tab: Tab) {
        {
            let mut state = self.inner.state.write();

            if state.index_of(&tab).is_none() {
                state.tabs.push(tab.clone());
                state.revision += 1;
                let index = state.tabs.len() - 1;

                tracing::debug!(tab_id = %tab.id(), index, "Appended tab");
                self.enqueue(ModelEvent::TabsChanged(
                    StructureChange::Inserted(index),
                    state.revision,
                ));
            }

            if state.active.as_ref() != Some(&tab) {
                tracing::debug!(tab_id = %tab.id(), "Activated tab");
                state.active = Some(tab.clone());
                self.enqueue(ModelEvent::ActiveTabChanged(Some(tab)));
            }
        }

        self.sync_observer();
        self.drain();
    }

    /// Remove `tab` if present.
    ///
    /// Closing the active tab activates its left neighbour, or the new first
    /// tab when it was leftmost, or nothing when it was the last tab.
    pub fn close_tab(&self, tab: &Tab) {
        {
            let mut state = self.inner.state.write();

            let Some(index) = state.index_of(tab) else {
                return;
            };

            state.tabs.remove(index);
            state.revision += 1;

            tracing::debug!(tab_id = %tab.id(), index, "Closed tab");
            self.enqueue(ModelEvent::TabsChanged(
                StructureChange::Removed(index),
                state.revision,
            ));

            if state.active.as_ref() == Some(tab) {
                let next = state.tabs.get(index.saturating_sub(1)).cloned();
                state.active = next.clone();
                self.enqueue(ModelEvent::ActiveTabChanged(next));
            }
        }

        self.sync_observer();
        self.drain();
    }

    /// Exchange the tabs at two positions. The active tab stays the same tab.
    ///
    /// Swapping an index with itself is not a change.
    pub fn swap_tab(&self, index: usize, other: usize) -> Result<()> {
        {
            let mut state = self.inner.state.write();
            let len = state.tabs.len();

            for i in [index, other] {
                if i >= len {
                    return Err(TabError::IndexOutOfBounds { index: i, len });
                }
            }

            if index == other {
                return Ok(());
            }

            state.tabs.swap(index, other);
            state.revision += 1;

            tracing::debug!(index, other, "Swapped tabs");
            self.enqueue(ModelEvent::TabsChanged(
                StructureChange::Swapped(index, other),
                state.revision,
            ));
        }

        self.drain();
        Ok(())
    }

    /// Replace the whole collection.
    ///
    /// Repeated handles keep their first position. If the active tab is not
    /// in the new list, the first tab becomes active (or none when empty).
    pub fn set_tabs(&self, mut tabs: Vec<Tab>) {
        let mut seen = HashSet::with_capacity(tabs.len());
        tabs.retain(|tab| seen.insert(tab.id()));

        {
            let mut state = self.inner.state.write();
            state.tabs = tabs;
            state.revision += 1;

            tracing::debug!(count = state.tabs.len(), "Replaced tabs");
            self.enqueue(ModelEvent::TabsChanged(
                StructureChange::Replaced,
                state.revision,
            ));

            let keep = state
                .active
                .as_ref()
                .is_some_and(|active| state.index_of(active).is_some());

            if !keep {
                let next = state.tabs.first().cloned();
                if next != state.active {
                    state.active = next.clone();
                    self.enqueue(ModelEvent::ActiveTabChanged(next));
                }
            }
        }

        self.sync_observer();
        self.drain();
    }

    /// Release the delegate and the content observer. Tabs are left as is.
    pub fn teardown(&self) {
        if self.inner.torn_down.swap(true, Ordering::AcqRel) {
            return;
        }

        self.clear_delegate();

        let observer = self.inner.observer.lock().take();
        drop(observer);

        {
            let mut dispatch = self.inner.dispatch.lock();
            dispatch.queue.clear();
            dispatch.delivered_active = None;
        }

        tracing::debug!("Tab model torn down");
    }

    // === Notification plumbing ===

    fn enqueue(&self, event: ModelEvent) {
        self.inner.dispatch.lock().queue.push_back(event);
    }

    fn content_did_change(&self) {
        self.enqueue(ModelEvent::ActiveContentChanged);
        self.drain();
    }

    fn delegate(&self) -> Option<Arc<dyn TabModelDelegate>> {
        self.inner.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    /// Point the content observer at the current active tab's item.
    fn sync_observer(&self) {
        if self.inner.torn_down.load(Ordering::Acquire) {
            return;
        }

        let active = self.active_tab();

        let previous = {
            let mut slot = self.inner.observer.lock();

            let current = match (slot.as_ref(), active.as_ref()) {
                (Some(observer), Some(tab)) => observer.is_observing(tab.content_item()),
                (None, None) => true,
                _ => false,
            };
            if current {
                return;
            }

            let next = active.map(|tab| {
                let weak = Arc::downgrade(&self.inner);
                ContentItemObserver::new(tab.content_item(), move || {
                    if let Some(inner) = weak.upgrade() {
                        TabCollectionModel { inner }.content_did_change();
                    }
                })
            });

            std::mem::replace(&mut *slot, next)
        };

        // Disposed with the slot unlocked
        drop(previous);
    }

    fn drain(&self) {
        {
            let mut dispatch = self.inner.dispatch.lock();
            if dispatch.draining {
                return;
            }
            dispatch.draining = true;
        }

        let mut delivered = 0;

        loop {
            let event = {
                let mut dispatch = self.inner.dispatch.lock();

                if dispatch.queue.is_empty() {
                    dispatch.draining = false;
                    return;
                }

                if delivered == MAX_CASCADE {
                    let dropped = dispatch.queue.len();
                    dispatch.queue.clear();
                    dispatch.draining = false;
                    dispatch.delivered_active = None;
                    tracing::warn!(
                        delivered,
                        dropped,
                        "Tab model notification cascade cut off"
                    );
                    return;
                }

                let Some(event) = dispatch.queue.pop_front() else {
                    dispatch.draining = false;
                    return;
                };

                if let ModelEvent::ActiveTabChanged(tab) = &event {
                    let id = tab.as_ref().map(Tab::id);
                    if dispatch.delivered_active == Some(id) {
                        continue;
                    }
                    dispatch.delivered_active = Some(id);
                }

                event
            };

            delivered += 1;

            let Some(delegate) = self.delegate() else {
                continue;
            };

            match event {
                ModelEvent::TabsChanged(change, revision) => {
                    delegate.tabs_did_change(change, revision)
                }
                ModelEvent::ActiveTabChanged(tab) => delegate.active_tab_did_change(tab.as_ref()),
                ModelEvent::ActiveContentChanged => delegate.active_content_did_change(),
            }
        }
    }
}

impl Default for TabCollectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TabCollectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("TabCollectionModel")
            .field("tabs", &state.tabs)
            .field("active", &state.active)
            .field("revision", &state.revision)
            .finish()
    }
}
