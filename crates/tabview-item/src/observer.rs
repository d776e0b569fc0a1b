//! Weak observation of a [`ContentItem`]
//!
//! The item keeps a `Weak` to each registration and each observer keeps a
//! `Weak` to its item, so neither keeps the other alive.
//!
//! Delivery and disposal are serialized through a per-registration
//! reentrant gate. `dispose` takes the gate, so it waits for a callback
//! running on another thread and, once it returns, the disposed flag is
//! visible to every later delivery. Disposal from inside a callback (on the
//! delivering thread) re-enters the gate and takes effect for every
//! delivery after the current one.
//!
//! A callback that changes its own item is not re-entered; it runs once
//! more after it returns.

use parking_lot::{Mutex, ReentrantMutex};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::item::ContentItem;

type Callback = Box<dyn FnMut() + Send>;

pub(crate) struct Registration {
    gate: ReentrantMutex<()>,
    disposed: AtomicBool,
    /// Set when the item changed while the callback was running
    pending: AtomicBool,
    callback: Mutex<Callback>,
}

impl Registration {
    fn new(callback: Callback) -> Self {
        Self {
            gate: ReentrantMutex::new(()),
            disposed: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            callback: Mutex::new(callback),
        }
    }

    pub(crate) fn fire(&self) {
        let _gate = self.gate.lock();
        if self.disposed.load(Ordering::Acquire) {
            return;
        }

        // Held only by this thread further up the stack: the callback
        // changed its own item. Run again once it returns.
        let Some(mut callback) = self.callback.try_lock() else {
            self.pending.store(true, Ordering::Release);
            return;
        };

        loop {
            (callback)();

            if !self.pending.swap(false, Ordering::AcqRel)
                || self.disposed.load(Ordering::Acquire)
            {
                break;
            }
        }
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Returns true the first time only.
    fn dispose(&self) -> bool {
        let _gate = self.gate.lock();
        !self.disposed.swap(true, Ordering::AcqRel)
    }
}

/// Invokes a callback on every change to a [`ContentItem`] until disposed.
///
/// Dropping the observer disposes it.
pub struct ContentItemObserver {
    item: Weak<ContentItem>,
    registration: Arc<Registration>,
}

impl ContentItemObserver {
    pub fn new<F>(item: &Arc<ContentItem>, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let registration = Arc::new(Registration::new(Box::new(callback)));
        item.register(&registration);

        Self {
            item: Arc::downgrade(item),
            registration,
        }
    }

    /// Stop observing. Safe to call any number of times.
    ///
    /// When this returns no further callback invocation will start, and any
    /// invocation running on another thread has finished.
    pub fn dispose(&self) {
        if !self.registration.dispose() {
            return;
        }

        if let Some(item) = self.item.upgrade() {
            item.unregister(&self.registration);
        }

        tracing::trace!("Content item observer disposed");
    }

    /// False once disposed or once the observed item has been dropped
    pub fn is_active(&self) -> bool {
        !self.registration.is_disposed() && self.item.strong_count() > 0
    }

    pub fn is_observing(&self, item: &Arc<ContentItem>) -> bool {
        std::ptr::eq(self.item.as_ptr(), Arc::as_ptr(item))
    }
}

impl Drop for ContentItemObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for ContentItemObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentItemObserver")
            .field("active", &self.is_active())
            .finish()
    }
}
