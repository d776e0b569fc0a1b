//! Model change notifications

use crate::tab::Tab;

/// How the ordered collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureChange {
    /// One tab was inserted at this index
    Inserted(usize),
    /// The tab at this index was removed
    Removed(usize),
    /// The tabs at these two indices traded places
    Swapped(usize, usize),
    /// The whole collection was replaced
    Replaced,
}

/// Receives model notifications.
///
/// The model holds its delegate weakly and calls it with no model lock held,
/// so a delegate may read the model or mutate it from inside a callback.
/// Notifications raised by such a nested mutation are delivered after the
/// current callback returns, in order.
pub trait TabModelDelegate: Send + Sync {
    /// The collection changed. `revision` is the model's structural revision
    /// right after this change; compare it with
    /// [`TabCollectionModel::revision`](crate::TabCollectionModel::revision)
    /// to tell whether later changes are still queued.
    fn tabs_did_change(&self, change: StructureChange, revision: u64);

    /// A different tab (or none) is now active.
    fn active_tab_did_change(&self, tab: Option<&Tab>);

    /// The active tab's title or bar buttons changed.
    fn active_content_did_change(&self);
}
