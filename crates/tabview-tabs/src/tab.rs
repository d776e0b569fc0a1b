//! Tab handle
//!
//! Content is supplied by the host and is opaque to the container. A [`Tab`]
//! pairs that content with an identity; clones of a handle are the same tab,
//! two handles made from separate `Tab::new` calls never are.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tabview_item::ContentItem;
use uuid::Uuid;

/// Host-supplied content displayed while its tab is active.
pub trait TabContent: Send + Sync {
    /// Title and bar buttons this content publishes
    fn content_item(&self) -> &Arc<ContentItem>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(Uuid);

impl TabId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone)]
pub struct Tab {
    id: TabId,
    content: Arc<dyn TabContent>,
}

impl Tab {
    pub fn new(content: Arc<dyn TabContent>) -> Self {
        Self {
            id: TabId::new(),
            content,
        }
    }

    pub fn from_content<C>(content: C) -> Self
    where
        C: TabContent + 'static,
    {
        Self::new(Arc::new(content))
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn content(&self) -> &Arc<dyn TabContent> {
        &self.content
    }

    pub fn content_item(&self) -> &Arc<ContentItem> {
        self.content.content_item()
    }

    /// The content's own title, if it publishes one
    pub fn title(&self) -> Option<String> {
        self.content_item().title()
    }
}

impl PartialEq for Tab {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tab {}

impl Hash for Tab {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("title", &self.title())
            .finish()
    }
}
