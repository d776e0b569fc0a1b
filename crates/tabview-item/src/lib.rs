//! TabView Contextual Metadata
//!
//! Tab content publishes a title and two groups of bar buttons through a
//! [`ContentItem`]. The container follows those values with a
//! [`ContentItemObserver`], which holds the item weakly and can be disposed
//! at any point without a late callback slipping through.

mod button;
mod item;
mod observer;

pub use button::BarButton;
pub use item::{ContentItem, ItemSnapshot};
pub use observer::ContentItemObserver;
