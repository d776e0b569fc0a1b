//! TabView Core
//!
//! [`TabContainer`] owns a tab model, a tab bar and a content surface and
//! keeps them in step: bar gestures become model operations, model changes
//! become bar updates and panel swaps, and the active tab's title and
//! buttons are republished into the bar whenever they change.

mod config;
mod container;
mod error;
mod surface;

pub use config::Config;
pub use container::TabContainer;
pub use error::CoreError;
pub use surface::{ContentSurface, Placeholder};

// Re-export the component crates
pub use tabview_bar::{
    BarMetrics, BarRenderer, BarStyle, BlurStyle, NullRenderer, Rgba, Selector, SelectorStyle,
    StatusBarStyle, TabBar, Theme, ThemeError,
};
pub use tabview_item::{BarButton, ContentItem, ContentItemObserver, ItemSnapshot};
pub use tabview_tabs::{Tab, TabContent, TabError, TabId};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A host that already installed a subscriber keeps it
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
