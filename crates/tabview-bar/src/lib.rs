//! TabView Bar
//!
//! The strip above the content: a title row with leading and trailing
//! button groups, and a row of tab selectors underneath. Drawing is left to
//! a [`BarRenderer`]; [`TabBar`] keeps the rendered state, pulls data from a
//! [`TabBarDataSource`] and reports user gestures to a [`TabBarDelegate`].
//! It never mutates the tab collection itself.

mod bar;
mod error;
mod metrics;
mod renderer;
mod source;
mod style;
mod theme;

pub use bar::TabBar;
pub use error::ThemeError;
pub use metrics::BarMetrics;
pub use renderer::{BarRenderer, NullRenderer, Selector};
pub use source::{TabBarDataSource, TabBarDelegate};
pub use style::{BarStyle, SelectorStyle};
pub use theme::{BlurStyle, Rgba, StatusBarStyle, Theme};

pub type Result<T> = std::result::Result<T, ThemeError>;
