//! The content area a container mounts panels into

use std::any::Any;
use std::sync::Arc;

use tabview_bar::Rgba;
use tabview_tabs::Tab;

/// View shown while the container has no tabs. Opaque to the container;
/// a surface downcasts it to its own view type.
pub type Placeholder = Arc<dyn Any + Send + Sync>;

/// Host display region under the bar.
///
/// The container calls these with its own lock held: a surface must not
/// call back into the container synchronously.
///
/// A panel is mounted with `add_child` then `add_to_display`, and unmounted
/// with `remove_from_display` then `remove_from_parent`. The previous panel
/// is always fully unmounted before the next one is mounted, so at most one
/// panel owns the region at a time.
pub trait ContentSurface: Send {
    /// Take ownership of the panel as a child of the container
    fn add_child(&mut self, tab: &Tab);
    fn add_to_display(&mut self, tab: &Tab);
    fn remove_from_display(&mut self, tab: &Tab);
    fn remove_from_parent(&mut self, tab: &Tab);

    /// Space at the top of the panel covered by the bar
    fn set_top_inset(&mut self, tab: &Tab, inset: f32);

    /// Inset the platform already applies at the top (status bar, notch)
    fn safe_area_top(&self) -> f32 {
        0.0
    }

    fn show_placeholder(&mut self, placeholder: &Placeholder);
    fn hide_placeholder(&mut self, placeholder: &Placeholder);

    fn apply_background(&mut self, color: Rgba);
}
