//! The drawing side of the bar
//!
//! [`BarRenderer`] is whatever puts pixels on screen: a native widget, a
//! GPU pass, a test recorder. [`TabBar`](crate::TabBar) owns it and calls
//! it with the bar lock held, so a renderer must not call back into the bar.

use tabview_item::BarButton;
use tabview_tabs::TabId;

use crate::style::BarStyle;

/// One rendered tab selector
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub tab_id: TabId,
    pub label: String,
    pub selected: bool,
}

pub trait BarRenderer: Send {
    /// Drop all selectors and render these instead
    fn reload(&mut self, selectors: &[Selector]);
    fn insert_item(&mut self, index: usize, selector: &Selector);
    fn delete_item(&mut self, index: usize);
    fn select_item(&mut self, index: usize);
    fn deselect_item(&mut self, index: usize);
    fn set_title(&mut self, title: Option<&str>);
    fn set_leading_buttons(&mut self, buttons: &[BarButton]);
    fn set_trailing_buttons(&mut self, buttons: &[BarButton]);
    fn set_height(&mut self, height: f32);
    fn apply_style(&mut self, style: &BarStyle);
}

/// Renders nothing. Useful for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl BarRenderer for NullRenderer {
    fn reload(&mut self, _selectors: &[Selector]) {}
    fn insert_item(&mut self, _index: usize, _selector: &Selector) {}
    fn delete_item(&mut self, _index: usize) {}
    fn select_item(&mut self, _index: usize) {}
    fn deselect_item(&mut self, _index: usize) {}
    fn set_title(&mut self, _title: Option<&str>) {}
    fn set_leading_buttons(&mut self, _buttons: &[BarButton]) {}
    fn set_trailing_buttons(&mut self, _buttons: &[BarButton]) {}
    fn set_height(&mut self, _height: f32) {}
    fn apply_style(&mut self, _style: &BarStyle) {}
}
