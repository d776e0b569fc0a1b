//! Bar geometry

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarMetrics {
    /// Row holding the title and the button groups
    pub title_height: f32,
    /// Row of tab selectors
    pub tab_strip_height: f32,
    /// Hairline under the bar
    pub separator_height: f32,
    /// Hide the selector row while there is at most one tab
    pub collapse_single_tab: bool,
}

impl BarMetrics {
    /// Rendered bar height for a given tab count
    pub fn height_for(&self, tab_count: usize) -> f32 {
        let strip = if tab_count > 1 || !self.collapse_single_tab {
            self.tab_strip_height
        } else {
            0.0
        };
        self.title_height + strip + self.separator_height
    }
}

impl Default for BarMetrics {
    fn default() -> Self {
        Self {
            title_height: 44.0,
            tab_strip_height: 32.0,
            separator_height: 0.5,
            collapse_single_tab: true,
        }
    }
}
