//! What the bar reads from and reports to

use tabview_tabs::Tab;

/// Supplies the data the bar renders.
pub trait TabBarDataSource: Send + Sync {
    /// Title shown in the title row
    fn title(&self) -> Option<String>;

    /// Label for a selector whose tab has no title of its own
    fn fallback_title(&self) -> Option<String> {
        None
    }

    fn tabs(&self) -> Vec<Tab>;

    fn active_tab(&self) -> Option<Tab>;
}

/// Receives user intents raised by gestures on the bar.
pub trait TabBarDelegate: Send + Sync {
    fn activate_tab(&self, tab: Tab);
    fn close_tab(&self, tab: Tab);
    fn swap_tabs(&self, index: usize, other: usize);
}
