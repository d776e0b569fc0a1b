//! Tab container
//!
//! Owns the tab model, the bar and the content surface, and is the only
//! thing that mutates the model. The wiring:
//!
//! ```text
//! bar gesture --> TabBarDelegate --> model operation
//! model --> TabModelDelegate --> bar update, panel swap, placeholder, inset
//! content item change --> bar title and buttons republished
//! ```
//!
//! The model, bar and own-item observer all hold the container weakly;
//! teardown clears those links explicitly.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tabview_bar::{
    BarMetrics, BarRenderer, StatusBarStyle, TabBar, TabBarDataSource, TabBarDelegate, Theme,
};
use tabview_item::{BarButton, ContentItem, ContentItemObserver, ItemSnapshot};
use tabview_tabs::{StructureChange, Tab, TabCollectionModel, TabModelDelegate};

use crate::config::Config;
use crate::surface::{ContentSurface, Placeholder};
use crate::Result;

/// Leading is container then tab; trailing is tab then container.
fn merge_bar_buttons(
    container: &ItemSnapshot,
    tab: Option<&ItemSnapshot>,
) -> (Vec<BarButton>, Vec<BarButton>) {
    let mut leading = container.leading.clone();
    let mut trailing = Vec::new();

    if let Some(tab) = tab {
        leading.extend(tab.leading.iter().cloned());
        trailing.extend(tab.trailing.iter().cloned());
    }
    trailing.extend(container.trailing.iter().cloned());

    (leading, trailing)
}

struct ContainerState {
    theme: Theme,
    surface: Box<dyn ContentSurface>,
    /// The one panel currently mounted
    mounted: Option<Tab>,
    placeholder: Option<Placeholder>,
    placeholder_shown: bool,
    top_inset: f32,
}

impl ContainerState {
    fn unmount(&mut self) {
        if let Some(tab) = self.mounted.take() {
            self.surface.remove_from_display(&tab);
            self.surface.remove_from_parent(&tab);
            tracing::debug!(tab_id = %tab.id(), "Unmounted panel");
        }
    }

    fn mount(&mut self, tab: &Tab) {
        self.surface.add_child(tab);
        self.surface.add_to_display(tab);
        self.mounted = Some(tab.clone());
        tracing::debug!(tab_id = %tab.id(), "Mounted panel");
    }

    fn hide_placeholder(&mut self) {
        if !self.placeholder_shown {
            return;
        }
        if let Some(view) = self.placeholder.clone() {
            self.surface.hide_placeholder(&view);
        }
        self.placeholder_shown = false;
    }
}

struct ContainerInner {
    model: TabCollectionModel,
    bar: TabBar,
    /// The container's own title and buttons
    item: Arc<ContentItem>,
    state: Mutex<ContainerState>,
    item_observer: Mutex<Option<ContentItemObserver>>,
    torn_down: AtomicBool,
}

impl ContainerInner {
    fn show(&self, tab: Option<&Tab>) {
        let mut state = self.state.lock();
        if state.mounted.as_ref() == tab {
            return;
        }

        state.unmount();
        if let Some(tab) = tab {
            state.mount(tab);
        }
    }

    fn republish_buttons(&self) {
        let container = self.item.snapshot();
        let tab = self
            .model
            .active_tab()
            .map(|tab| tab.content_item().snapshot());

        let (leading, trailing) = merge_bar_buttons(&container, tab.as_ref());
        self.bar.set_leading_buttons(leading);
        self.bar.set_trailing_buttons(trailing);
    }

    fn select_active_in_bar(&self) {
        if let Some(index) = self.model.active_index() {
            if index < self.bar.len() {
                self.bar.select_tab(index);
            }
        }
    }

    fn refresh_bar(&self) {
        self.bar.refresh();
        self.republish_buttons();
        self.layout();
    }

    /// Apply a structural change to the bar, incrementally when the bar is
    /// exactly one step behind the model.
    fn apply_structure(&self, change: StructureChange, revision: u64) {
        let latest = revision == self.model.revision();
        let model_len = self.model.len();
        let bar_len = self.bar.len();

        match change {
            StructureChange::Inserted(index)
                if latest && bar_len + 1 == model_len && index <= bar_len =>
            {
                self.bar.add_tab(index);
            }
            StructureChange::Removed(index)
                if latest && bar_len == model_len + 1 && index < bar_len =>
            {
                self.bar.remove_tab(index);
            }
            _ => {
                self.bar.refresh();
                return;
            }
        }

        self.bar.update_title();
        self.select_active_in_bar();
    }

    fn refresh_placeholder(&self) {
        let empty = self.model.is_empty();
        let mut state = self.state.lock();

        let Some(view) = state.placeholder.clone() else {
            return;
        };

        if empty && !state.placeholder_shown {
            state.surface.show_placeholder(&view);
            state.placeholder_shown = true;
        } else if !empty {
            state.hide_placeholder();
        }
    }

    /// Reserve the bar's height at the top of the mounted panel.
    fn layout(&self) {
        let bar_height = self.bar.height();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let inset = (bar_height - state.surface.safe_area_top()).max(0.0);
        state.top_inset = inset;
        if let Some(tab) = &state.mounted {
            state.surface.set_top_inset(tab, inset);
        }
    }

    fn apply_theme(&self) {
        let theme = {
            let mut state = self.state.lock();
            let theme = state.theme.clone();
            state.surface.apply_background(theme.background_color);
            theme
        };
        self.bar.set_theme(theme);
    }

    fn teardown(&self) {
        if self.torn_down.swap(true, Ordering::AcqRel) {
            return;
        }

        self.model.teardown();
        self.bar.clear_delegate();
        self.bar.clear_data_source();

        let observer = self.item_observer.lock().take();
        drop(observer);

        {
            let mut state = self.state.lock();
            state.unmount();
            state.hide_placeholder();
        }

        tracing::info!("Tab container torn down");
    }
}

impl TabModelDelegate for ContainerInner {
    fn tabs_did_change(&self, change: StructureChange, revision: u64) {
        self.apply_structure(change, revision);
        self.refresh_placeholder();
        self.layout();
    }

    fn active_tab_did_change(&self, tab: Option<&Tab>) {
        self.show(tab);
        self.bar.update_title();
        self.republish_buttons();
        self.select_active_in_bar();
        self.layout();
    }

    fn active_content_did_change(&self) {
        self.refresh_bar();
    }
}

impl TabBarDataSource for ContainerInner {
    fn title(&self) -> Option<String> {
        self.model
            .active_tab()
            .and_then(|tab| tab.title())
            .or_else(|| self.item.title())
    }

    fn fallback_title(&self) -> Option<String> {
        self.item.title()
    }

    fn tabs(&self) -> Vec<Tab> {
        self.model.tabs()
    }

    fn active_tab(&self) -> Option<Tab> {
        self.model.active_tab()
    }
}

impl TabBarDelegate for ContainerInner {
    fn activate_tab(&self, tab: Tab) {
        self.model.activate_tab(tab);
    }

    fn close_tab(&self, tab: Tab) {
        self.model.close_tab(&tab);
    }

    fn swap_tabs(&self, index: usize, other: usize) {
        if let Err(e) = self.model.swap_tab(index, other) {
            tracing::warn!(error = %e, "Ignoring tab swap from bar");
        }
    }
}

/// A multi-tab container. Dropping it tears it down.
pub struct TabContainer {
    inner: Arc<ContainerInner>,
}

impl TabContainer {
    /// Create a container with default bar metrics and no title.
    pub fn new(
        theme: Theme,
        surface: Box<dyn ContentSurface>,
        renderer: Box<dyn BarRenderer>,
    ) -> Self {
        Self::build(
            theme,
            BarMetrics::default(),
            ContentItem::new(),
            surface,
            renderer,
        )
    }

    pub fn from_config(
        config: Config,
        surface: Box<dyn ContentSurface>,
        renderer: Box<dyn BarRenderer>,
    ) -> Result<Self> {
        config.validate()?;

        let item = match config.title {
            Some(title) => ContentItem::with_title(title),
            None => ContentItem::new(),
        };

        Ok(Self::build(
            config.theme,
            config.metrics,
            item,
            surface,
            renderer,
        ))
    }

    fn build(
        theme: Theme,
        metrics: BarMetrics,
        item: ContentItem,
        surface: Box<dyn ContentSurface>,
        renderer: Box<dyn BarRenderer>,
    ) -> Self {
        let inner = Arc::new(ContainerInner {
            model: TabCollectionModel::new(),
            bar: TabBar::new(theme.clone(), metrics, renderer),
            item: Arc::new(item),
            state: Mutex::new(ContainerState {
                theme,
                surface,
                mounted: None,
                placeholder: None,
                placeholder_shown: false,
                top_inset: 0.0,
            }),
            item_observer: Mutex::new(None),
            torn_down: AtomicBool::new(false),
        });

        inner.model.set_delegate(&inner);
        inner.bar.set_data_source(&inner);
        inner.bar.set_delegate(&inner);

        let weak = Arc::downgrade(&inner);
        let observer = ContentItemObserver::new(&inner.item, move || {
            if let Some(inner) = weak.upgrade() {
                inner.refresh_bar();
            }
        });
        *inner.item_observer.lock() = Some(observer);

        inner.apply_theme();
        inner.refresh_bar();

        tracing::info!(title = ?inner.item.title(), "Created tab container");

        Self { inner }
    }

    // === Theme ===

    pub fn theme(&self) -> Theme {
        self.inner.state.lock().theme.clone()
    }

    /// Validate and apply a theme, restyling the bar and the background.
    /// Tabs and selection are untouched. An invalid theme changes nothing.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        theme.validate()?;
        self.inner.state.lock().theme = theme;
        self.inner.apply_theme();
        tracing::debug!("Applied theme");
        Ok(())
    }

    pub fn preferred_status_bar_style(&self) -> StatusBarStyle {
        self.inner.state.lock().theme.status_bar_style
    }

    // === Tabs ===

    pub fn active_tab(&self) -> Option<Tab> {
        self.inner.model.active_tab()
    }

    pub fn tabs(&self) -> Vec<Tab> {
        self.inner.model.tabs()
    }

    /// Replace every tab. The active tab is kept if still present,
    /// otherwise the first tab becomes active.
    pub fn set_tabs(&self, tabs: Vec<Tab>) {
        self.inner.model.set_tabs(tabs);
    }

    /// Show `tab`, adding it after the last tab if it is new.
    pub fn activate_tab(&self, tab: Tab) {
        self.inner.model.activate_tab(tab);
    }

    /// Close `tab`. Closing the active tab shows its left neighbour.
    pub fn close_tab(&self, tab: &Tab) {
        self.inner.model.close_tab(tab);
    }

    pub fn swap_tabs(&self, index: usize, other: usize) -> Result<()> {
        Ok(self.inner.model.swap_tab(index, other)?)
    }

    // === Placeholder ===

    pub fn empty_placeholder(&self) -> Option<Placeholder> {
        self.inner.state.lock().placeholder.clone()
    }

    /// Set the view shown while there are no tabs. A previous placeholder
    /// is removed from the surface first.
    pub fn set_empty_placeholder(&self, placeholder: Option<Placeholder>) {
        {
            let mut state = self.inner.state.lock();
            state.hide_placeholder();
            state.placeholder = placeholder;
        }
        self.inner.refresh_placeholder();
    }

    pub fn is_placeholder_shown(&self) -> bool {
        self.inner.state.lock().placeholder_shown
    }

    // === Presentation ===

    /// The container's own title and buttons, merged with the active tab's
    pub fn content_item(&self) -> &Arc<ContentItem> {
        &self.inner.item
    }

    pub fn bar(&self) -> &TabBar {
        &self.inner.bar
    }

    pub fn mounted_tab(&self) -> Option<Tab> {
        self.inner.state.lock().mounted.clone()
    }

    pub fn top_inset(&self) -> f32 {
        self.inner.state.lock().top_inset
    }

    /// Recompute the panel inset, e.g. after the host's safe area changed.
    pub fn layout(&self) {
        self.inner.layout();
    }

    /// Unmount the panel, hide the placeholder and release every observer
    /// and back-reference. Tabs are left to their owners. Idempotent.
    pub fn teardown(&self) {
        self.inner.teardown();
    }
}

impl Drop for TabContainer {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

impl fmt::Debug for TabContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabContainer")
            .field("model", &self.inner.model)
            .field("bar", &self.inner.bar)
            .finish()
    }
}
