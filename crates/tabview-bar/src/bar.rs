//! Tab Bar
//!
//! Holds what is currently rendered (title, selectors, button groups,
//! height) and keeps the renderer in step with it. Data comes from the
//! data source on `refresh`, `update_title` and `add_tab`; user intents go
//! out to the delegate from the gesture entry points only.
//!
//! The data source and delegate are held weakly and cleared explicitly.
//! Neither is called while the bar lock is held, so both may call back into
//! the bar.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::{Arc, Weak};

use tabview_item::BarButton;
use tabview_tabs::Tab;

use crate::metrics::BarMetrics;
use crate::renderer::{BarRenderer, Selector};
use crate::source::{TabBarDataSource, TabBarDelegate};
use crate::style::BarStyle;
use crate::theme::Theme;

struct BarState {
    title: Option<String>,
    selectors: Vec<Selector>,
    leading: Vec<BarButton>,
    trailing: Vec<BarButton>,
    height: f32,
    theme: Theme,
    metrics: BarMetrics,
    renderer: Box<dyn BarRenderer>,
}

impl BarState {
    fn set_title(&mut self, title: Option<String>) {
        if self.title != title {
            self.title = title;
            self.renderer.set_title(self.title.as_deref());
        }
    }

    fn select(&mut self, index: usize) {
        assert!(
            index < self.selectors.len(),
            "selector index {index} out of range ({} rendered)",
            self.selectors.len()
        );

        for (i, selector) in self.selectors.iter_mut().enumerate() {
            if i != index && selector.selected {
                selector.selected = false;
                self.renderer.deselect_item(i);
            }
        }

        self.selectors[index].selected = true;
        self.renderer.select_item(index);
    }

    fn update_height(&mut self) {
        let height = self.metrics.height_for(self.selectors.len());
        if height != self.height {
            self.height = height;
            self.renderer.set_height(height);
        }
    }
}

fn selector_for(tab: &Tab, fallback: Option<&str>) -> Selector {
    Selector {
        tab_id: tab.id(),
        label: tab
            .title()
            .or_else(|| fallback.map(str::to_owned))
            .unwrap_or_default(),
        selected: false,
    }
}

pub struct TabBar {
    state: Mutex<BarState>,
    data_source: RwLock<Option<Weak<dyn TabBarDataSource>>>,
    delegate: RwLock<Option<Weak<dyn TabBarDelegate>>>,
}

impl TabBar {
    pub fn new(theme: Theme, metrics: BarMetrics, mut renderer: Box<dyn BarRenderer>) -> Self {
        let height = metrics.height_for(0);
        renderer.apply_style(&BarStyle::from(&theme));
        renderer.set_height(height);

        Self {
            state: Mutex::new(BarState {
                title: None,
                selectors: Vec::new(),
                leading: Vec::new(),
                trailing: Vec::new(),
                height,
                theme,
                metrics,
                renderer,
            }),
            data_source: RwLock::new(None),
            delegate: RwLock::new(None),
        }
    }

    pub fn set_data_source<S>(&self, source: &Arc<S>)
    where
        S: TabBarDataSource + 'static,
    {
        let weak: Weak<S> = Arc::downgrade(source);
        let weak: Weak<dyn TabBarDataSource> = weak;
        *self.data_source.write() = Some(weak);
    }

    pub fn clear_data_source(&self) {
        *self.data_source.write() = None;
    }

    pub fn set_delegate<D>(&self, delegate: &Arc<D>)
    where
        D: TabBarDelegate + 'static,
    {
        let weak: Weak<D> = Arc::downgrade(delegate);
        let weak: Weak<dyn TabBarDelegate> = weak;
        *self.delegate.write() = Some(weak);
    }

    pub fn clear_delegate(&self) {
        *self.delegate.write() = None;
    }

    fn data_source(&self) -> Option<Arc<dyn TabBarDataSource>> {
        self.data_source.read().as_ref().and_then(Weak::upgrade)
    }

    fn delegate(&self) -> Option<Arc<dyn TabBarDelegate>> {
        self.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    // === Updates ===

    /// Re-pull title and tabs, re-render every selector, and select the
    /// active tab. Without a data source the bar renders empty.
    pub fn refresh(&self) {
        let (title, selectors, active_index) = match self.data_source() {
            Some(source) => {
                let fallback = source.fallback_title();
                let tabs = source.tabs();
                let active = source.active_tab();
                let selectors: Vec<Selector> = tabs
                    .iter()
                    .map(|tab| selector_for(tab, fallback.as_deref()))
                    .collect();
                let active_index =
                    active.and_then(|active| tabs.iter().position(|tab| *tab == active));
                (source.title(), selectors, active_index)
            }
            None => (None, Vec::new(), None),
        };

        let mut state = self.state.lock();
        state.set_title(title);
        state.renderer.reload(&selectors);
        state.selectors = selectors;
        if let Some(index) = active_index {
            state.select(index);
        }
        state.update_height();

        tracing::trace!(count = state.selectors.len(), "Tab bar refreshed");
    }

    /// Re-pull only the title.
    pub fn update_title(&self) {
        let title = self.data_source().and_then(|source| source.title());
        self.state.lock().set_title(title);
    }

    /// Insert a selector for the data source's tab at `index`, leaving the
    /// other selectors and their selection untouched.
    ///
    /// # Panics
    ///
    /// If `index` is past the data source's tabs or past the rendered
    /// selectors.
    pub fn add_tab(&self, index: usize) {
        let Some(source) = self.data_source() else {
            return;
        };
        let tabs = source.tabs();
        let selector = selector_for(&tabs[index], source.fallback_title().as_deref());

        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.selectors.insert(index, selector);
        state.renderer.insert_item(index, &state.selectors[index]);
        state.update_height();
    }

    /// Remove the selector at `index`, leaving the others untouched.
    ///
    /// # Panics
    ///
    /// If `index` is not a rendered selector.
    pub fn remove_tab(&self, index: usize) {
        let mut state = self.state.lock();
        state.selectors.remove(index);
        state.renderer.delete_item(index);
        state.update_height();
    }

    /// Select the selector at `index`, deselecting any other first.
    ///
    /// # Panics
    ///
    /// If `index` is not a rendered selector.
    pub fn select_tab(&self, index: usize) {
        self.state.lock().select(index);
    }

    pub fn set_leading_buttons(&self, buttons: Vec<BarButton>) {
        let mut state = self.state.lock();
        state.renderer.set_leading_buttons(&buttons);
        state.leading = buttons;
    }

    pub fn set_trailing_buttons(&self, buttons: Vec<BarButton>) {
        let mut state = self.state.lock();
        state.renderer.set_trailing_buttons(&buttons);
        state.trailing = buttons;
    }

    /// Restyle. Rendered data is untouched.
    pub fn set_theme(&self, theme: Theme) {
        let mut state = self.state.lock();
        state.renderer.apply_style(&BarStyle::from(&theme));
        state.theme = theme;
    }

    // === Rendered state ===

    pub fn title(&self) -> Option<String> {
        self.state.lock().title.clone()
    }

    pub fn selectors(&self) -> Vec<Selector> {
        self.state.lock().selectors.clone()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state
            .lock()
            .selectors
            .iter()
            .position(|selector| selector.selected)
    }

    pub fn len(&self) -> usize {
        self.state.lock().selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().selectors.is_empty()
    }

    pub fn leading_buttons(&self) -> Vec<BarButton> {
        self.state.lock().leading.clone()
    }

    pub fn trailing_buttons(&self) -> Vec<BarButton> {
        self.state.lock().trailing.clone()
    }

    pub fn height(&self) -> f32 {
        self.state.lock().height
    }

    pub fn theme(&self) -> Theme {
        self.state.lock().theme.clone()
    }

    pub fn metrics(&self) -> BarMetrics {
        self.state.lock().metrics
    }

    // === Gestures ===

    /// The user tapped the selector at `index`.
    pub fn tap_selector(&self, index: usize) {
        let (Some(tab), Some(delegate)) = (self.rendered_tab(index), self.delegate()) else {
            return;
        };
        tracing::debug!(tab_id = %tab.id(), index, "Selector tapped");
        delegate.activate_tab(tab);
    }

    /// The user tapped the close control on the selector at `index`.
    pub fn tap_close(&self, index: usize) {
        let (Some(tab), Some(delegate)) = (self.rendered_tab(index), self.delegate()) else {
            return;
        };
        tracing::debug!(tab_id = %tab.id(), index, "Close tapped");
        delegate.close_tab(tab);
    }

    /// The user dragged the selector at `from` onto the one at `to`.
    pub fn drag_selector(&self, from: usize, to: usize) {
        let len = self.len();
        if from == to || from >= len || to >= len {
            return;
        }
        if let Some(delegate) = self.delegate() {
            tracing::debug!(from, to, "Selector dragged");
            delegate.swap_tabs(from, to);
        }
    }

    fn rendered_tab(&self, index: usize) -> Option<Tab> {
        let tab_id = self.state.lock().selectors.get(index)?.tab_id;
        self.data_source()?
            .tabs()
            .into_iter()
            .find(|tab| tab.id() == tab_id)
    }
}

impl fmt::Debug for TabBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TabBar")
            .field("title", &state.title)
            .field("selectors", &state.selectors)
            .field("height", &state.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabview_item::ContentItem;
    use tabview_tabs::TabContent;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Reload(Vec<String>),
        Insert(usize, String),
        Delete(usize),
        Select(usize),
        Deselect(usize),
        Title(Option<String>),
        Leading(Vec<String>),
        Trailing(Vec<String>),
        Height(f32),
        Style,
    }

    #[derive(Clone, Default)]
    struct Recording {
        ops: Arc<Mutex<Vec<Op>>>,
    }

    impl Recording {
        fn take(&self) -> Vec<Op> {
            std::mem::take(&mut *self.ops.lock())
        }
    }

    fn ids(buttons: &[BarButton]) -> Vec<String> {
        buttons.iter().map(|button| button.id.clone()).collect()
    }

    impl BarRenderer for Recording {
        fn reload(&mut self, selectors: &[Selector]) {
            let labels = selectors.iter().map(|s| s.label.clone()).collect();
            self.ops.lock().push(Op::Reload(labels));
        }
        fn insert_item(&mut self, index: usize, selector: &Selector) {
            self.ops.lock().push(Op::Insert(index, selector.label.clone()));
        }
        fn delete_item(&mut self, index: usize) {
            self.ops.lock().push(Op::Delete(index));
        }
        fn select_item(&mut self, index: usize) {
            self.ops.lock().push(Op::Select(index));
        }
        fn deselect_item(&mut self, index: usize) {
            self.ops.lock().push(Op::Deselect(index));
        }
        fn set_title(&mut self, title: Option<&str>) {
            self.ops.lock().push(Op::Title(title.map(str::to_owned)));
        }
        fn set_leading_buttons(&mut self, buttons: &[BarButton]) {
            self.ops.lock().push(Op::Leading(ids(buttons)));
        }
        fn set_trailing_buttons(&mut self, buttons: &[BarButton]) {
            self.ops.lock().push(Op::Trailing(ids(buttons)));
        }
        fn set_height(&mut self, height: f32) {
            self.ops.lock().push(Op::Height(height));
        }
        fn apply_style(&mut self, _style: &BarStyle) {
            self.ops.lock().push(Op::Style);
        }
    }

    struct Page {
        item: Arc<ContentItem>,
    }

    impl TabContent for Page {
        fn content_item(&self) -> &Arc<ContentItem> {
            &self.item
        }
    }

    fn tab(title: Option<&str>) -> Tab {
        let item = match title {
            Some(title) => ContentItem::with_title(title),
            None => ContentItem::new(),
        };
        Tab::from_content(Page {
            item: Arc::new(item),
        })
    }

    #[derive(Default)]
    struct Source {
        title: Mutex<Option<String>>,
        tabs: Mutex<Vec<Tab>>,
        active: Mutex<Option<Tab>>,
    }

    impl TabBarDataSource for Source {
        fn title(&self) -> Option<String> {
            self.title.lock().clone()
        }
        fn fallback_title(&self) -> Option<String> {
            Some("Untitled".to_string())
        }
        fn tabs(&self) -> Vec<Tab> {
            self.tabs.lock().clone()
        }
        fn active_tab(&self) -> Option<Tab> {
            self.active.lock().clone()
        }
    }

    #[derive(Debug, PartialEq)]
    enum Intent {
        Activate(Tab),
        Close(Tab),
        Swap(usize, usize),
    }

    #[derive(Default)]
    struct Intents {
        seen: Mutex<Vec<Intent>>,
    }

    impl TabBarDelegate for Intents {
        fn activate_tab(&self, tab: Tab) {
            self.seen.lock().push(Intent::Activate(tab));
        }
        fn close_tab(&self, tab: Tab) {
            self.seen.lock().push(Intent::Close(tab));
        }
        fn swap_tabs(&self, index: usize, other: usize) {
            self.seen.lock().push(Intent::Swap(index, other));
        }
    }

    struct Fixture {
        bar: TabBar,
        ops: Recording,
        source: Arc<Source>,
        intents: Arc<Intents>,
        tabs: Vec<Tab>,
    }

    fn fixture() -> Fixture {
        let ops = Recording::default();
        let bar = TabBar::new(Theme::light(), BarMetrics::default(), Box::new(ops.clone()));
        let tabs = vec![tab(Some("A")), tab(None), tab(Some("C"))];
        let source = Arc::new(Source::default());
        *source.title.lock() = Some("Docs".to_string());
        *source.tabs.lock() = tabs.clone();
        *source.active.lock() = Some(tabs[1].clone());
        let intents = Arc::new(Intents::default());
        bar.set_data_source(&source);
        bar.set_delegate(&intents);
        ops.take();
        Fixture {
            bar,
            ops,
            source,
            intents,
            tabs,
        }
    }

    #[test]
    fn test_new_applies_style_and_collapsed_height() {
        let ops = Recording::default();
        let bar = TabBar::new(Theme::dark(), BarMetrics::default(), Box::new(ops.clone()));

        assert_eq!(ops.take(), vec![Op::Style, Op::Height(44.5)]);
        assert_eq!(bar.height(), 44.5);
        assert!(bar.is_empty());
    }

    #[test]
    fn test_refresh_renders_and_selects_active() {
        let f = fixture();
        f.bar.refresh();

        assert_eq!(
            f.ops.take(),
            vec![
                Op::Title(Some("Docs".to_string())),
                Op::Reload(vec!["A".into(), "Untitled".into(), "C".into()]),
                Op::Select(1),
                Op::Height(76.5),
            ]
        );
        assert_eq!(f.bar.selected_index(), Some(1));
        assert_eq!(f.bar.title().as_deref(), Some("Docs"));
    }

    #[test]
    fn test_refresh_without_data_source_renders_empty() {
        let f = fixture();
        f.bar.refresh();
        f.bar.clear_data_source();

        f.bar.refresh();

        assert!(f.bar.is_empty());
        assert_eq!(f.bar.title(), None);
        assert_eq!(f.bar.height(), 44.5);
    }

    #[test]
    fn test_refresh_never_emits_intents() {
        let f = fixture();
        f.bar.refresh();
        f.bar.select_tab(2);
        assert!(f.intents.seen.lock().is_empty());
    }

    #[test]
    fn test_select_is_exclusive() {
        let f = fixture();
        f.bar.refresh();
        f.ops.take();

        f.bar.select_tab(0);

        assert_eq!(f.ops.take(), vec![Op::Deselect(1), Op::Select(0)]);
        let selected: Vec<bool> = f.bar.selectors().iter().map(|s| s.selected).collect();
        assert_eq!(selected, vec![true, false, false]);
    }

    #[test]
    #[should_panic]
    fn test_select_out_of_range_panics() {
        let f = fixture();
        f.bar.refresh();
        f.bar.select_tab(3);
    }

    #[test]
    fn test_add_tab_keeps_selection() {
        let f = fixture();
        f.bar.refresh();
        f.ops.take();
        let d = tab(Some("D"));
        f.source.tabs.lock().insert(0, d.clone());

        f.bar.add_tab(0);

        assert_eq!(f.ops.take(), vec![Op::Insert(0, "D".into())]);
        assert_eq!(f.bar.len(), 4);
        assert_eq!(f.bar.selected_index(), Some(2));
        assert_eq!(f.bar.selectors()[0].tab_id, d.id());
    }

    #[test]
    fn test_remove_tab_keeps_selection() {
        let f = fixture();
        f.bar.refresh();
        f.ops.take();

        f.bar.remove_tab(0);

        assert_eq!(f.ops.take(), vec![Op::Delete(0)]);
        assert_eq!(f.bar.selected_index(), Some(0));
    }

    #[test]
    fn test_height_collapses_when_one_tab_left() {
        let f = fixture();
        f.bar.refresh();
        f.bar.remove_tab(2);
        assert_eq!(f.bar.height(), 76.5);

        f.bar.remove_tab(1);
        assert_eq!(f.bar.height(), 44.5);
    }

    #[test]
    fn test_button_groups_are_replaced() {
        let f = fixture();
        f.bar.set_leading_buttons(vec![BarButton::new("a", "A"), BarButton::new("b", "B")]);
        f.bar.set_leading_buttons(vec![BarButton::new("c", "C")]);
        f.bar.set_trailing_buttons(Vec::new());

        assert_eq!(ids(&f.bar.leading_buttons()), vec!["c".to_string()]);
        assert!(f.bar.trailing_buttons().is_empty());
        assert_eq!(
            f.ops.take(),
            vec![
                Op::Leading(vec!["a".into(), "b".into()]),
                Op::Leading(vec!["c".into()]),
                Op::Trailing(Vec::new()),
            ]
        );
    }

    #[test]
    fn test_set_theme_restyles_only() {
        let f = fixture();
        f.bar.refresh();
        f.ops.take();

        f.bar.set_theme(Theme::dark());

        assert_eq!(f.ops.take(), vec![Op::Style]);
        assert_eq!(f.bar.theme(), Theme::dark());
        assert_eq!(f.bar.len(), 3);
    }

    #[test]
    fn test_gestures_emit_intents() {
        let f = fixture();
        f.bar.refresh();

        f.bar.tap_selector(0);
        f.bar.tap_close(2);
        f.bar.drag_selector(0, 2);

        assert_eq!(
            *f.intents.seen.lock(),
            vec![
                Intent::Activate(f.tabs[0].clone()),
                Intent::Close(f.tabs[2].clone()),
                Intent::Swap(0, 2),
            ]
        );
    }

    #[test]
    fn test_gestures_outside_rendered_range_are_ignored() {
        let f = fixture();
        f.bar.refresh();

        f.bar.tap_selector(7);
        f.bar.tap_close(3);
        f.bar.drag_selector(1, 1);
        f.bar.drag_selector(0, 9);

        assert!(f.intents.seen.lock().is_empty());
    }

    #[test]
    fn test_gestures_without_delegate_do_nothing() {
        let f = fixture();
        f.bar.refresh();
        f.bar.clear_delegate();

        f.bar.tap_selector(0);
        assert!(f.intents.seen.lock().is_empty());
    }

    #[test]
    fn test_update_title_only() {
        let f = fixture();
        f.bar.refresh();
        f.ops.take();
        *f.source.title.lock() = Some("Renamed".to_string());

        f.bar.update_title();

        assert_eq!(f.ops.take(), vec![Op::Title(Some("Renamed".to_string()))]);
    }
}
