//! Mock driver backed by an in-memory DOM tree.
//!
//! Unit and integration tests run the full component layer against this
//! driver: lookups are scoped to real subtrees (so scope isolation is
//! actually exercised), handles go stale across navigations, and registered
//! click effects let a fixture react to interaction the way a rendered page
//! would (e.g. a tab click swapping the media panel's title).

use crate::driver::{Driver, ElementHandle, Scope, Viewport};
use crate::locator::{Locator, Strategy};
use crate::result::{VitrinaError, VitrinaResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// A node in the mock DOM tree
#[derive(Debug, Clone, Default)]
pub struct MockNode {
    tag: String,
    id: Option<String>,
    test_id: Option<String>,
    classes: Vec<String>,
    text: String,
    attributes: HashMap<String, String>,
    displayed: bool,
    children: Vec<MockNode>,
}

impl MockNode {
    /// Create a displayed node with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            displayed: true,
            ..Self::default()
        }
    }

    /// Set the element id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the `data-testid` attribute
    #[must_use]
    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    /// Add a class
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the node's own text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Mark the node as not rendered
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Append a child
    #[must_use]
    pub fn with_child(mut self, child: MockNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = MockNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Mutable access to the node's own text (for click effects)
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Set or replace an attribute (for click effects)
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Stop rendering this node (for click effects that dismiss overlays)
    pub fn hide(&mut self) {
        self.displayed = false;
    }

    /// First descendant (preorder) matching `locator`, mutable
    pub fn find_mut(&mut self, locator: &Locator) -> Option<&mut MockNode> {
        for child in &mut self.children {
            if child.matches(locator) {
                return Some(child);
            }
            if let Some(found) = child.find_mut(locator) {
                return Some(found);
            }
        }
        None
    }

    fn matches(&self, locator: &Locator) -> bool {
        match locator.strategy() {
            Strategy::Id => self.id.as_deref() == Some(locator.value()),
            Strategy::TestId => self.test_id.as_deref() == Some(locator.value()),
            Strategy::TestIdContains => self
                .test_id
                .as_deref()
                .is_some_and(|t| t.contains(locator.value())),
            Strategy::TagName => self.tag == locator.value(),
            Strategy::ClassName => self.classes.iter().any(|c| c == locator.value()),
            // Css is normalized to one of the simple strategies before matching
            Strategy::Css => false,
        }
    }

    /// Rendered text: own text plus displayed descendants', document order
    fn rendered_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        if !self.displayed {
            return;
        }
        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }

    fn at_path(&self, path: &[usize]) -> Option<&MockNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Collect paths of matching descendants in preorder
    fn collect_matches(&self, locator: &Locator, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        for (index, child) in self.children.iter().enumerate() {
            prefix.push(index);
            if child.matches(locator) {
                out.push(prefix.clone());
            }
            child.collect_matches(locator, prefix, out);
            prefix.pop();
        }
    }

    /// Whether the node and all its ancestors on `path` are displayed
    fn displayed_at(&self, path: &[usize]) -> Option<bool> {
        let mut node = self;
        let mut visible = node.displayed;
        for &index in path {
            node = node.children.get(index)?;
            visible = visible && node.displayed;
        }
        Some(visible)
    }
}

type ClickEffect = Box<dyn Fn(&mut MockNode) + Send + Sync>;

struct MockState {
    document: MockNode,
    url: String,
    viewport: Viewport,
    epoch: u64,
    history: Vec<String>,
    click_effects: Vec<(Locator, usize, ClickEffect)>,
}

/// Mock driver for unit and integration testing
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl std::fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDriver").finish_non_exhaustive()
    }
}

impl MockDriver {
    /// Create a driver over a document tree
    #[must_use]
    pub fn new(document: MockNode) -> Self {
        Self {
            state: Mutex::new(MockState {
                document,
                url: String::from("about:blank"),
                viewport: Viewport::default(),
                epoch: 0,
                history: Vec::new(),
                click_effects: Vec::new(),
            }),
        }
    }

    /// Register an effect applied to the document when the `index`-th match
    /// of `locator` (document order) is clicked.
    pub fn add_click_effect(
        &self,
        locator: Locator,
        index: usize,
        effect: impl Fn(&mut MockNode) + Send + Sync + 'static,
    ) {
        let mut state = self.lock();
        state.click_effects.push((locator, index, Box::new(effect)));
    }

    /// Replace the document tree (simulating a different rendered page)
    pub fn set_document(&self, document: MockNode) {
        let mut state = self.lock();
        state.document = document;
        state.epoch += 1;
    }

    /// Whether a driver method was invoked (prefix match on the call log)
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.lock().history.iter().any(|c| c.starts_with(method))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(epoch: u64, path: &[usize]) -> ElementHandle {
        let joined = path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        ElementHandle::new(format!("{epoch}:{joined}"))
    }

    fn parse_handle(state: &MockState, element: &ElementHandle) -> VitrinaResult<Vec<usize>> {
        let raw = element.id();
        let (epoch, path) = raw.split_once(':').ok_or_else(|| VitrinaError::PageError {
            message: format!("malformed mock handle {raw}"),
        })?;
        if epoch.parse::<u64>().ok() != Some(state.epoch) {
            return Err(VitrinaError::StaleElement {
                handle: raw.to_string(),
            });
        }
        if path.is_empty() {
            return Ok(Vec::new());
        }
        path.split('.')
            .map(|part| {
                part.parse::<usize>().map_err(|_| VitrinaError::PageError {
                    message: format!("malformed mock handle {raw}"),
                })
            })
            .collect()
    }

    /// Translate raw CSS into one of the simple strategies the mock matches
    fn normalize(locator: &Locator) -> VitrinaResult<Locator> {
        if locator.strategy() != &Strategy::Css {
            return Ok(locator.clone());
        }
        let value = locator.value();
        if let Some(rest) = value.strip_prefix('#') {
            return Ok(Locator::id(rest));
        }
        if let Some(rest) = value.strip_prefix('.') {
            return Ok(Locator::class_name(rest));
        }
        if let Some(inner) = value
            .strip_prefix("[data-testid='")
            .and_then(|v| v.strip_suffix("']"))
        {
            return Ok(Locator::test_id(inner));
        }
        if let Some(inner) = value
            .strip_prefix("[data-testid*='")
            .and_then(|v| v.strip_suffix("']"))
        {
            return Ok(Locator::test_id_contains(inner));
        }
        if value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Ok(Locator::tag(value));
        }
        Err(VitrinaError::UnsupportedSelector {
            selector: value.to_string(),
        })
    }

    fn scope_path(state: &MockState, scope: Scope<'_>) -> VitrinaResult<Vec<usize>> {
        match scope {
            Scope::Document => Ok(Vec::new()),
            Scope::Within(element) => Self::parse_handle(state, element),
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> VitrinaResult<()> {
        let mut state = self.lock();
        state.history.push(format!("goto:{url}"));
        state.url = url.to_string();
        state.epoch += 1;
        Ok(())
    }

    async fn wait_for_load(&self, _timeout: Duration) -> VitrinaResult<()> {
        self.lock().history.push("wait_for_load".to_string());
        Ok(())
    }

    async fn find(
        &self,
        scope: Scope<'_>,
        locator: &Locator,
    ) -> VitrinaResult<Option<ElementHandle>> {
        Ok(self.find_all(scope, locator).await?.into_iter().next())
    }

    async fn find_all(
        &self,
        scope: Scope<'_>,
        locator: &Locator,
    ) -> VitrinaResult<Vec<ElementHandle>> {
        let state = self.lock();
        let normalized = Self::normalize(locator)?;
        let scope_path = Self::scope_path(&state, scope)?;
        let root = state
            .document
            .at_path(&scope_path)
            .ok_or_else(|| VitrinaError::PageError {
                message: format!("mock scope {scope_path:?} vanished"),
            })?;

        let mut matches = Vec::new();
        let mut prefix = scope_path.clone();
        root.collect_matches(&normalized, &mut prefix, &mut matches);
        Ok(matches
            .iter()
            .map(|path| Self::handle(state.epoch, path))
            .collect())
    }

    async fn text(&self, element: &ElementHandle) -> VitrinaResult<String> {
        let state = self.lock();
        let path = Self::parse_handle(&state, element)?;
        let node = state
            .document
            .at_path(&path)
            .ok_or_else(|| VitrinaError::PageError {
                message: format!("mock node {path:?} vanished"),
            })?;
        Ok(node.rendered_text())
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> VitrinaResult<Option<String>> {
        let state = self.lock();
        let path = Self::parse_handle(&state, element)?;
        let node = state
            .document
            .at_path(&path)
            .ok_or_else(|| VitrinaError::PageError {
                message: format!("mock node {path:?} vanished"),
            })?;
        match name {
            "id" => Ok(node.id.clone()),
            "data-testid" => Ok(node.test_id.clone()),
            "class" if !node.classes.is_empty() => Ok(Some(node.classes.join(" "))),
            _ => Ok(node.attributes.get(name).cloned()),
        }
    }

    async fn tag_name(&self, element: &ElementHandle) -> VitrinaResult<String> {
        let state = self.lock();
        let path = Self::parse_handle(&state, element)?;
        let node = state
            .document
            .at_path(&path)
            .ok_or_else(|| VitrinaError::PageError {
                message: format!("mock node {path:?} vanished"),
            })?;
        Ok(node.tag.clone())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> VitrinaResult<bool> {
        let state = self.lock();
        let path = Self::parse_handle(&state, element)?;
        state
            .document
            .displayed_at(&path)
            .ok_or_else(|| VitrinaError::PageError {
                message: format!("mock node {path:?} vanished"),
            })
    }

    async fn click(&self, element: &ElementHandle) -> VitrinaResult<()> {
        let mut state = self.lock();
        let path = Self::parse_handle(&state, element)?;
        state.history.push(format!("click:{}", element.id()));

        // Resolve which registered effect (if any) this click triggers,
        // then apply it against the whole document.
        let mut triggered = Vec::new();
        for (i, (locator, index, _)) in state.click_effects.iter().enumerate() {
            let normalized = Self::normalize(locator)?;
            let mut matches = Vec::new();
            let mut prefix = Vec::new();
            state
                .document
                .collect_matches(&normalized, &mut prefix, &mut matches);
            if matches.get(*index) == Some(&path) {
                triggered.push(i);
            }
        }
        for i in triggered {
            // split borrow: take the effect out, run it, put it back
            let (locator, index, effect) = state.click_effects.remove(i);
            effect(&mut state.document);
            state.click_effects.insert(i, (locator, index, effect));
        }
        Ok(())
    }

    async fn viewport(&self) -> VitrinaResult<Viewport> {
        Ok(self.lock().viewport)
    }

    async fn set_viewport(&self, viewport: Viewport) -> VitrinaResult<()> {
        let mut state = self.lock();
        state.history.push(format!(
            "set_viewport:{}x{}",
            viewport.width, viewport.height
        ));
        state.viewport = viewport;
        Ok(())
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        Ok(self.lock().url.clone())
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        self.lock().history.push("screenshot".to_string());
        Ok(Vec::new())
    }
}
