//! Abstract browser automation trait.
//!
//! The verification layer consumes exactly four primitive capabilities from
//! the browser: scoped find-one/find-many, node introspection (text,
//! attribute, tag name, visibility), click, and navigation. Everything else
//! (waits, components, pages) is built on top of this trait.
//!
//! The trait keeps the implementation swappable: [`crate::mock::MockDriver`]
//! runs the full suite against an in-memory DOM; `ChromiumDriver` (behind the
//! `browser` feature) speaks CDP via chromiumoxide.

use crate::locator::Locator;
use crate::result::VitrinaResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Opaque handle to a live DOM node, issued by a driver.
///
/// A handle is only meaningful to the driver that issued it, and only until
/// the next navigation — drivers reject handles that outlive the page they
/// were found on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    id: String,
}

impl ElementHandle {
    /// Create a handle from a driver-issued id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The driver-issued id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Scope within which a lookup is confined
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// The whole document
    Document,
    /// The subtree rooted at an element
    Within(&'a ElementHandle),
}

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Browser configuration for drivers
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Initial viewport
    pub viewport: Viewport,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Timeout for navigation + load-complete
    pub navigation_timeout: Duration,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            chromium_path: None,
            user_agent: None,
            navigation_timeout: Duration::from_secs(30),
            sandbox: true,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set navigation timeout
    #[must_use]
    pub const fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Abstract driver trait for browser automation.
///
/// Every method is one blocking round trip to the browser; callers issue them
/// sequentially within a logical flow. The driver owns the session —
/// components and pages borrow it and must not close it.
///
/// Absence is a normal result: `find` returns `Ok(None)` and `find_all` an
/// empty vector when nothing matches. Errors are reserved for driver-fatal
/// conditions and stale handles.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL
    async fn goto(&self, url: &str) -> VitrinaResult<()>;

    /// Wait until the document reports load-complete, bounded by `timeout`
    async fn wait_for_load(&self, timeout: Duration) -> VitrinaResult<()>;

    /// Find the first element matching `locator` within `scope`, document order
    async fn find(&self, scope: Scope<'_>, locator: &Locator)
        -> VitrinaResult<Option<ElementHandle>>;

    /// Find all elements matching `locator` within `scope`, document order
    async fn find_all(
        &self,
        scope: Scope<'_>,
        locator: &Locator,
    ) -> VitrinaResult<Vec<ElementHandle>>;

    /// Rendered text content of an element (untrimmed)
    async fn text(&self, element: &ElementHandle) -> VitrinaResult<String>;

    /// Attribute value, `None` when the attribute is not present
    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> VitrinaResult<Option<String>>;

    /// Lowercase tag name of an element
    async fn tag_name(&self, element: &ElementHandle) -> VitrinaResult<String>;

    /// Whether the element is rendered with non-zero visual presence
    async fn is_displayed(&self, element: &ElementHandle) -> VitrinaResult<bool>;

    /// Click an element
    async fn click(&self, element: &ElementHandle) -> VitrinaResult<()>;

    /// Current viewport dimensions
    async fn viewport(&self) -> VitrinaResult<Viewport>;

    /// Resize the viewport
    async fn set_viewport(&self, viewport: Viewport) -> VitrinaResult<()>;

    /// Current URL
    async fn current_url(&self) -> VitrinaResult<String>;

    /// Capture a PNG screenshot of the page
    async fn screenshot(&self) -> VitrinaResult<Vec<u8>>;
}
