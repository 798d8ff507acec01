//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur in Vitrina
///
/// Absence of an optional element is never an error: every query against a
/// variant-specific element returns `Ok(false)` / `Ok(None)` when nothing
/// matches. The variants below cover the remaining taxonomy: bounded waits
/// that expire, bad caller input (tab index/label), stale handles, and
/// driver-fatal conditions that propagate uncaught.
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error (driver-level failure while querying the page)
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A bounded wait expired before its condition held
    #[error("Wait for {locator} timed out after {ms}ms")]
    WaitTimeout {
        /// The locator that was awaited
        locator: String,
        /// Timeout bound in milliseconds
        ms: u64,
    },

    /// Element handle reused after a navigation invalidated it
    #[error("Stale element handle {handle}: page navigated since it was obtained")]
    StaleElement {
        /// The stale handle id
        handle: String,
    },

    /// Tab index outside the valid range
    #[error("Tab index {index} out of range (0..{count})")]
    TabIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of tabs present
        count: usize,
    },

    /// Tab label not matching any rendered tab
    #[error("Tab label {label:?} not found (available: {available:?})")]
    TabLabelNotFound {
        /// Requested label
        label: String,
        /// Labels actually rendered, document order
        available: Vec<String>,
    },

    /// CTA slot clicked while absent, under `ClickPolicy::FailOnAbsent`
    #[error("CTA slot {slot} is absent")]
    CtaAbsent {
        /// The slot that was clicked
        slot: String,
    },

    /// Selector form the driver cannot evaluate
    #[error("Unsupported selector: {selector}")]
    UnsupportedSelector {
        /// The rejected selector
        selector: String,
    },
}
