//! Bounded-polling wait primitives.
//!
//! Every wait takes its timeout as an explicit, per-call parameter — there is
//! no ambient driver-wide timeout. On expiry the wait fails with
//! [`crate::VitrinaError::WaitTimeout`] carrying the locator and the bound,
//! rather than hanging. There is no cancellation beyond the timeout itself.

use crate::driver::{Driver, ElementHandle, Scope};
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Condition an awaited element must reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// Element exists in the DOM
    Present,
    /// Element exists and is rendered
    Visible,
    /// Element is rendered and carries no `disabled` attribute
    Clickable,
}

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll within `scope` until an element matching `locator` reaches `until`.
///
/// The condition is checked at least once even with a zero timeout. Driver
/// errors abort the wait immediately; absence keeps polling until the bound.
pub async fn wait_for<D: Driver + ?Sized>(
    driver: &D,
    scope: Scope<'_>,
    locator: &Locator,
    until: WaitUntil,
    options: &WaitOptions,
) -> VitrinaResult<ElementHandle> {
    let deadline = Instant::now() + options.timeout();

    loop {
        if let Some(element) = driver.find(scope, locator).await? {
            let satisfied = match until {
                WaitUntil::Present => true,
                WaitUntil::Visible => driver.is_displayed(&element).await?,
                WaitUntil::Clickable => {
                    driver.is_displayed(&element).await?
                        && driver.attribute(&element, "disabled").await?.is_none()
                }
            };
            if satisfied {
                return Ok(element);
            }
        }

        if Instant::now() >= deadline {
            tracing::debug!(locator = %locator, timeout_ms = options.timeout_ms, "wait expired");
            return Err(VitrinaError::WaitTimeout {
                locator: locator.to_string(),
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Poll within `scope` until no element matching `locator` is rendered.
///
/// Succeeds when the element is absent or present-but-hidden. Used for
/// overlays (cookie banners, alert bars) that animate out after dismissal.
pub async fn wait_until_hidden<D: Driver + ?Sized>(
    driver: &D,
    scope: Scope<'_>,
    locator: &Locator,
    options: &WaitOptions,
) -> VitrinaResult<()> {
    let deadline = Instant::now() + options.timeout();

    loop {
        let hidden = match driver.find(scope, locator).await? {
            None => true,
            Some(element) => !driver.is_displayed(&element).await?,
        };
        if hidden {
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(VitrinaError::WaitTimeout {
                locator: locator.to_string(),
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let options = WaitOptions::default();
            assert_eq!(options.timeout_ms, 10_000);
            assert_eq!(options.poll_interval_ms, 50);
        }

        #[test]
        fn test_builders() {
            let options = WaitOptions::new().with_timeout(2000).with_poll_interval(25);
            assert_eq!(options.timeout(), Duration::from_millis(2000));
            assert_eq!(options.poll_interval(), Duration::from_millis(25));
        }
    }
}
