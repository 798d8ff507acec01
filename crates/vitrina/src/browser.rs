//! Real browser driver over the Chrome `DevTools` Protocol.
//!
//! Compiled behind the `browser` feature. [`ChromiumDriver`] launches a
//! chromium instance via chromiumoxide, opens one page, and implements
//! [`Driver`] on top of it. Element handles are epoch-stamped uuids mapped to
//! live CDP element references; a navigation bumps the epoch and drops the
//! map, so handles from a previous page fail with a stale-element error
//! instead of operating on the wrong DOM.

use crate::driver::{Driver, DriverConfig, ElementHandle, Scope, Viewport};
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::element::Element as CdpElement;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

const READY_STATE_POLL: Duration = Duration::from_millis(100);

/// CDP-backed driver owning one browser and one page.
pub struct ChromiumDriver {
    config: DriverConfig,
    browser: Arc<Mutex<CdpBrowser>>,
    page: Arc<Mutex<CdpPage>>,
    elements: Mutex<HashMap<String, CdpElement>>,
    epoch: AtomicU64,
    viewport: Mutex<Viewport>,
    #[allow(dead_code)]
    handler: tokio::task::JoinHandle<()>,
}

impl std::fmt::Debug for ChromiumDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromiumDriver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChromiumDriver {
    /// Launch chromium and open a blank page.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::BrowserLaunchError`] when the binary cannot be
    /// started and [`VitrinaError::PageError`] when the initial page fails.
    pub async fn launch(config: DriverConfig) -> VitrinaResult<Self> {
        let mut builder = CdpConfig::builder().window_size(
            config.viewport.width,
            config.viewport.height,
        );

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            if !std::path::Path::new(path).exists() {
                return Err(VitrinaError::BrowserNotFound);
            }
            builder = builder.chrome_executable(path);
        }
        if let Some(ref ua) = config.user_agent {
            builder = builder.arg(format!("--user-agent={ua}"));
        }

        let cdp_config = builder
            .build()
            .map_err(|e| VitrinaError::BrowserLaunchError { message: e })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| VitrinaError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        // Drain CDP events until the connection drops
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| VitrinaError::PageError {
                message: e.to_string(),
            })?;

        let viewport = config.viewport;
        let driver = Self {
            config,
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            elements: Mutex::new(HashMap::new()),
            epoch: AtomicU64::new(0),
            viewport: Mutex::new(viewport),
            handler,
        };
        driver.apply_viewport(viewport).await?;
        Ok(driver)
    }

    /// The driver's configuration
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Close the browser
    pub async fn close(self) -> VitrinaResult<()> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| VitrinaError::BrowserLaunchError {
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn register(&self, element: CdpElement) -> ElementHandle {
        let epoch = self.epoch.load(Ordering::SeqCst);
        let id = format!("{epoch}:{}", Uuid::new_v4());
        self.elements.lock().await.insert(id.clone(), element);
        ElementHandle::new(id)
    }

    async fn resolve(&self, handle: &ElementHandle) -> VitrinaResult<CdpElement> {
        let current = self.epoch.load(Ordering::SeqCst);
        let stale = || VitrinaError::StaleElement {
            handle: handle.id().to_string(),
        };
        let (epoch, _) = handle.id().split_once(':').ok_or_else(stale)?;
        if epoch.parse::<u64>().ok() != Some(current) {
            return Err(stale());
        }
        self.elements
            .lock()
            .await
            .get(handle.id())
            .cloned()
            .ok_or_else(stale)
    }

    async fn query_all(&self, scope: Scope<'_>, locator: &Locator) -> VitrinaResult<Vec<CdpElement>> {
        let css = locator.to_css();
        let found = match scope {
            Scope::Document => {
                let page = self.page.lock().await;
                page.find_elements(&css).await
            }
            Scope::Within(root) => {
                let parent = self.resolve(root).await?;
                parent.find_elements(&css).await
            }
        };
        // chromiumoxide reports an empty match set as an error; treat it as absence
        match found {
            Ok(elements) => Ok(elements),
            Err(chromiumoxide::error::CdpError::NotFound) => Ok(Vec::new()),
            Err(e) => Err(VitrinaError::PageError {
                message: e.to_string(),
            }),
        }
    }

    async fn eval_on<T: serde::de::DeserializeOwned>(
        &self,
        element: &CdpElement,
        function: &str,
    ) -> VitrinaResult<T> {
        let returned =
            element
                .call_js_fn(function, false)
                .await
                .map_err(|e| VitrinaError::PageError {
                    message: e.to_string(),
                })?;
        let value = returned
            .result
            .value
            .ok_or_else(|| VitrinaError::PageError {
                message: "evaluation returned no value".to_string(),
            })?;
        serde_json::from_value(value).map_err(|e| VitrinaError::PageError {
            message: e.to_string(),
        })
    }

    async fn apply_viewport(&self, viewport: Viewport) -> VitrinaResult<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(viewport.width))
            .height(i64::from(viewport.height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(|e| VitrinaError::PageError { message: e })?;
        let page = self.page.lock().await;
        page.execute(params)
            .await
            .map_err(|e| VitrinaError::PageError {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn goto(&self, url: &str) -> VitrinaResult<()> {
        tracing::info!(url, "navigating");
        {
            let page = self.page.lock().await;
            page.goto(url)
                .await
                .map_err(|e| VitrinaError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        }
        // Handles from the previous page are now meaningless
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.elements.lock().await.clear();
        Ok(())
    }

    async fn wait_for_load(&self, timeout: Duration) -> VitrinaResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let state: String = {
                let page = self.page.lock().await;
                page.evaluate("document.readyState")
                    .await
                    .map_err(|e| VitrinaError::PageError {
                        message: e.to_string(),
                    })?
                    .into_value()
                    .map_err(|e| VitrinaError::PageError {
                        message: e.to_string(),
                    })?
            };
            if state == "complete" {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(VitrinaError::WaitTimeout {
                    locator: "document.readyState".to_string(),
                    ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            tokio::time::sleep(READY_STATE_POLL).await;
        }
    }

    async fn find(
        &self,
        scope: Scope<'_>,
        locator: &Locator,
    ) -> VitrinaResult<Option<ElementHandle>> {
        let mut found = self.query_all(scope, locator).await?;
        if found.is_empty() {
            return Ok(None);
        }
        let handle = self.register(found.remove(0)).await;
        Ok(Some(handle))
    }

    async fn find_all(
        &self,
        scope: Scope<'_>,
        locator: &Locator,
    ) -> VitrinaResult<Vec<ElementHandle>> {
        let found = self.query_all(scope, locator).await?;
        let mut handles = Vec::with_capacity(found.len());
        for element in found {
            handles.push(self.register(element).await);
        }
        Ok(handles)
    }

    async fn text(&self, element: &ElementHandle) -> VitrinaResult<String> {
        let cdp = self.resolve(element).await?;
        let text = cdp
            .inner_text()
            .await
            .map_err(|e| VitrinaError::PageError {
                message: e.to_string(),
            })?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> VitrinaResult<Option<String>> {
        let cdp = self.resolve(element).await?;
        cdp.attribute(name)
            .await
            .map_err(|e| VitrinaError::PageError {
                message: e.to_string(),
            })
    }

    async fn tag_name(&self, element: &ElementHandle) -> VitrinaResult<String> {
        let cdp = self.resolve(element).await?;
        self.eval_on(&cdp, "function() { return this.tagName.toLowerCase(); }")
            .await
    }

    async fn is_displayed(&self, element: &ElementHandle) -> VitrinaResult<bool> {
        let cdp = self.resolve(element).await?;
        self.eval_on(
            &cdp,
            "function() { \
                const rect = this.getBoundingClientRect(); \
                const style = window.getComputedStyle(this); \
                return rect.width > 0 && rect.height > 0 \
                    && style.visibility !== 'hidden' \
                    && style.display !== 'none'; \
            }",
        )
        .await
    }

    async fn click(&self, element: &ElementHandle) -> VitrinaResult<()> {
        let cdp = self.resolve(element).await?;
        cdp.click().await.map_err(|e| VitrinaError::PageError {
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn viewport(&self) -> VitrinaResult<Viewport> {
        Ok(*self.viewport.lock().await)
    }

    async fn set_viewport(&self, viewport: Viewport) -> VitrinaResult<()> {
        self.apply_viewport(viewport).await?;
        *self.viewport.lock().await = viewport;
        Ok(())
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        let page = self.page.lock().await;
        let url = page.url().await.map_err(|e| VitrinaError::PageError {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_default())
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let page = self.page.lock().await;
        let captured = page
            .execute(params)
            .await
            .map_err(|e| VitrinaError::PageError {
                message: e.to_string(),
            })?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&captured.data)
            .map_err(|e| VitrinaError::PageError {
                message: e.to_string(),
            })
    }
}
