//! Icon tab blade: a tab strip rendered as a carousel, bound to a media
//! panel that re-renders when the selection changes.
//!
//! The tabs are the carousel slides; their labels live on `.icon-tab-label`
//! descendants in the same document order. Selection is validated before any
//! click reaches the driver, so a bad index or label never disturbs page
//! state.

use crate::blade::{Blade, Capabilities, Capability};
use crate::driver::{Driver, ElementHandle};
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use std::ops::Deref;

/// Tabbed panel section (e.g. "Choose your champion").
#[derive(Debug)]
pub struct IconTabBlade<'d, D: Driver> {
    inner: Blade<'d, D>,
}

impl<'d, D: Driver> IconTabBlade<'d, D> {
    /// Capabilities this variant declares
    #[must_use]
    pub fn capabilities() -> Capabilities {
        Capabilities::of([
            Capability::Backdrop,
            Capability::Header,
            Capability::Cta,
            Capability::Carousel,
            Capability::MediaPanel,
            Capability::Tabs,
        ])
    }

    /// Wrap a resolved root element
    #[must_use]
    pub fn new(driver: &'d D, root: ElementHandle) -> Self {
        Self {
            inner: Blade::new(driver, root, Self::capabilities()),
        }
    }

    fn tab_label_locator() -> Locator {
        Locator::class_name("icon-tab-label")
    }

    fn media_locator() -> Locator {
        Locator::test_id("icon-tab-media")
    }

    // Section checks

    /// Whether the main (tabs) section exists
    pub async fn has_main_section(&self) -> VitrinaResult<bool> {
        self.exists(&Locator::class_name("icon-tab--main")).await
    }

    /// Whether the media section exists
    pub async fn has_media_section(&self) -> VitrinaResult<bool> {
        self.exists(&Locator::class_name("icon-tab--media")).await
    }

    /// Whether the centered header links section exists
    pub async fn has_header_links(&self) -> VitrinaResult<bool> {
        self.exists(&Locator::class_name("icon-tab-header-centered-links"))
            .await
    }

    // Icon-tab-specific backdrop layers (class-based, unlike the generic
    // test-id backdrop contract)

    /// Whether the main backdrop layer exists
    pub async fn has_main_backdrop(&self) -> VitrinaResult<bool> {
        self.exists(&Locator::class_name("icon-tab--backdrop-main"))
            .await
    }

    /// Whether the full-background backdrop layer exists
    pub async fn has_full_backdrop_background(&self) -> VitrinaResult<bool> {
        self.exists(&Locator::class_name("icon-tab--backdrop-full-background"))
            .await
    }

    // Tab strip

    /// All tab label texts, document order. Labels are trimmed; an empty
    /// label is kept as an empty string so indices stay aligned with slides.
    pub async fn tab_labels(&self) -> VitrinaResult<Vec<String>> {
        let mut labels = Vec::new();
        for element in self.elements(&Self::tab_label_locator()).await? {
            let text = self.driver().text(&element).await?;
            labels.push(text.trim().to_string());
        }
        Ok(labels)
    }

    /// Number of tabs (slides in the tab carousel)
    pub async fn tab_count(&self) -> VitrinaResult<usize> {
        self.slide_count().await
    }

    /// Click the tab at `index`.
    ///
    /// The index is validated against the live tab count before any click is
    /// issued; out of range fails without touching page state.
    pub async fn select_tab(&self, index: usize) -> VitrinaResult<()> {
        let tabs = self.slides().await?;
        let Some(tab) = tabs.get(index) else {
            return Err(VitrinaError::TabIndexOutOfRange {
                index,
                count: tabs.len(),
            });
        };
        tracing::debug!(index, count = tabs.len(), "selecting tab");
        self.driver().click(tab).await
    }

    /// Click the tab whose label matches `label`, ASCII-case-insensitively.
    ///
    /// The error on a miss enumerates the labels actually present.
    pub async fn select_tab_by_label(&self, label: &str) -> VitrinaResult<()> {
        let labels = self.tab_labels().await?;
        let wanted = label.trim();
        match labels.iter().position(|l| l.eq_ignore_ascii_case(wanted)) {
            Some(index) => self.select_tab(index).await,
            None => Err(VitrinaError::TabLabelNotFound {
                label: label.to_string(),
                available: labels,
            }),
        }
    }

    // Media panel

    /// Whether the media element exists
    pub async fn has_media_element(&self) -> VitrinaResult<bool> {
        self.exists(&Self::media_locator()).await
    }

    /// Whether the media element is rendered
    pub async fn is_media_element_visible(&self) -> VitrinaResult<bool> {
        self.is_visible(&Self::media_locator()).await
    }

    /// Media panel title text
    pub async fn media_title(&self) -> VitrinaResult<Option<String>> {
        self.text_of(&Locator::class_name("icon-tab-media-title"))
            .await
    }

    /// Media panel subtitle text
    pub async fn media_subtitle(&self) -> VitrinaResult<Option<String>> {
        self.text_of(&Locator::class_name("icon-tab-media-subtitle"))
            .await
    }

    /// Media panel description rich text
    pub async fn media_description(&self) -> VitrinaResult<Option<String>> {
        self.text_of(&Locator::class_name("icon-tab-media-description"))
            .await
    }

    /// Whether the media panel changed relative to a prior observation.
    ///
    /// Re-reads title and subtitle from the live DOM and compares against
    /// the values captured before the interaction. A panel that went from
    /// present to absent (or vice versa) counts as changed.
    pub async fn media_changed(
        &self,
        previous_title: Option<&str>,
        previous_subtitle: Option<&str>,
    ) -> VitrinaResult<bool> {
        let title = self.media_title().await?;
        let subtitle = self.media_subtitle().await?;
        Ok(title.as_deref() != previous_title || subtitle.as_deref() != previous_subtitle)
    }
}

impl<'d, D: Driver> Deref for IconTabBlade<'d, D> {
    type Target = Blade<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
