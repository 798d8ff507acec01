//! Article card carousel blade: news cards in a carousel whose controls
//! appear only when the viewport cannot fit every slide.

use crate::blade::{Blade, Capabilities, Capability, CtaSlot};
use crate::driver::{Driver, ElementHandle};
use crate::locator::Locator;
use crate::result::VitrinaResult;
use std::ops::Deref;

/// Featured-news carousel section.
#[derive(Debug)]
pub struct ArticleCardCarouselBlade<'d, D: Driver> {
    inner: Blade<'d, D>,
}

impl<'d, D: Driver> ArticleCardCarouselBlade<'d, D> {
    /// Capabilities this variant declares
    #[must_use]
    pub fn capabilities() -> Capabilities {
        Capabilities::of([
            Capability::Backdrop,
            Capability::Header,
            Capability::Cta,
            Capability::Carousel,
        ])
    }

    /// Wrap a resolved root element
    #[must_use]
    pub fn new(driver: &'d D, root: ElementHandle) -> Self {
        Self {
            inner: Blade::new(driver, root, Self::capabilities()),
        }
    }

    /// Whether the blade has a title
    pub async fn has_title(&self) -> VitrinaResult<bool> {
        self.exists(&Locator::test_id("title")).await
    }

    /// Title text
    pub async fn title_text(&self) -> VitrinaResult<Option<String>> {
        self.title().await
    }

    /// Whether the tertiary CTA exists
    pub async fn has_tertiary_cta(&self) -> VitrinaResult<bool> {
        self.has_cta(&CtaSlot::Tertiary).await
    }

    /// Tertiary CTA text
    pub async fn tertiary_cta_text(&self) -> VitrinaResult<Option<String>> {
        self.cta_text(&CtaSlot::Tertiary).await
    }

    /// Click the tertiary CTA; reports whether a click happened
    pub async fn click_tertiary_cta(&self) -> VitrinaResult<bool> {
        self.click_cta(&CtaSlot::Tertiary).await
    }

    /// How many slides fit at a viewport width.
    ///
    /// Breakpoints match the site's CSS: desktop (≥1025px) shows three,
    /// tablet (601–1024px) two, phone one.
    #[must_use]
    pub const fn max_visible_slides(viewport_width: u32) -> usize {
        if viewport_width >= 1025 {
            3
        } else if viewport_width >= 601 {
            2
        } else {
            1
        }
    }

    /// Whether controls should render at a viewport width: true exactly when
    /// there are more slides than fit
    pub async fn should_show_controls(&self, viewport_width: u32) -> VitrinaResult<bool> {
        let slide_count = self.slide_count().await?;
        Ok(slide_count > Self::max_visible_slides(viewport_width))
    }

    /// Whether the rendered controls agree with the responsive rule.
    ///
    /// Controls count as shown only when the container both exists and is
    /// rendered; a hidden container is as wrong as a missing one when
    /// controls are expected, and as right when they are not.
    pub async fn controls_display_correct(&self, viewport_width: u32) -> VitrinaResult<bool> {
        let should_show = self.should_show_controls(viewport_width).await?;
        let shown = match self.controls_container().await? {
            None => false,
            Some(container) => self.driver().is_displayed(&container).await?,
        };
        Ok(should_show == shown)
    }
}

impl<'d, D: Driver> Deref for ArticleCardCarouselBlade<'d, D> {
    type Target = Blade<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
