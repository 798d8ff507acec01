//! Media promo blade: heading block, links, and a lazily-loaded featured
//! media element.

use crate::blade::{Blade, Capabilities, Capability, CtaSlot};
use crate::driver::{Driver, ElementHandle, Scope};
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{wait_for, WaitOptions, WaitUntil};
use std::ops::Deref;

/// Promo section pairing editorial copy with one featured media asset.
#[derive(Debug)]
pub struct MediaPromoBlade<'d, D: Driver> {
    inner: Blade<'d, D>,
}

impl<'d, D: Driver> MediaPromoBlade<'d, D> {
    /// Capabilities this variant declares
    #[must_use]
    pub fn capabilities() -> Capabilities {
        Capabilities::of([
            Capability::Backdrop,
            Capability::Header,
            Capability::Cta,
            Capability::MediaPanel,
        ])
    }

    /// Wrap a resolved root element
    #[must_use]
    pub fn new(driver: &'d D, root: ElementHandle) -> Self {
        Self {
            inner: Blade::new(driver, root, Self::capabilities()),
        }
    }

    fn heading_locator() -> Locator {
        Locator::class_name("mediapromo-heading")
    }

    fn links_locator() -> Locator {
        Locator::test_id("mediapromo-links")
    }

    fn featured_media_locator() -> Locator {
        Locator::test_id("featured-media")
    }

    fn primary_cta_slot() -> CtaSlot {
        CtaSlot::Custom(Locator::test_id("header-primary-cta"))
    }

    /// Whether the heading block exists
    pub async fn has_heading(&self) -> VitrinaResult<bool> {
        self.exists(&Self::heading_locator()).await
    }

    /// Supertitle text on the `mediapromo-supertitle` hook
    pub async fn supertitle(&self) -> VitrinaResult<Option<String>> {
        self.text_of(&Locator::test_id("mediapromo-supertitle"))
            .await
    }

    /// Title text on the `mediapromo-title` hook
    pub async fn title_text(&self) -> VitrinaResult<Option<String>> {
        self.text_of(&Locator::test_id("mediapromo-title")).await
    }

    /// Description rich text on the `mediapromo-description` hook
    pub async fn description_text(&self) -> VitrinaResult<Option<String>> {
        self.text_of(&Locator::test_id("mediapromo-description"))
            .await
    }

    /// Whether the links section exists
    pub async fn has_links_section(&self) -> VitrinaResult<bool> {
        self.exists(&Self::links_locator()).await
    }

    /// Whether the header primary CTA exists
    pub async fn has_primary_cta(&self) -> VitrinaResult<bool> {
        self.has_cta(&Self::primary_cta_slot()).await
    }

    /// Whether the header primary CTA is rendered
    pub async fn is_primary_cta_visible(&self) -> VitrinaResult<bool> {
        self.is_cta_visible(&Self::primary_cta_slot()).await
    }

    /// Header primary CTA text
    pub async fn primary_cta_text(&self) -> VitrinaResult<Option<String>> {
        self.cta_text(&Self::primary_cta_slot()).await
    }

    /// Whether the featured media element exists
    pub async fn has_featured_media(&self) -> VitrinaResult<bool> {
        self.exists(&Self::featured_media_locator()).await
    }

    /// The featured media element
    pub async fn featured_media(&self) -> VitrinaResult<Option<ElementHandle>> {
        self.element(&Self::featured_media_locator()).await
    }

    /// Whether the featured media is an `<img>`
    pub async fn featured_media_is_image(&self) -> VitrinaResult<bool> {
        match self.featured_media().await? {
            None => Ok(false),
            Some(media) => Ok(self.driver().tag_name(&media).await? == "img"),
        }
    }

    /// Whether the featured media becomes visible within the bound.
    ///
    /// The asset lazy-loads, so this polls until rendered. Expiry reports
    /// `false`; other driver errors propagate.
    pub async fn is_featured_media_visible(&self, options: &WaitOptions) -> VitrinaResult<bool> {
        let result = wait_for(
            self.driver(),
            Scope::Within(self.root()),
            &Self::featured_media_locator(),
            WaitUntil::Visible,
            options,
        )
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(VitrinaError::WaitTimeout { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }
}

impl<'d, D: Driver> Deref for MediaPromoBlade<'d, D> {
    type Target = Blade<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
