//! Game masthead blade: hero section with backdrop media, logo, and a
//! primary CTA.

use crate::blade::{Blade, Capabilities, Capability, CtaSlot};
use crate::driver::{Driver, ElementHandle, Scope};
use crate::locator::Locator;
use crate::result::VitrinaResult;
use std::ops::Deref;

/// Hero masthead at the top of the homepage.
#[derive(Debug)]
pub struct MastheadBlade<'d, D: Driver> {
    inner: Blade<'d, D>,
}

impl<'d, D: Driver> MastheadBlade<'d, D> {
    /// Capabilities this variant declares
    #[must_use]
    pub fn capabilities() -> Capabilities {
        Capabilities::of([Capability::Backdrop, Capability::Header, Capability::Cta])
    }

    /// Wrap a resolved root element
    #[must_use]
    pub fn new(driver: &'d D, root: ElementHandle) -> Self {
        Self {
            inner: Blade::new(driver, root, Self::capabilities()),
        }
    }

    fn content_locator() -> Locator {
        Locator::test_id("blade-content")
    }

    fn logo_locator() -> Locator {
        Locator::test_id("masthead-logo")
    }

    /// Whether the content section exists
    pub async fn has_content_section(&self) -> VitrinaResult<bool> {
        self.exists(&Self::content_locator()).await
    }

    /// The content section element
    pub async fn content_section(&self) -> VitrinaResult<Option<ElementHandle>> {
        self.element(&Self::content_locator()).await
    }

    /// Whether the masthead carries a game logo
    pub async fn has_logo(&self) -> VitrinaResult<bool> {
        self.exists(&Self::logo_locator()).await
    }

    /// Whether the logo is rendered
    pub async fn is_logo_visible(&self) -> VitrinaResult<bool> {
        self.is_visible(&Self::logo_locator()).await
    }

    /// H1 title text, scoped inside the blade header.
    ///
    /// An `h1` elsewhere in the blade does not count; `None` when the header
    /// or the `h1` is missing.
    pub async fn h1_title(&self) -> VitrinaResult<Option<String>> {
        let Some(header) = self.header_element().await? else {
            return Ok(None);
        };
        let Some(h1) = self
            .driver()
            .find(Scope::Within(&header), &Locator::tag("h1"))
            .await?
        else {
            return Ok(None);
        };
        let text = self.driver().text(&h1).await?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Whether the primary CTA exists
    pub async fn has_primary_cta(&self) -> VitrinaResult<bool> {
        self.has_cta(&CtaSlot::Primary).await
    }

    /// Primary CTA text
    pub async fn primary_cta_text(&self) -> VitrinaResult<Option<String>> {
        self.cta_text(&CtaSlot::Primary).await
    }

    /// Whether the primary CTA is rendered
    pub async fn is_primary_cta_visible(&self) -> VitrinaResult<bool> {
        self.is_cta_visible(&CtaSlot::Primary).await
    }

    /// Click the primary CTA; reports whether a click happened
    pub async fn click_primary_cta(&self) -> VitrinaResult<bool> {
        self.click_cta(&CtaSlot::Primary).await
    }
}

impl<'d, D: Driver> Deref for MastheadBlade<'d, D> {
    type Target = Blade<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
