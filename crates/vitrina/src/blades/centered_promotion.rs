//! Centered promotion blade: a links section and a single promoted CTA.

use crate::blade::{Blade, Capabilities, Capability, CtaSlot};
use crate::driver::{Driver, ElementHandle};
use crate::locator::Locator;
use crate::result::VitrinaResult;
use std::ops::Deref;

/// Bottom-of-page promotion with one centered call to action.
#[derive(Debug)]
pub struct CenteredPromotionBlade<'d, D: Driver> {
    inner: Blade<'d, D>,
}

impl<'d, D: Driver> CenteredPromotionBlade<'d, D> {
    /// Capabilities this variant declares
    #[must_use]
    pub fn capabilities() -> Capabilities {
        Capabilities::of([Capability::Header, Capability::Cta])
    }

    /// Wrap a resolved root element
    #[must_use]
    pub fn new(driver: &'d D, root: ElementHandle) -> Self {
        Self {
            inner: Blade::new(driver, root, Self::capabilities()),
        }
    }

    fn links_locator() -> Locator {
        Locator::test_id("links")
    }

    // The promoted CTA renders on the indexed hook, not cta-primary
    fn primary_cta_slot() -> CtaSlot {
        CtaSlot::Custom(Locator::test_id("cta-0"))
    }

    /// Whether the links section exists
    pub async fn has_links_section(&self) -> VitrinaResult<bool> {
        self.exists(&Self::links_locator()).await
    }

    /// Whether the promoted CTA exists
    pub async fn has_primary_cta(&self) -> VitrinaResult<bool> {
        self.has_cta(&Self::primary_cta_slot()).await
    }

    /// Promoted CTA text
    pub async fn primary_cta_text(&self) -> VitrinaResult<Option<String>> {
        self.cta_text(&Self::primary_cta_slot()).await
    }

    /// Whether the promoted CTA is rendered
    pub async fn is_primary_cta_visible(&self) -> VitrinaResult<bool> {
        self.is_cta_visible(&Self::primary_cta_slot()).await
    }

    /// Click the promoted CTA; reports whether a click happened
    pub async fn click_primary_cta(&self) -> VitrinaResult<bool> {
        self.click_cta(&Self::primary_cta_slot()).await
    }
}

impl<'d, D: Driver> Deref for CenteredPromotionBlade<'d, D> {
    type Target = Blade<'d, D>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::Scope;
    use crate::mock::{MockDriver, MockNode};

    fn promotion_document() -> MockNode {
        MockNode::new("body").with_child(
            MockNode::new("section")
                .with_id("centered-promotion-play-for-free")
                .with_child(
                    MockNode::new("div").with_test_id("links").with_child(
                        MockNode::new("a")
                            .with_test_id("cta-0")
                            .with_text("PLAY FOR FREE"),
                    ),
                ),
        )
    }

    async fn promotion(driver: &MockDriver) -> CenteredPromotionBlade<'_, MockDriver> {
        let root = driver
            .find(
                Scope::Document,
                &Locator::id("centered-promotion-play-for-free"),
            )
            .await
            .unwrap()
            .unwrap();
        CenteredPromotionBlade::new(driver, root)
    }

    #[tokio::test]
    async fn test_links_and_cta() {
        let driver = MockDriver::new(promotion_document());
        let blade = promotion(&driver).await;

        assert!(blade.has_links_section().await.unwrap());
        assert!(blade.has_primary_cta().await.unwrap());
        assert!(blade.is_primary_cta_visible().await.unwrap());
        assert_eq!(
            blade.primary_cta_text().await.unwrap().as_deref(),
            Some("PLAY FOR FREE")
        );
    }

    #[tokio::test]
    async fn test_standard_primary_slot_is_absent() {
        // This variant uses cta-0; the plain cta-primary hook must not match
        let driver = MockDriver::new(promotion_document());
        let blade = promotion(&driver).await;
        assert!(!blade.has_cta(&CtaSlot::Primary).await.unwrap());
    }
}
