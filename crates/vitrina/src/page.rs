//! Page-object layer.
//!
//! [`Page`] binds a driver to one page of a site: navigation, bounded waits
//! for section roots, overlay dismissal, and construction of blade
//! components. [`HomePage`] pins the homepage's stable section ids to typed
//! blade variants so tests never repeat a locator.

use crate::blade::{Blade, Capabilities};
use crate::blades::{
    ArticleCardCarouselBlade, CenteredPromotionBlade, IconTabBlade, MastheadBlade, MediaPromoBlade,
};
use crate::driver::{Driver, ElementHandle, Scope};
use crate::locator::Locator;
use crate::result::VitrinaResult;
use crate::wait::{wait_for, wait_until_hidden, WaitOptions, WaitUntil};

/// A loaded page bound to a driver session.
///
/// Borrows the driver; never closes or reconfigures the session. All waits
/// use the page's [`WaitOptions`] unless a method takes its own.
#[derive(Debug)]
pub struct Page<'d, D: Driver> {
    driver: &'d D,
    wait: WaitOptions,
}

impl<'d, D: Driver> Page<'d, D> {
    /// Bind a page to a driver with default wait options
    #[must_use]
    pub fn new(driver: &'d D) -> Self {
        Self {
            driver,
            wait: WaitOptions::default(),
        }
    }

    /// Override the page's wait options
    #[must_use]
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// The driver this page queries through
    #[must_use]
    pub const fn driver(&self) -> &'d D {
        self.driver
    }

    /// The page's wait options
    #[must_use]
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    /// Navigate to a URL and wait for the document to finish loading
    pub async fn goto(&self, url: &str) -> VitrinaResult<()> {
        tracing::info!(url, "navigating");
        self.driver.goto(url).await?;
        self.driver.wait_for_load(self.wait.timeout()).await
    }

    /// Current URL as the driver reports it
    pub async fn current_url(&self) -> VitrinaResult<String> {
        self.driver.current_url().await
    }

    /// Wait for an element and wrap it as a blade component.
    ///
    /// The wait is bounded by the page's options; on expiry the error
    /// carries the locator and the bound.
    pub async fn component(
        &self,
        locator: &Locator,
        capabilities: Capabilities,
    ) -> VitrinaResult<Blade<'d, D>> {
        let root = self.wait_for_root(locator).await?;
        Ok(Blade::new(self.driver, root, capabilities))
    }

    /// Wait for a section root by element id
    pub async fn section(&self, id: &str) -> VitrinaResult<ElementHandle> {
        self.wait_for_root(&Locator::id(id)).await
    }

    /// Non-waiting probe: whether the section exists and is rendered right
    /// now. Absence is `false`, never an error.
    pub async fn is_section_visible(&self, id: &str) -> VitrinaResult<bool> {
        match self
            .driver
            .find(Scope::Document, &Locator::id(id))
            .await?
        {
            None => Ok(false),
            Some(element) => self.driver.is_displayed(&element).await,
        }
    }

    /// Dismiss an overlay (cookie banner, alert bar) if it is present.
    ///
    /// Clicks `trigger` when it is clickable within the page's bound, then
    /// waits for `overlay` to stop being rendered. Returns whether anything
    /// was dismissed; an overlay that never appears is a normal `false`.
    pub async fn dismiss_overlay(
        &self,
        trigger: &Locator,
        overlay: &Locator,
    ) -> VitrinaResult<bool> {
        let button = match wait_for(
            self.driver,
            Scope::Document,
            trigger,
            WaitUntil::Clickable,
            &self.wait,
        )
        .await
        {
            Ok(button) => button,
            Err(crate::result::VitrinaError::WaitTimeout { .. }) => {
                tracing::debug!(trigger = %trigger, "overlay trigger absent");
                return Ok(false);
            }
            Err(other) => return Err(other),
        };
        self.driver.click(&button).await?;
        wait_until_hidden(self.driver, Scope::Document, overlay, &self.wait).await?;
        tracing::info!(overlay = %overlay, "overlay dismissed");
        Ok(true)
    }

    async fn wait_for_root(&self, locator: &Locator) -> VitrinaResult<ElementHandle> {
        wait_for(
            self.driver,
            Scope::Document,
            locator,
            WaitUntil::Present,
            &self.wait,
        )
        .await
    }
}

/// Marketing-site homepage: stable section ids bound to typed blades.
#[derive(Debug)]
pub struct HomePage<'d, D: Driver> {
    page: Page<'d, D>,
    url: String,
}

impl<'d, D: Driver> HomePage<'d, D> {
    /// Section id of the hero masthead
    pub const GAME_SIMPLE_MASTHEAD: &'static str = "section-home-hero";
    /// Section id of the featured-news carousel
    pub const ARTICLE_CARD_CAROUSEL: &'static str = "article-carousel-featured-news";
    /// Section id of the "choose your champion" tab panel
    pub const ICON_TAB_CHOOSE_CHAMPION: &'static str = "icon-tab-choose-your-champion";
    /// Section id of the "multiple ways to play" tab panel
    pub const ICON_TAB_MULTIPLE_WAYS: &'static str = "section-home-multiplewaystoplay";
    /// Section id of the skins media promo
    pub const MEDIA_PROMO: &'static str = "home-section-slaywithstyle";
    /// Section id of the bottom centered promotion
    pub const CENTERED_PROMOTION: &'static str = "centered-promotion-play-for-free";

    /// Bind the homepage at `url` to a driver
    #[must_use]
    pub fn new(driver: &'d D, url: impl Into<String>) -> Self {
        Self {
            page: Page::new(driver),
            url: url.into(),
        }
    }

    /// Override the underlying page's wait options
    #[must_use]
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.page = self.page.with_wait_options(wait);
        self
    }

    /// The underlying page
    #[must_use]
    pub const fn page(&self) -> &Page<'d, D> {
        &self.page
    }

    /// Navigate to the homepage and wait for load-complete
    pub async fn load(&self) -> VitrinaResult<()> {
        self.page.goto(&self.url).await
    }

    /// Whether the driver currently sits on this page's URL
    pub async fn is_loaded(&self) -> VitrinaResult<bool> {
        Ok(self.page.current_url().await? == self.url)
    }

    /// The hero masthead blade
    pub async fn masthead(&self) -> VitrinaResult<MastheadBlade<'d, D>> {
        let root = self.page.section(Self::GAME_SIMPLE_MASTHEAD).await?;
        Ok(MastheadBlade::new(self.page.driver(), root))
    }

    /// The featured-news carousel blade
    pub async fn article_carousel(&self) -> VitrinaResult<ArticleCardCarouselBlade<'d, D>> {
        let root = self.page.section(Self::ARTICLE_CARD_CAROUSEL).await?;
        Ok(ArticleCardCarouselBlade::new(self.page.driver(), root))
    }

    /// The "choose your champion" tab blade
    pub async fn icon_tab_choose_champion(&self) -> VitrinaResult<IconTabBlade<'d, D>> {
        let root = self.page.section(Self::ICON_TAB_CHOOSE_CHAMPION).await?;
        Ok(IconTabBlade::new(self.page.driver(), root))
    }

    /// The "multiple ways to play" tab blade
    pub async fn icon_tab_multiple_ways(&self) -> VitrinaResult<IconTabBlade<'d, D>> {
        let root = self.page.section(Self::ICON_TAB_MULTIPLE_WAYS).await?;
        Ok(IconTabBlade::new(self.page.driver(), root))
    }

    /// The skins media promo blade
    pub async fn media_promo(&self) -> VitrinaResult<MediaPromoBlade<'d, D>> {
        let root = self.page.section(Self::MEDIA_PROMO).await?;
        Ok(MediaPromoBlade::new(self.page.driver(), root))
    }

    /// The bottom centered promotion blade
    pub async fn centered_promotion(&self) -> VitrinaResult<CenteredPromotionBlade<'d, D>> {
        let root = self.page.section(Self::CENTERED_PROMOTION).await?;
        Ok(CenteredPromotionBlade::new(self.page.driver(), root))
    }
}
