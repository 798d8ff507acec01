//! Blade component base contract.
//!
//! A blade is one visually distinct section of a page (hero, carousel, promo
//! block), modeled as a wrapped root element plus queries that never leave
//! the root's subtree. The vocabulary every section needs — existence,
//! visibility, text extraction, backdrop/header/CTA/carousel sub-contracts —
//! lives here once; variants declare which capabilities apply to them and add
//! behavior on top (see [`crate::blades`]).
//!
//! Absence is a normal result everywhere on this surface: a query against a
//! capability the blade does not declare, or an element the variant does not
//! render, yields `Ok(false)` / `Ok(None)`. Errors are reserved for
//! driver-fatal conditions.

use crate::driver::{Driver, ElementHandle, Scope};
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use std::collections::HashSet;

/// Well-known locators shared across blade variants.
///
/// These are the stable `data-testid` hooks the pages under verification
/// expose; they are an externally-fixed contract, not something this crate
/// owns.
pub mod locators {
    use crate::locator::Locator;

    /// Carousel root
    #[must_use]
    pub fn carousel() -> Locator {
        Locator::test_id("carousel")
    }

    /// One carousel slide / tab
    #[must_use]
    pub fn slide() -> Locator {
        Locator::test_id("slide")
    }

    /// Carousel controls container
    #[must_use]
    pub fn controls_container() -> Locator {
        Locator::test_id("controls-container")
    }

    /// Carousel progress bar
    #[must_use]
    pub fn progress_bar() -> Locator {
        Locator::test_id("progress-bar")
    }

    /// Carousel previous button
    #[must_use]
    pub fn previous_button() -> Locator {
        Locator::test_id("previous-button")
    }

    /// Carousel next button
    #[must_use]
    pub fn next_button() -> Locator {
        Locator::test_id("next-button")
    }

    /// Blade header container
    #[must_use]
    pub fn blade_header() -> Locator {
        Locator::test_id("bladeheader")
    }

    /// Main title
    #[must_use]
    pub fn title() -> Locator {
        Locator::test_id("title")
    }

    /// Super title (text above the main title)
    #[must_use]
    pub fn super_title() -> Locator {
        Locator::test_id("supertitle")
    }

    /// Description
    #[must_use]
    pub fn description() -> Locator {
        Locator::test_id("description")
    }

    /// Any backdrop layer
    #[must_use]
    pub fn backdrop() -> Locator {
        Locator::test_id_contains("backdrop")
    }

    /// Backdrop background layer
    #[must_use]
    pub fn backdrop_background() -> Locator {
        Locator::test_id("backdrop-background")
    }

    /// Backdrop foreground layer
    #[must_use]
    pub fn backdrop_foreground() -> Locator {
        Locator::test_id("backdrop-foreground")
    }
}

/// A named optional feature a blade may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Background/foreground media layers
    Backdrop,
    /// Title / supertitle / description header
    Header,
    /// Call-to-action link slots
    Cta,
    /// Slide collection with controls
    Carousel,
    /// Externally-rendered media panel
    MediaPanel,
    /// Tab strip bound to a media panel
    Tabs,
}

/// The capability set a blade variant declares at construction.
///
/// Fixed for the blade's lifetime: queries against an undeclared capability
/// return absent results, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(HashSet<Capability>);

impl Capabilities {
    /// Empty capability set
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Capability set from a list
    #[must_use]
    pub fn of(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self(capabilities.into_iter().collect())
    }

    /// Whether a capability is declared
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Named call-to-action slot within a blade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtaSlot {
    /// Primary CTA (`data-testid='cta-primary'`)
    Primary,
    /// Secondary CTA (`data-testid='cta-secondary'`)
    Secondary,
    /// Tertiary CTA (`data-testid='cta-tertiary'`)
    Tertiary,
    /// Variant-specific CTA hook
    Custom(Locator),
}

impl CtaSlot {
    /// The locator this slot resolves to
    #[must_use]
    pub fn locator(&self) -> Locator {
        match self {
            Self::Primary => Locator::test_id("cta-primary"),
            Self::Secondary => Locator::test_id("cta-secondary"),
            Self::Tertiary => Locator::test_id("cta-tertiary"),
            Self::Custom(locator) => locator.clone(),
        }
    }
}

impl std::fmt::Display for CtaSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
            Self::Tertiary => write!(f, "tertiary"),
            Self::Custom(locator) => write!(f, "custom({locator})"),
        }
    }
}

/// What clicking an absent optional element does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Skip silently; the click reports `false`
    #[default]
    SilentSkip,
    /// Fail with [`VitrinaError::CtaAbsent`]
    FailOnAbsent,
}

/// Backdrop layer selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropLayer {
    /// Background layer
    Background,
    /// Foreground layer
    Foreground,
}

impl BackdropLayer {
    fn locator(self) -> Locator {
        match self {
            Self::Background => locators::backdrop_background(),
            Self::Foreground => locators::backdrop_foreground(),
        }
    }
}

/// Media kind inside a backdrop layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// `<video>` element
    Video,
    /// `<img>` element
    Image,
}

impl MediaKind {
    fn locator(self) -> Locator {
        match self {
            Self::Video => Locator::tag("video"),
            Self::Image => Locator::tag("img"),
        }
    }
}

/// Attribute marking the active carousel slide
const ACTIVE_SLIDE_ATTRS: [&str; 2] = ["data-active", "aria-selected"];

/// Base blade component: a root element plus capability-scoped queries.
///
/// Borrows the driver for its lifetime; never closes or reconfigures the
/// session. The root handle is bound to the page it was found on — after a
/// navigation the blade must be re-resolved through the page layer.
#[derive(Debug)]
pub struct Blade<'d, D: Driver> {
    driver: &'d D,
    root: ElementHandle,
    capabilities: Capabilities,
    click_policy: ClickPolicy,
}

impl<'d, D: Driver> Blade<'d, D> {
    /// Wrap a resolved root element
    #[must_use]
    pub fn new(driver: &'d D, root: ElementHandle, capabilities: Capabilities) -> Self {
        Self {
            driver,
            root,
            capabilities,
            click_policy: ClickPolicy::default(),
        }
    }

    /// Override the click-when-absent policy
    #[must_use]
    pub fn with_click_policy(mut self, policy: ClickPolicy) -> Self {
        self.click_policy = policy;
        self
    }

    /// The blade's root element
    #[must_use]
    pub const fn root(&self) -> &ElementHandle {
        &self.root
    }

    /// The driver this blade queries through
    #[must_use]
    pub const fn driver(&self) -> &'d D {
        self.driver
    }

    /// Declared capability set
    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Whether a capability is declared
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.supports(capability)
    }

    // Generic queries, all confined to the root's subtree

    /// Whether a matching descendant exists
    pub async fn exists(&self, locator: &Locator) -> VitrinaResult<bool> {
        Ok(self.element(locator).await?.is_some())
    }

    /// First matching descendant, document order
    pub async fn element(&self, locator: &Locator) -> VitrinaResult<Option<ElementHandle>> {
        self.driver.find(Scope::Within(&self.root), locator).await
    }

    /// All matching descendants, document order
    pub async fn elements(&self, locator: &Locator) -> VitrinaResult<Vec<ElementHandle>> {
        self.driver
            .find_all(Scope::Within(&self.root), locator)
            .await
    }

    /// Trimmed text of the first match.
    ///
    /// `None` when the element is missing or its text is all-whitespace —
    /// the two are intentionally merged; use [`Self::exists`] first when the
    /// distinction matters.
    pub async fn text_of(&self, locator: &Locator) -> VitrinaResult<Option<String>> {
        match self.element(locator).await? {
            None => Ok(None),
            Some(element) => {
                let text = self.driver.text(&element).await?;
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
        }
    }

    /// Whether the first match is rendered; false when absent
    pub async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        match self.element(locator).await? {
            None => Ok(false),
            Some(element) => self.driver.is_displayed(&element).await,
        }
    }

    /// Whether the blade's root is rendered
    pub async fn is_displayed(&self) -> VitrinaResult<bool> {
        self.driver.is_displayed(&self.root).await
    }

    // Backdrop sub-contract

    /// Whether any backdrop layer exists
    pub async fn has_backdrop(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Backdrop) {
            return Ok(false);
        }
        self.exists(&locators::backdrop()).await
    }

    /// Whether the background layer exists
    pub async fn has_backdrop_background(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Backdrop) {
            return Ok(false);
        }
        self.exists(&locators::backdrop_background()).await
    }

    /// Whether the foreground layer exists
    pub async fn has_backdrop_foreground(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Backdrop) {
            return Ok(false);
        }
        self.exists(&locators::backdrop_foreground()).await
    }

    /// Whether a specific backdrop layer contains a media element.
    ///
    /// Layers are checked independently: the media tag must be a descendant
    /// of that layer, not merely of the blade.
    pub async fn backdrop_contains(
        &self,
        layer: BackdropLayer,
        media: MediaKind,
    ) -> VitrinaResult<bool> {
        if !self.supports(Capability::Backdrop) {
            return Ok(false);
        }
        match self.element(&layer.locator()).await? {
            None => Ok(false),
            Some(layer_element) => Ok(self
                .driver
                .find(Scope::Within(&layer_element), &media.locator())
                .await?
                .is_some()),
        }
    }

    /// Background layer contains a `<video>`
    pub async fn background_contains_video(&self) -> VitrinaResult<bool> {
        self.backdrop_contains(BackdropLayer::Background, MediaKind::Video)
            .await
    }

    /// Background layer contains an `<img>`
    pub async fn background_contains_image(&self) -> VitrinaResult<bool> {
        self.backdrop_contains(BackdropLayer::Background, MediaKind::Image)
            .await
    }

    /// Foreground layer contains a `<video>`
    pub async fn foreground_contains_video(&self) -> VitrinaResult<bool> {
        self.backdrop_contains(BackdropLayer::Foreground, MediaKind::Video)
            .await
    }

    /// Foreground layer contains an `<img>`
    pub async fn foreground_contains_image(&self) -> VitrinaResult<bool> {
        self.backdrop_contains(BackdropLayer::Foreground, MediaKind::Image)
            .await
    }

    // Header sub-contract

    /// Whether the blade header container exists
    pub async fn has_header(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Header) {
            return Ok(false);
        }
        self.exists(&locators::blade_header()).await
    }

    /// The blade header element
    pub async fn header_element(&self) -> VitrinaResult<Option<ElementHandle>> {
        if !self.supports(Capability::Header) {
            return Ok(None);
        }
        self.element(&locators::blade_header()).await
    }

    /// Main title text
    pub async fn title(&self) -> VitrinaResult<Option<String>> {
        if !self.supports(Capability::Header) {
            return Ok(None);
        }
        self.text_of(&locators::title()).await
    }

    /// Super title text (above the main title)
    pub async fn super_title(&self) -> VitrinaResult<Option<String>> {
        if !self.supports(Capability::Header) {
            return Ok(None);
        }
        self.text_of(&locators::super_title()).await
    }

    /// Description text
    pub async fn description(&self) -> VitrinaResult<Option<String>> {
        if !self.supports(Capability::Header) {
            return Ok(None);
        }
        self.text_of(&locators::description()).await
    }

    // CTA sub-contract

    /// Whether the slot's CTA exists
    pub async fn has_cta(&self, slot: &CtaSlot) -> VitrinaResult<bool> {
        if !self.supports(Capability::Cta) {
            return Ok(false);
        }
        self.exists(&slot.locator()).await
    }

    /// The slot's CTA element
    pub async fn cta_element(&self, slot: &CtaSlot) -> VitrinaResult<Option<ElementHandle>> {
        if !self.supports(Capability::Cta) {
            return Ok(None);
        }
        self.element(&slot.locator()).await
    }

    /// The slot's CTA text (trimmed; whitespace-only merges into `None`)
    pub async fn cta_text(&self, slot: &CtaSlot) -> VitrinaResult<Option<String>> {
        if !self.supports(Capability::Cta) {
            return Ok(None);
        }
        self.text_of(&slot.locator()).await
    }

    /// The slot's CTA link target
    pub async fn cta_href(&self, slot: &CtaSlot) -> VitrinaResult<Option<String>> {
        self.cta_attribute(slot, "href").await
    }

    /// An attribute of the slot's CTA (e.g. `href`, `target`)
    pub async fn cta_attribute(
        &self,
        slot: &CtaSlot,
        name: &str,
    ) -> VitrinaResult<Option<String>> {
        match self.cta_element(slot).await? {
            None => Ok(None),
            Some(element) => self.driver.attribute(&element, name).await,
        }
    }

    /// Whether the slot's CTA is rendered
    pub async fn is_cta_visible(&self, slot: &CtaSlot) -> VitrinaResult<bool> {
        if !self.supports(Capability::Cta) {
            return Ok(false);
        }
        self.is_visible(&slot.locator()).await
    }

    /// Click the slot's CTA.
    ///
    /// Returns whether a click happened. Under the default
    /// [`ClickPolicy::SilentSkip`] an absent CTA reports `Ok(false)`; under
    /// [`ClickPolicy::FailOnAbsent`] it is an error.
    pub async fn click_cta(&self, slot: &CtaSlot) -> VitrinaResult<bool> {
        match self.cta_element(slot).await? {
            Some(element) => {
                tracing::debug!(slot = %slot, "clicking CTA");
                self.driver.click(&element).await?;
                Ok(true)
            }
            None => match self.click_policy {
                ClickPolicy::SilentSkip => {
                    tracing::debug!(slot = %slot, "CTA absent, click skipped");
                    Ok(false)
                }
                ClickPolicy::FailOnAbsent => Err(VitrinaError::CtaAbsent {
                    slot: slot.to_string(),
                }),
            },
        }
    }

    // Carousel sub-contract

    /// Whether the blade contains a carousel
    pub async fn has_carousel(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Carousel) {
            return Ok(false);
        }
        self.exists(&locators::carousel()).await
    }

    /// All slides, document order. Re-queries the live DOM on every call.
    pub async fn slides(&self) -> VitrinaResult<Vec<ElementHandle>> {
        if !self.supports(Capability::Carousel) {
            return Ok(Vec::new());
        }
        self.elements(&locators::slide()).await
    }

    /// Number of slides currently rendered
    pub async fn slide_count(&self) -> VitrinaResult<usize> {
        Ok(self.slides().await?.len())
    }

    /// Index of the slide carrying an active marker attribute.
    ///
    /// `None` when no slide is marked — some carousels have no active-slide
    /// concept, so this is not an error.
    pub async fn active_slide_index(&self) -> VitrinaResult<Option<usize>> {
        for (index, slide) in self.slides().await?.iter().enumerate() {
            for attr in ACTIVE_SLIDE_ATTRS {
                if self.driver.attribute(slide, attr).await?.as_deref() == Some("true") {
                    return Ok(Some(index));
                }
            }
        }
        Ok(None)
    }

    /// Whether the carousel has a controls container
    pub async fn has_controls(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Carousel) {
            return Ok(false);
        }
        self.exists(&locators::controls_container()).await
    }

    /// The controls container element
    pub async fn controls_container(&self) -> VitrinaResult<Option<ElementHandle>> {
        if !self.supports(Capability::Carousel) {
            return Ok(None);
        }
        self.element(&locators::controls_container()).await
    }

    /// Whether the carousel has a progress bar
    pub async fn has_progress_bar(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Carousel) {
            return Ok(false);
        }
        self.exists(&locators::progress_bar()).await
    }

    /// Whether the previous button exists
    pub async fn has_previous_button(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Carousel) {
            return Ok(false);
        }
        self.exists(&locators::previous_button()).await
    }

    /// Whether the next button exists
    pub async fn has_next_button(&self) -> VitrinaResult<bool> {
        if !self.supports(Capability::Carousel) {
            return Ok(false);
        }
        self.exists(&locators::next_button()).await
    }

    /// Whether the previous button is enabled (no `disabled` attribute)
    pub async fn is_previous_enabled(&self) -> VitrinaResult<bool> {
        self.button_enabled(&locators::previous_button()).await
    }

    /// Whether the next button is enabled (no `disabled` attribute)
    pub async fn is_next_enabled(&self) -> VitrinaResult<bool> {
        self.button_enabled(&locators::next_button()).await
    }

    /// Click the previous button if present and enabled; reports whether a
    /// click happened
    pub async fn click_previous(&self) -> VitrinaResult<bool> {
        self.click_if_enabled(&locators::previous_button()).await
    }

    /// Click the next button if present and enabled; reports whether a
    /// click happened
    pub async fn click_next(&self) -> VitrinaResult<bool> {
        self.click_if_enabled(&locators::next_button()).await
    }

    async fn button_enabled(&self, locator: &Locator) -> VitrinaResult<bool> {
        if !self.supports(Capability::Carousel) {
            return Ok(false);
        }
        match self.element(locator).await? {
            None => Ok(false),
            Some(element) => Ok(self.driver.attribute(&element, "disabled").await?.is_none()),
        }
    }

    async fn click_if_enabled(&self, locator: &Locator) -> VitrinaResult<bool> {
        if !self.supports(Capability::Carousel) {
            return Ok(false);
        }
        match self.element(locator).await? {
            None => Ok(false),
            Some(element) => {
                if self.driver.attribute(&element, "disabled").await?.is_some() {
                    tracing::debug!(locator = %locator, "button disabled, click skipped");
                    return Ok(false);
                }
                self.driver.click(&element).await?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockNode};

    fn all_capabilities() -> Capabilities {
        Capabilities::of([
            Capability::Backdrop,
            Capability::Header,
            Capability::Cta,
            Capability::Carousel,
        ])
    }

    async fn blade_over<'d>(
        driver: &'d MockDriver,
        capabilities: Capabilities,
    ) -> Blade<'d, MockDriver> {
        let root = driver
            .find(Scope::Document, &Locator::id("blade-under-test"))
            .await
            .unwrap()
            .unwrap();
        Blade::new(driver, root, capabilities)
    }

    fn section(children: Vec<MockNode>) -> MockNode {
        MockNode::new("body").with_child(
            MockNode::new("section")
                .with_id("blade-under-test")
                .with_children(children),
        )
    }

    mod text_tests {
        use super::*;

        #[tokio::test]
        async fn test_whitespace_only_text_is_absent() {
            let driver = MockDriver::new(section(vec![
                MockNode::new("div").with_test_id("title").with_text("   "),
            ]));
            let blade = blade_over(&driver, all_capabilities()).await;

            assert!(blade.exists(&locators::title()).await.unwrap());
            assert_eq!(blade.title().await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_text_is_trimmed() {
            let driver = MockDriver::new(section(vec![MockNode::new("div")
                .with_test_id("title")
                .with_text("  CHAMPION  ")]));
            let blade = blade_over(&driver, all_capabilities()).await;

            assert_eq!(blade.title().await.unwrap().as_deref(), Some("CHAMPION"));
        }

        #[tokio::test]
        async fn test_exists_is_idempotent() {
            let driver = MockDriver::new(section(vec![
                MockNode::new("div").with_test_id("title").with_text("x"),
            ]));
            let blade = blade_over(&driver, all_capabilities()).await;

            let first = blade.exists(&locators::title()).await.unwrap();
            let second = blade.exists(&locators::title()).await.unwrap();
            assert_eq!(first, second);
        }
    }

    mod capability_tests {
        use super::*;

        #[tokio::test]
        async fn test_undeclared_capability_yields_absent_not_error() {
            // The DOM actually contains a carousel, but the variant does not
            // declare the capability: queries must report absence.
            let driver = MockDriver::new(section(vec![MockNode::new("div")
                .with_test_id("carousel")
                .with_child(MockNode::new("div").with_test_id("slide"))]));
            let blade = blade_over(&driver, Capabilities::of([Capability::Header])).await;

            assert!(!blade.has_carousel().await.unwrap());
            assert_eq!(blade.slide_count().await.unwrap(), 0);
            assert!(!blade.has_backdrop().await.unwrap());
            assert_eq!(blade.title().await.unwrap(), None);
        }
    }

    mod backdrop_tests {
        use super::*;

        #[tokio::test]
        async fn test_layers_checked_independently() {
            let driver = MockDriver::new(section(vec![MockNode::new("div")
                .with_test_id("backdrop-background")
                .with_child(MockNode::new("video"))]));
            let blade = blade_over(&driver, all_capabilities()).await;

            assert!(blade.has_backdrop().await.unwrap());
            assert!(blade.background_contains_video().await.unwrap());
            assert!(!blade.background_contains_image().await.unwrap());
            // No foreground layer: every foreground probe is false, not an error
            assert!(!blade.has_backdrop_foreground().await.unwrap());
            assert!(!blade.foreground_contains_video().await.unwrap());
            assert!(!blade.foreground_contains_image().await.unwrap());
        }

        #[tokio::test]
        async fn test_media_must_be_inside_the_layer() {
            // A video next to the backdrop layer must not count for it
            let driver = MockDriver::new(section(vec![
                MockNode::new("div").with_test_id("backdrop-background"),
                MockNode::new("video"),
            ]));
            let blade = blade_over(&driver, all_capabilities()).await;

            assert!(!blade.background_contains_video().await.unwrap());
        }
    }

    mod cta_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_absent_cta_skips_silently_by_default() {
            let driver = MockDriver::new(section(vec![]));
            let blade = blade_over(&driver, all_capabilities()).await;

            let clicked = blade.click_cta(&CtaSlot::Primary).await.unwrap();
            assert!(!clicked);
        }

        #[tokio::test]
        async fn test_click_absent_cta_fails_under_strict_policy() {
            let driver = MockDriver::new(section(vec![]));
            let blade = blade_over(&driver, all_capabilities())
                .await
                .with_click_policy(ClickPolicy::FailOnAbsent);

            let err = blade.click_cta(&CtaSlot::Primary).await.unwrap_err();
            assert!(matches!(err, VitrinaError::CtaAbsent { .. }));
        }

        #[tokio::test]
        async fn test_cta_attributes() {
            let driver = MockDriver::new(section(vec![MockNode::new("a")
                .with_test_id("cta-primary")
                .with_text("PLAY NOW")
                .with_attr("href", "https://signup.example.com/")
                .with_attr("target", "_blank")]));
            let blade = blade_over(&driver, all_capabilities()).await;

            assert_eq!(
                blade.cta_text(&CtaSlot::Primary).await.unwrap().as_deref(),
                Some("PLAY NOW")
            );
            assert_eq!(
                blade
                    .cta_attribute(&CtaSlot::Primary, "href")
                    .await
                    .unwrap()
                    .as_deref(),
                Some("https://signup.example.com/")
            );
            assert_eq!(
                blade
                    .cta_attribute(&CtaSlot::Primary, "target")
                    .await
                    .unwrap()
                    .as_deref(),
                Some("_blank")
            );
        }

        #[tokio::test]
        async fn test_custom_slot_uses_its_locator() {
            let driver = MockDriver::new(section(vec![MockNode::new("a")
                .with_test_id("cta-0")
                .with_text("PLAY FOR FREE")]));
            let blade = blade_over(&driver, all_capabilities()).await;

            let slot = CtaSlot::Custom(Locator::test_id("cta-0"));
            assert!(blade.has_cta(&slot).await.unwrap());
            assert!(!blade.has_cta(&CtaSlot::Primary).await.unwrap());
        }
    }

    mod carousel_tests {
        use super::*;

        fn carousel_with_slides(n: usize, active: Option<usize>) -> Vec<MockNode> {
            let slides = (0..n).map(|i| {
                let slide = MockNode::new("div").with_test_id("slide");
                if active == Some(i) {
                    slide.with_attr("data-active", "true")
                } else {
                    slide
                }
            });
            vec![MockNode::new("div")
                .with_test_id("carousel")
                .with_children(slides)]
        }

        #[tokio::test]
        async fn test_slide_count_recomputed_from_live_dom() {
            let driver = MockDriver::new(section(carousel_with_slides(6, None)));
            let blade = blade_over(&driver, all_capabilities()).await;
            assert_eq!(blade.slide_count().await.unwrap(), 6);
        }

        #[tokio::test]
        async fn test_active_slide_index_none_when_unmarked() {
            let driver = MockDriver::new(section(carousel_with_slides(4, None)));
            let blade = blade_over(&driver, all_capabilities()).await;
            assert_eq!(blade.active_slide_index().await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_active_slide_index_in_range() {
            let driver = MockDriver::new(section(carousel_with_slides(4, Some(2))));
            let blade = blade_over(&driver, all_capabilities()).await;
            let index = blade.active_slide_index().await.unwrap().unwrap();
            assert_eq!(index, 2);
            assert!(index < blade.slide_count().await.unwrap());
        }

        #[tokio::test]
        async fn test_disabled_button_click_is_skipped() {
            let driver = MockDriver::new(section(vec![MockNode::new("div")
                .with_test_id("controls-container")
                .with_child(
                    MockNode::new("button")
                        .with_test_id("previous-button")
                        .with_attr("disabled", "true"),
                )
                .with_child(MockNode::new("button").with_test_id("next-button"))]));
            let blade = blade_over(&driver, all_capabilities()).await;

            assert!(!blade.is_previous_enabled().await.unwrap());
            assert!(blade.is_next_enabled().await.unwrap());
            assert!(!blade.click_previous().await.unwrap());
            assert!(blade.click_next().await.unwrap());
        }

        #[tokio::test]
        async fn test_absent_buttons_never_raise() {
            let driver = MockDriver::new(section(vec![]));
            let blade = blade_over(&driver, all_capabilities()).await;

            assert!(!blade.has_previous_button().await.unwrap());
            assert!(!blade.is_next_enabled().await.unwrap());
            assert!(!blade.click_next().await.unwrap());
        }
    }
}
