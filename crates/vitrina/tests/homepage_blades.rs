//! End-to-end blade verification against the mock homepage.
//!
//! Builds the full six-section homepage as an in-memory DOM and drives the
//! same flows a real browser session would: load, dismiss the cookie banner,
//! resolve typed blades, interact with tabs and carousels, and check the
//! responsive controls rules at several viewports.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Instant;
use vitrina::{
    Driver, HomePage, Locator, MockDriver, MockNode, Page, VitrinaError, Viewport, WaitOptions,
};

const HOMEPAGE_URL: &str = "https://www.example-game.com/en-us/";

const CHAMPION_TABS: [&str; 6] = [
    "ASSASSINS",
    "FIGHTERS",
    "MAGES",
    "MARKSMEN",
    "SUPPORTS",
    "TANKS",
];

static TRACING: std::sync::Once = std::sync::Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn short_waits() -> WaitOptions {
    WaitOptions::new().with_timeout(500).with_poll_interval(10)
}

fn masthead_section() -> MockNode {
    MockNode::new("section")
        .with_id("section-home-hero")
        .with_child(
            MockNode::new("div")
                .with_test_id("backdrop-background")
                .with_child(MockNode::new("video").with_attr("autoplay", "true")),
        )
        .with_child(
            MockNode::new("div")
                .with_test_id("blade-content")
                .with_child(MockNode::new("img").with_test_id("masthead-logo"))
                .with_child(
                    MockNode::new("header")
                        .with_test_id("bladeheader")
                        .with_child(MockNode::new("h1").with_text("A WILD RIFT AWAITS")),
                )
                .with_child(
                    MockNode::new("a")
                        .with_test_id("cta-primary")
                        .with_text("PLAY FOR FREE")
                        .with_attr("href", "https://signup.example-game.com/"),
                ),
        )
}

fn news_carousel_section(slide_count: usize, with_controls: bool) -> MockNode {
    let slides = (0..slide_count).map(|i| {
        MockNode::new("article")
            .with_test_id("slide")
            .with_text(format!("Article {i}"))
    });
    let mut carousel = MockNode::new("div")
        .with_test_id("carousel")
        .with_children(slides);
    if with_controls {
        carousel = carousel.with_child(
            MockNode::new("div")
                .with_test_id("controls-container")
                .with_child(MockNode::new("button").with_test_id("previous-button"))
                .with_child(MockNode::new("button").with_test_id("next-button"))
                .with_child(MockNode::new("div").with_test_id("progress-bar")),
        );
    }
    MockNode::new("section")
        .with_id("article-carousel-featured-news")
        .with_child(
            MockNode::new("h2")
                .with_test_id("title")
                .with_text("FEATURED NEWS"),
        )
        .with_child(
            MockNode::new("a")
                .with_test_id("cta-tertiary")
                .with_text("VIEW ALL"),
        )
        .with_child(carousel)
}

// `tab_class` distinguishes this section's tabs from every other
// `data-testid='slide'` on the page, so click effects can target them.
fn icon_tab_section(id: &str, tab_class: &str, media_title: &str, media_subtitle: &str) -> MockNode {
    let tab_class = tab_class.to_string();
    let tabs = CHAMPION_TABS.iter().map(move |label| {
        MockNode::new("button")
            .with_test_id("slide")
            .with_class(tab_class.clone())
            .with_child(
                MockNode::new("span")
                    .with_class("icon-tab-label")
                    .with_text(*label),
            )
    });
    MockNode::new("section")
        .with_id(id)
        .with_child(MockNode::new("div").with_class("icon-tab--backdrop-main"))
        .with_child(
            MockNode::new("div").with_class("icon-tab--main").with_child(
                MockNode::new("div")
                    .with_test_id("carousel")
                    .with_children(tabs),
            ),
        )
        .with_child(
            MockNode::new("div")
                .with_class("icon-tab--media")
                .with_child(
                    MockNode::new("div")
                        .with_test_id("icon-tab-media")
                        .with_child(
                            MockNode::new("h3")
                                .with_class("icon-tab-media-title")
                                .with_text(media_title),
                        )
                        .with_child(
                            MockNode::new("h4")
                                .with_class("icon-tab-media-subtitle")
                                .with_text(media_subtitle),
                        ),
                ),
        )
}

fn media_promo_section() -> MockNode {
    MockNode::new("section")
        .with_id("home-section-slaywithstyle")
        .with_child(
            MockNode::new("div")
                .with_class("mediapromo-heading")
                .with_child(
                    MockNode::new("span")
                        .with_test_id("mediapromo-supertitle")
                        .with_text("LATEST SKINS"),
                )
                .with_child(
                    MockNode::new("h2")
                        .with_test_id("mediapromo-title")
                        .with_text("SLAY WITH STYLE"),
                ),
        )
        .with_child(
            MockNode::new("div")
                .with_test_id("mediapromo-links")
                .with_child(
                    MockNode::new("a")
                        .with_test_id("header-primary-cta")
                        .with_text("DISCOVER SKINS"),
                ),
        )
        .with_child(MockNode::new("img").with_test_id("featured-media"))
}

fn centered_promotion_section() -> MockNode {
    MockNode::new("section")
        .with_id("centered-promotion-play-for-free")
        .with_child(
            MockNode::new("div").with_test_id("links").with_child(
                MockNode::new("a")
                    .with_test_id("cta-0")
                    .with_text("PLAY FOR FREE"),
            ),
        )
}

fn cookie_banner() -> MockNode {
    MockNode::new("div").with_class("cookie-dialog").with_child(
        MockNode::new("button")
            .with_class("cookie-accept-all")
            .with_text("Accept All"),
    )
}

fn homepage_document() -> MockNode {
    MockNode::new("body")
        .with_child(cookie_banner())
        .with_child(masthead_section())
        .with_child(news_carousel_section(6, true))
        .with_child(icon_tab_section(
            "icon-tab-choose-your-champion",
            "champion-tab",
            "AKALI",
            "The Rogue Assassin",
        ))
        .with_child(icon_tab_section(
            "section-home-multiplewaystoplay",
            "ways-tab",
            "SUMMONER'S RIFT",
            "The classic 5v5 map",
        ))
        .with_child(media_promo_section())
        .with_child(centered_promotion_section())
}

fn home_page(driver: &MockDriver) -> HomePage<'_, MockDriver> {
    init_tracing();
    HomePage::new(driver, HOMEPAGE_URL).with_wait_options(short_waits())
}

#[tokio::test]
async fn test_homepage_loads_and_all_sections_visible() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);

    home.load().await.unwrap();
    assert!(home.is_loaded().await.unwrap());

    for id in [
        HomePage::<MockDriver>::GAME_SIMPLE_MASTHEAD,
        HomePage::<MockDriver>::ARTICLE_CARD_CAROUSEL,
        HomePage::<MockDriver>::ICON_TAB_CHOOSE_CHAMPION,
        HomePage::<MockDriver>::ICON_TAB_MULTIPLE_WAYS,
        HomePage::<MockDriver>::MEDIA_PROMO,
        HomePage::<MockDriver>::CENTERED_PROMOTION,
    ] {
        assert!(
            home.page().is_section_visible(id).await.unwrap(),
            "section {id} should be visible"
        );
    }
}

#[tokio::test]
async fn test_cookie_banner_dismissed_before_verification() {
    let driver = MockDriver::new(homepage_document());
    driver.add_click_effect(Locator::class_name("cookie-accept-all"), 0, |root| {
        if let Some(dialog) = root.find_mut(&Locator::class_name("cookie-dialog")) {
            dialog.hide();
        }
    });
    let home = home_page(&driver);
    home.load().await.unwrap();

    let dismissed = home
        .page()
        .dismiss_overlay(
            &Locator::class_name("cookie-accept-all"),
            &Locator::class_name("cookie-dialog"),
        )
        .await
        .unwrap();
    assert!(dismissed);

    // Second pass finds nothing left to dismiss within the bound
    let again = home
        .page()
        .dismiss_overlay(
            &Locator::class_name("cookie-accept-all"),
            &Locator::class_name("cookie-dialog"),
        )
        .await
        .unwrap();
    assert!(!again);
}

#[tokio::test]
async fn test_masthead_backdrop_and_cta() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let masthead = home.masthead().await.unwrap();
    assert!(masthead.is_displayed().await.unwrap());
    assert!(masthead.has_backdrop().await.unwrap());
    assert!(masthead.has_backdrop_background().await.unwrap());
    assert!(masthead.background_contains_video().await.unwrap());
    assert!(masthead.has_logo().await.unwrap());
    assert_eq!(
        masthead.h1_title().await.unwrap().as_deref(),
        Some("A WILD RIFT AWAITS")
    );
    assert_eq!(
        masthead.primary_cta_text().await.unwrap().as_deref(),
        Some("PLAY FOR FREE")
    );
    assert_eq!(
        masthead
            .cta_href(&vitrina::CtaSlot::Primary)
            .await
            .unwrap()
            .as_deref(),
        Some("https://signup.example-game.com/")
    );
}

#[tokio::test]
async fn test_masthead_missing_foreground_probes_false() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let masthead = home.masthead().await.unwrap();
    assert!(!masthead.has_backdrop_foreground().await.unwrap());
    assert!(!masthead.foreground_contains_video().await.unwrap());
    assert!(!masthead.foreground_contains_image().await.unwrap());
}

#[tokio::test]
async fn test_champion_tab_selection_changes_media() {
    let driver = MockDriver::new(homepage_document());
    driver.add_click_effect(Locator::class_name("champion-tab"), 2, |root| {
        if let Some(title) = root.find_mut(&Locator::class_name("icon-tab-media-title")) {
            title.set_text("LUX");
        }
        if let Some(subtitle) = root.find_mut(&Locator::class_name("icon-tab-media-subtitle")) {
            subtitle.set_text("The Lady of Luminosity");
        }
    });
    let home = home_page(&driver);
    home.load().await.unwrap();

    let champions = home.icon_tab_choose_champion().await.unwrap();
    assert_eq!(champions.tab_labels().await.unwrap(), CHAMPION_TABS);
    assert_eq!(champions.tab_count().await.unwrap(), 6);
    assert!(champions.has_media_element().await.unwrap());

    let previous_title = champions.media_title().await.unwrap();
    let previous_subtitle = champions.media_subtitle().await.unwrap();
    assert_eq!(previous_title.as_deref(), Some("AKALI"));
    assert_eq!(previous_subtitle.as_deref(), Some("The Rogue Assassin"));

    champions.select_tab(2).await.unwrap();

    assert!(champions
        .media_changed(previous_title.as_deref(), previous_subtitle.as_deref())
        .await
        .unwrap());
    assert_eq!(
        champions.media_title().await.unwrap().as_deref(),
        Some("LUX")
    );
}

#[tokio::test]
async fn test_champion_tab_by_label_is_case_insensitive() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let champions = home.icon_tab_choose_champion().await.unwrap();
    champions.select_tab_by_label("tanks").await.unwrap();
    assert!(driver.was_called("click"));
}

#[tokio::test]
async fn test_out_of_range_tab_never_clicks() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let champions = home.icon_tab_choose_champion().await.unwrap();
    let err = champions.select_tab(42).await.unwrap_err();
    assert!(matches!(
        err,
        VitrinaError::TabIndexOutOfRange {
            index: 42,
            count: 6
        }
    ));
    assert!(!driver.was_called("click"));
}

#[tokio::test]
async fn test_both_icon_tab_sections_resolve_independently() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let champions = home.icon_tab_choose_champion().await.unwrap();
    let ways = home.icon_tab_multiple_ways().await.unwrap();

    assert_eq!(
        champions.media_title().await.unwrap().as_deref(),
        Some("AKALI")
    );
    assert_eq!(
        ways.media_title().await.unwrap().as_deref(),
        Some("SUMMONER'S RIFT")
    );
}

#[tokio::test]
async fn test_news_carousel_controls_rules_across_viewports() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let news = home.article_carousel().await.unwrap();
    assert_eq!(news.slide_count().await.unwrap(), 6);

    // Six slides overflow every breakpoint, so controls are expected
    for width in [1920_u32, 1200, 800, 480] {
        driver
            .set_viewport(Viewport::new(width, 1080))
            .await
            .unwrap();
        assert!(news.should_show_controls(width).await.unwrap());
        assert!(
            news.controls_display_correct(width).await.unwrap(),
            "controls should be correct at {width}px"
        );
    }
    assert!(news.has_progress_bar().await.unwrap());
    assert!(news.click_next().await.unwrap());
}

#[tokio::test]
async fn test_sparse_carousel_needs_no_controls_on_desktop() {
    let document = MockNode::new("body").with_child(news_carousel_section(2, false));
    let driver = MockDriver::new(document);
    let home = home_page(&driver);
    home.load().await.unwrap();

    let news = home.article_carousel().await.unwrap();
    assert!(!news.should_show_controls(1920).await.unwrap());
    assert!(news.controls_display_correct(1920).await.unwrap());
    // The same two slides overflow a phone viewport
    assert!(news.should_show_controls(480).await.unwrap());
    assert!(!news.controls_display_correct(480).await.unwrap());
}

#[tokio::test]
async fn test_media_promo_copy_and_featured_media() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let promo = home.media_promo().await.unwrap();
    assert!(promo.has_heading().await.unwrap());
    assert_eq!(
        promo.supertitle().await.unwrap().as_deref(),
        Some("LATEST SKINS")
    );
    assert_eq!(
        promo.title_text().await.unwrap().as_deref(),
        Some("SLAY WITH STYLE")
    );
    assert!(promo.has_links_section().await.unwrap());
    assert!(promo.has_featured_media().await.unwrap());
    assert!(promo.featured_media_is_image().await.unwrap());
    assert!(promo
        .is_featured_media_visible(&short_waits())
        .await
        .unwrap());
}

#[tokio::test]
async fn test_centered_promotion_cta() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let promotion = home.centered_promotion().await.unwrap();
    assert!(promotion.has_links_section().await.unwrap());
    assert_eq!(
        promotion.primary_cta_text().await.unwrap().as_deref(),
        Some("PLAY FOR FREE")
    );
    assert!(promotion.click_primary_cta().await.unwrap());
}

#[tokio::test]
async fn test_missing_section_times_out_within_bound() {
    let driver = MockDriver::new(homepage_document());
    let page = Page::new(&driver)
        .with_wait_options(WaitOptions::new().with_timeout(300).with_poll_interval(20));

    let start = Instant::now();
    let err = page.section("section-that-does-not-exist").await.unwrap_err();
    let elapsed = start.elapsed();

    match err {
        VitrinaError::WaitTimeout { locator, ms } => {
            assert_eq!(locator, "#section-that-does-not-exist");
            assert_eq!(ms, 300);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(elapsed.as_millis() >= 300, "wait returned before the bound");
    assert!(elapsed.as_millis() < 3000, "wait overshot the bound");
}

#[tokio::test]
async fn test_handles_go_stale_after_navigation() {
    let driver = MockDriver::new(homepage_document());
    let home = home_page(&driver);
    home.load().await.unwrap();

    let masthead = home.masthead().await.unwrap();
    assert!(masthead.is_displayed().await.unwrap());

    home.load().await.unwrap();

    let err = masthead.is_displayed().await.unwrap_err();
    assert!(matches!(err, VitrinaError::StaleElement { .. }));
}
