//! Specialized blade variants.
//!
//! Each variant wraps the base [`crate::blade::Blade`] with the capability
//! set and locator vocabulary of one homepage section, and derefs to the
//! base so the generic sub-contracts stay available. Variants with real
//! behavior of their own are [`IconTabBlade`] (tab strip bound to a media
//! panel) and [`ArticleCardCarouselBlade`] (responsive controls rules).

mod article_carousel;
mod centered_promotion;
mod icon_tab;
mod masthead;
mod media_promo;

pub use article_carousel::ArticleCardCarouselBlade;
pub use centered_promotion::CenteredPromotionBlade;
pub use icon_tab::IconTabBlade;
pub use masthead::MastheadBlade;
pub use media_promo::MediaPromoBlade;
