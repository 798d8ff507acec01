//! Vitrina: page-object UI verification for marketing-site blades
//!
//! Vitrina (Spanish: "display window") drives a real browser to a marketing
//! site's homepage and verifies its structural sections ("blades") through
//! stable test attributes. Test cases assert against read-only queries plus
//! a small set of interactions (tab switching, carousel navigation).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    VITRINA Architecture                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐         │
//! │   │ HomePage / │    │ Blade      │    │ Driver     │         │
//! │   │ Page       │───►│ components │───►│ (CDP or    │         │
//! │   │ objects    │    │ + waits    │    │  mock DOM) │         │
//! │   └────────────┘    └────────────┘    └────────────┘         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Driver`] trait is the only seam to the browser: [`mock::MockDriver`]
//! runs the full suite against an in-memory DOM, and `ChromiumDriver`
//! (feature `browser`) speaks CDP via chromiumoxide.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod blade;
pub mod blades;
#[cfg(feature = "browser")]
pub mod browser;
pub mod driver;
pub mod locator;
pub mod mock;
pub mod page;
pub mod result;
pub mod wait;

pub use blade::{
    BackdropLayer, Blade, Capabilities, Capability, ClickPolicy, CtaSlot, MediaKind,
};
pub use blades::{
    ArticleCardCarouselBlade, CenteredPromotionBlade, IconTabBlade, MastheadBlade, MediaPromoBlade,
};
#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use driver::{Driver, DriverConfig, ElementHandle, Scope, Viewport};
pub use locator::{Locator, Strategy};
pub use mock::{MockDriver, MockNode};
pub use page::{HomePage, Page};
pub use result::{VitrinaError, VitrinaResult};
pub use wait::{
    wait_for, wait_until_hidden, WaitOptions, WaitUntil, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
