//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an immutable (strategy, value) pair identifying zero or
//! more elements relative to some scope. It is a plain value: equality is by
//! value, it owns no driver resource, and the same locator can be evaluated
//! against different scopes.
//!
//! Blades on the pages under verification expose stable `data-testid`
//! attributes, so [`Strategy::TestId`] is the workhorse; the other strategies
//! cover section roots (`Strategy::Id`), media tags (`Strategy::TagName`),
//! and legacy class-based hooks (`Strategy::ClassName`).

use serde::{Deserialize, Serialize};

/// Strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Match by element id
    Id,
    /// Raw CSS selector, passed through to the driver
    Css,
    /// Match by tag name (e.g. "video", "img", "h1")
    TagName,
    /// Match by exact `data-testid` attribute value
    TestId,
    /// Match by `data-testid` attribute substring
    TestIdContains,
    /// Match by class name
    ClassName,
}

/// A locator for finding elements within a scope.
///
/// Locators are cheap to clone and compare; they carry no timeout or wait
/// behavior of their own — waits take a locator plus explicit options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    /// Create a locator matching an element id
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Id,
            value: value.into(),
        }
    }

    /// Create a raw CSS selector locator
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css,
            value: value.into(),
        }
    }

    /// Create a locator matching a tag name
    #[must_use]
    pub fn tag(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::TagName,
            value: value.into(),
        }
    }

    /// Create a locator matching an exact `data-testid` value
    #[must_use]
    pub fn test_id(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::TestId,
            value: value.into(),
        }
    }

    /// Create a locator matching a `data-testid` substring
    #[must_use]
    pub fn test_id_contains(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::TestIdContains,
            value: value.into(),
        }
    }

    /// Create a locator matching a class name
    #[must_use]
    pub fn class_name(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::ClassName,
            value: value.into(),
        }
    }

    /// Get the strategy
    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Get the raw value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render as a CSS selector for drivers that only speak CSS
    #[must_use]
    pub fn to_css(&self) -> String {
        match self.strategy {
            Strategy::Id => format!("#{}", self.value),
            Strategy::Css => self.value.clone(),
            Strategy::TagName => self.value.clone(),
            Strategy::TestId => format!("[data-testid='{}']", self.value),
            Strategy::TestIdContains => format!("[data-testid*='{}']", self.value),
            Strategy::ClassName => format!(".{}", self.value),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_css())
    }
}
