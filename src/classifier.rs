//! Language classification from the `<meta name="language">` hint
//!
//! Only the declared hint is consulted; page text is never analysed. The tag is
//! optional in HTML, so plenty of pages in the target language carry no hint
//! and are reported as non-matching. Those false negatives are accepted.

use crate::error::{Error, Result};
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// What the language hint of a page says
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageHint {
    /// No `<meta name="language">` element
    Missing,
    /// Element present without a `content` attribute
    NoContent,
    /// Element present; its `content` value, verbatim
    Declared(String),
}

/// Classifies pages by their declared language
#[derive(Debug)]
pub struct LanguageClassifier {
    target: String,
    meta_name: String,
    selector: Selector,
}

impl LanguageClassifier {
    /// Create a classifier matching `content` exactly against `target`
    ///
    /// `meta_name` is the `name` attribute that identifies the hint element
    /// (normally `language`).
    ///
    /// # Errors
    /// [`Error::Config`] if `meta_name` does not form a valid CSS selector.
    pub fn new(target: impl Into<String>, meta_name: impl Into<String>) -> Result<Self> {
        let meta_name = meta_name.into();
        let css = format!("meta[name=\"{}\"]", meta_name.replace('"', "\\\""));
        let selector = Selector::parse(&css).map_err(|e| {
            Error::config(
                "language.meta_name",
                format!("cannot build selector {}: {:?}", css, e),
            )
        })?;

        Ok(Self {
            target: target.into(),
            meta_name,
            selector,
        })
    }

    /// Target language code
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Read the language hint out of raw page bytes
    ///
    /// Bytes are decoded as UTF-8 with replacement characters; the first
    /// matching element wins.
    pub fn hint(&self, html: &[u8]) -> LanguageHint {
        let text = String::from_utf8_lossy(html);
        let document = Html::parse_document(&text);

        match document.select(&self.selector).next() {
            None => LanguageHint::Missing,
            Some(element) => match element.value().attr("content") {
                None => LanguageHint::NoContent,
                Some(value) => LanguageHint::Declared(value.to_string()),
            },
        }
    }

    /// True if the page declares exactly the target language
    pub fn classify(&self, html: &[u8], url_key: &str) -> bool {
        match self.hint(html) {
            LanguageHint::Declared(value) if value == self.target => true,
            LanguageHint::Declared(other) => {
                debug!(url_key, language = %other, "page is not marked as {}", self.target);
                false
            }
            LanguageHint::NoContent => {
                warn!(url_key, meta = %self.meta_name, "language meta tag has no 'content' attribute");
                false
            }
            LanguageHint::Missing => {
                warn!(url_key, meta = %self.meta_name, "no language tag found");
                false
            }
        }
    }
}
