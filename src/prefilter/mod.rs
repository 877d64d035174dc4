//! Download pre-filter
//!
//! A local check on an archive filename that decides whether a range request
//! is issued at all. Two rules, first match wins:
//!
//! 1. captures of `robots.txt` are never pages;
//! 2. a filename containing a deny-listed language tag (e.g. `en-GB`) almost
//!    certainly points at a page in some other language.
//!
//! The deny-list is a substring heuristic. A tag that happens to appear inside
//! an unrelated path segment causes a false reject.

mod registry;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use registry::{LanguageRegistry, RegistryEntry};

use crate::config::LanguageConfig;
use crate::error::Result;
use crate::types::SkipReason;
use std::collections::BTreeSet;
use tracing::info;

/// Filename suffix of robots-exclusion captures
pub const ROBOTS_FILE_NAME: &str = "robots.txt";

/// Language/region tags whose presence in a filename disqualifies it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DenyList {
    tokens: BTreeSet<String>,
}

impl DenyList {
    /// Derive the deny-list from a registry
    ///
    /// A tag is kept when its description does not mention `target_name` and
    /// the tag is at least `min_len` characters long. Short codes such as `ar`
    /// are dropped even for non-target languages.
    pub fn from_registry(registry: &LanguageRegistry, target_name: &str, min_len: usize) -> Self {
        let tokens = registry
            .entries()
            .iter()
            .filter(|entry| !entry.description.contains(target_name))
            .filter(|entry| entry.tag.chars().count() >= min_len)
            .map(|entry| entry.tag.clone())
            .collect();
        Self { tokens }
    }

    /// Build from the language settings: the configured registry file, or the built-in table
    ///
    /// # Errors
    /// Propagates registry load failures; this runs once at startup.
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        let registry = match &config.registry_path {
            Some(path) => LanguageRegistry::load(path)?,
            None => LanguageRegistry::builtin(),
        };
        let deny_list = Self::from_registry(&registry, &config.name, config.min_token_len);
        info!(
            registry_entries = registry.len(),
            deny_tokens = deny_list.len(),
            target = %config.name,
            "built language deny-list"
        );
        Ok(deny_list)
    }

    /// Use an explicit token set
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// First token (in sorted order) that occurs in `haystack`
    pub fn first_match(&self, haystack: &str) -> Option<&str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .find(|token| haystack.contains(token))
    }

    /// True if `token` is on the list
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Tokens in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if nothing is deny-listed
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Filename eligibility check applied before any download
#[derive(Clone, Debug)]
pub struct PreFilter {
    deny_list: DenyList,
}

impl PreFilter {
    /// Create a filter around a precomputed deny-list
    pub fn new(deny_list: DenyList) -> Self {
        Self { deny_list }
    }

    /// Why `file_name` should not be fetched, or `None` if it is eligible
    pub fn rejection(&self, file_name: &str) -> Option<SkipReason> {
        if file_name.ends_with(ROBOTS_FILE_NAME) {
            return Some(SkipReason::RobotsFile);
        }

        self.deny_list
            .first_match(file_name)
            .map(|token| SkipReason::DeniedLanguage(token.to_string()))
    }

    /// True if `file_name` passes both rules
    pub fn is_eligible(&self, file_name: &str) -> bool {
        self.rejection(file_name).is_none()
    }

    /// The deny-list in use
    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }
}
