//! Name → slug correlation between boundary features and the directory.

use crate::directory::Directory;
use std::collections::HashMap;

/// Fixed lookup from a geometry feature name to a directory slug.
///
/// Derived from the directory (every display name maps to its own slug) and
/// optionally extended with aliases for geometry files that spell names
/// differently. A name absent from the index is valid background context but
/// is never navigable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    slugs: HashMap<String, String>,
}

/// A rejected alias.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    /// The alias points at a slug the directory does not contain
    #[error("alias '{alias}' refers to unknown slug '{slug}'")]
    UnknownSlug {
        /// Geometry name being aliased
        alias: String,
        /// Slug it was pointed at
        slug: String,
    },
    /// The alias would re-point a name that already correlates elsewhere
    #[error("alias '{alias}' -> '{slug}' shadows its existing slug '{existing}'")]
    ShadowsName {
        /// Geometry name being aliased
        alias: String,
        /// Slug it was pointed at
        slug: String,
        /// Slug the name already maps to
        existing: String,
    },
}

impl NameIndex {
    /// Index every directory record under its display name.
    #[must_use]
    pub fn from_directory(directory: &Directory) -> Self {
        let slugs = directory
            .all()
            .iter()
            .map(|r| (r.name.clone(), r.slug.clone()))
            .collect();
        Self { slugs }
    }

    /// Add an alternative geometry name for a directory slug.
    ///
    /// # Errors
    ///
    /// Returns an error if `slug` is not in `directory`, or if `alias`
    /// already maps to a different slug (a display name keeps its own).
    pub fn with_alias(
        mut self,
        directory: &Directory,
        alias: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self, AliasError> {
        let alias = alias.into();
        let slug = slug.into();
        if directory.by_slug(&slug).is_none() {
            return Err(AliasError::UnknownSlug { alias, slug });
        }
        if let Some(existing) = self.slugs.get(&alias) {
            if *existing != slug {
                return Err(AliasError::ShadowsName {
                    existing: existing.clone(),
                    alias,
                    slug,
                });
            }
        }
        self.slugs.insert(alias, slug);
        Ok(self)
    }

    /// Slug for a feature name, if it correlates.
    #[must_use]
    pub fn slug_for(&self, feature_name: &str) -> Option<&str> {
        self.slugs.get(feature_name).map(String::as_str)
    }

    /// Whether a feature name correlates to a directory entry.
    #[must_use]
    pub fn correlates(&self, feature_name: &str) -> bool {
        self.slugs.contains_key(feature_name)
    }

    /// Number of indexed names (display names plus aliases).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_directory() {
        let dir = Directory::builtin();
        let index = NameIndex::from_directory(&dir);
        assert_eq!(index.len(), dir.len());
        assert_eq!(index.slug_for("Oakridge"), Some("oakridge"));
        assert_eq!(index.slug_for("South Cambie"), Some("south-cambie"));
    }

    #[test]
    fn test_unknown_name_does_not_correlate() {
        let index = NameIndex::from_directory(&Directory::builtin());
        assert!(!index.correlates("Strathcona"));
        assert_eq!(index.slug_for("Strathcona"), None);
        assert_eq!(index.slug_for("oakridge"), None);
    }

    #[test]
    fn test_alias() {
        let dir = Directory::builtin();
        let index = NameIndex::from_directory(&dir)
            .with_alias(&dir, "Arbutus-Ridge", "arbutus-ridge")
            .unwrap();
        assert_eq!(index.slug_for("Arbutus-Ridge"), Some("arbutus-ridge"));
        assert_eq!(index.slug_for("Arbutus Ridge"), Some("arbutus-ridge"));
    }

    #[test]
    fn test_alias_to_unknown_slug() {
        let dir = Directory::builtin();
        let err = NameIndex::from_directory(&dir)
            .with_alias(&dir, "Gastown", "gastown")
            .unwrap_err();
        assert_eq!(err.to_string(), "alias 'Gastown' refers to unknown slug 'gastown'");
    }

    #[test]
    fn test_alias_cannot_repoint_display_name() {
        let dir = Directory::builtin();
        let err = NameIndex::from_directory(&dir)
            .with_alias(&dir, "Oakridge", "marpole")
            .unwrap_err();
        assert_eq!(
            err,
            AliasError::ShadowsName {
                alias: "Oakridge".into(),
                slug: "marpole".into(),
                existing: "oakridge".into(),
            }
        );
    }

    #[test]
    fn test_alias_restating_own_slug_is_accepted() {
        let dir = Directory::builtin();
        let index = NameIndex::from_directory(&dir)
            .with_alias(&dir, "Oakridge", "oakridge")
            .unwrap();
        assert_eq!(index.slug_for("Oakridge"), Some("oakridge"));
        assert_eq!(index.len(), dir.len());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(NameIndex::default().is_empty());
    }
}
