//! Correlation between a geometry file and the neighbourhood directory.

use hoodmap_core::{BoundaryFeature, Directory, FocusSet, NameIndex};
use std::collections::BTreeSet;
use std::fmt;

/// How boundary features line up with directory records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorrelationReport {
    /// Feature name and the slug it correlates to
    pub matched: Vec<(String, String)>,
    /// Features with no directory record: drawn as context only
    pub background: Vec<String>,
    /// Directory slugs no feature correlates to: marker only
    pub without_geometry: Vec<String>,
    /// Focus names with no feature in the file
    pub unknown_focus: Vec<String>,
}

impl CorrelationReport {
    /// Correlate `features` against `directory` through `index`.
    pub fn build(
        features: &[BoundaryFeature],
        directory: &Directory,
        index: &NameIndex,
        focus: &FocusSet,
    ) -> Self {
        let mut report = Self::default();
        let mut covered = BTreeSet::new();
        for feature in features {
            match index.slug_for(&feature.name) {
                Some(slug) => {
                    covered.insert(slug.to_string());
                    report.matched.push((feature.name.clone(), slug.to_string()));
                }
                None => report.background.push(feature.name.clone()),
            }
        }
        report.without_geometry = directory
            .all()
            .iter()
            .filter(|r| !covered.contains(&r.slug))
            .map(|r| r.slug.clone())
            .collect();

        let drawn: BTreeSet<&str> = features.iter().map(|f| f.name.as_str()).collect();
        report.unknown_focus = focus
            .iter()
            .filter(|name| !drawn.contains(name))
            .map(str::to_string)
            .collect();
        report
    }

    /// Whether every directory record has a polygon.
    pub fn is_complete(&self) -> bool {
        self.without_geometry.is_empty()
    }
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Matched: {}", self.matched.len())?;
        for (name, slug) in &self.matched {
            writeln!(f, "    {name} -> {slug}")?;
        }
        writeln!(f, "  Background only: {}", self.background.len())?;
        for name in &self.background {
            writeln!(f, "    {name}")?;
        }
        writeln!(f, "  Without geometry: {}", self.without_geometry.len())?;
        for slug in &self.without_geometry {
            writeln!(f, "    {slug}")?;
        }
        if !self.unknown_focus.is_empty() {
            writeln!(f, "  Focus names not in geometry: {}", self.unknown_focus.len())?;
            for name in &self.unknown_focus {
                writeln!(f, "    {name}")?;
            }
        }
        Ok(())
    }
}
