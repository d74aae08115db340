//! Integration tests for hoodmap-yaml.

use hoodmap_core::{AliasError, Directory, RenderMode};
use hoodmap_yaml::{BoundaryConfig, ManifestError, MapManifest};
use proptest::prelude::*;

// =============================================================================
// Manifest Round Trip
// =============================================================================

#[test]
fn test_built_manifest_survives_yaml() {
    let mut manifest = MapManifest::default();
    manifest.title = "Westside".into();
    manifest.boundaries = Some(BoundaryConfig::focused("/geo.json", "Oakridge"));

    let yaml = manifest.to_yaml().expect("serialize");
    let loaded = MapManifest::load(&yaml).expect("valid");
    assert_eq!(loaded, manifest);
    assert_eq!(loaded.mode().expect("mode"), Some(RenderMode::focused("Oakridge")));
}

#[test]
fn test_garbage_is_yaml_error() {
    assert!(matches!(
        MapManifest::load("hoodmap: [unterminated"),
        Err(ManifestError::Yaml(_))
    ));
}

#[test]
fn test_empty_source_rejected() {
    let mut manifest = MapManifest::default();
    manifest.boundaries = Some(BoundaryConfig::overview("  "));
    assert!(matches!(
        manifest.validate(),
        Err(ManifestError::MissingField(field)) if field == "boundaries.source"
    ));
}

// =============================================================================
// Aliases
// =============================================================================

const SHADOWING_ALIAS: &str = "hoodmap: '0.1'
boundaries:
  source: /data/vancouver.geojson
  aliases:
    Oakridge: marpole
";

#[test]
fn test_alias_shadowing_display_name_rejected() {
    match MapManifest::load(SHADOWING_ALIAS) {
        Err(ManifestError::Alias(AliasError::ShadowsName {
            alias, existing, ..
        })) => {
            assert_eq!(alias, "Oakridge");
            assert_eq!(existing, "oakridge");
        }
        other => panic!("expected shadowing alias error, got {other:?}"),
    }

    let manifest = MapManifest::from_yaml(SHADOWING_ALIAS).expect("parses");
    assert!(manifest.name_index(&Directory::builtin()).is_err());
}

#[test]
fn test_alias_for_new_geometry_name_accepted() {
    let yaml = SHADOWING_ALIAS.replace("Oakridge: marpole", "Oakridge-Marpole South: marpole");
    let manifest = MapManifest::load(&yaml).expect("valid");
    let index = manifest.name_index(&Directory::builtin()).expect("index");
    assert_eq!(index.slug_for("Oakridge"), Some("oakridge"));
    assert_eq!(index.slug_for("Oakridge-Marpole South"), Some("marpole"));
}

// =============================================================================
// Route Prefix Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_absolute_prefix_builds_child_routes(
        segment in "[a-z]{1,12}",
        slug in "[a-z0-9]{1,10}"
    ) {
        let mut manifest = MapManifest::default();
        manifest.route_prefix = format!("/{segment}/");
        prop_assert!(manifest.validate().is_ok());
        prop_assert_eq!(manifest.routes().path_for(&slug), format!("/{segment}/{slug}"));
    }

    #[test]
    fn prop_relative_prefix_rejected(segment in "[a-z]{1,12}") {
        let mut manifest = MapManifest::default();
        manifest.route_prefix = segment;
        prop_assert!(manifest.validate().is_err());
    }
}
