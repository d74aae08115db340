//! Navigation and lead-capture collaborators.

/// Default prefix of neighbourhood detail pages.
pub const DEFAULT_ROUTE_PREFIX: &str = "/neighbourhoods";

/// Client-side navigation provided by the host page.
pub trait Navigator {
    /// Go to `path`.
    fn navigate(&self, path: &str);
}

/// Lead-capture pipeline provided by the host page.
///
/// The call is opaque: the map hands over the slug and forgets it.
pub trait LeadCapture {
    /// Ask for a market report on one neighbourhood.
    fn request_report(&self, slug: &str);
}

/// Builds detail-page paths from slugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRoutes {
    prefix: String,
}

impl DetailRoutes {
    /// Routes under `prefix`. Trailing slashes are dropped.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        Self {
            prefix: trimmed.to_string(),
        }
    }

    /// The route prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path of a detail page.
    #[must_use]
    pub fn path_for(&self, slug: &str) -> String {
        format!("{}/{}", self.prefix, slug)
    }

    /// Slug of a detail-page path, if `path` is one.
    ///
    /// Query strings and fragments are ignored.
    #[must_use]
    pub fn slug_from_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let rest = path.strip_prefix(self.prefix.as_str())?.strip_prefix('/')?;
        let slug = rest.trim_end_matches('/');
        (!slug.is_empty() && !slug.contains('/')).then_some(slug)
    }
}

impl Default for DetailRoutes {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_PREFIX)
    }
}
