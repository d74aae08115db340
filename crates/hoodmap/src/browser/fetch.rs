//! Boundary geometry download.

use hoodmap_core::{parse_feature_collection, BoundaryFeature, GeometryError};
#[cfg(target_arch = "wasm32")]
use hoodmap_core::GeometrySource;

/// Turn an HTTP status and body into boundary features.
///
/// # Errors
///
/// Returns [`GeometryError::Status`] for non-2xx statuses, otherwise any
/// parse error of the body.
pub fn decode_geometry_response(
    status: u16,
    body: &str,
) -> Result<Vec<BoundaryFeature>, GeometryError> {
    if !(200..300).contains(&status) {
        return Err(GeometryError::Status(status));
    }
    parse_feature_collection(body)
}

/// Fetch and parse the boundary FeatureCollection at `source`.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_geometry(source: GeometrySource) -> Result<Vec<BoundaryFeature>, GeometryError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let fetch_err = |e: wasm_bindgen::JsValue| {
        GeometryError::Fetch(e.as_string().unwrap_or_else(|| format!("{e:?}")))
    };

    let window = web_sys::window().ok_or_else(|| GeometryError::Fetch("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(source.location()))
        .await
        .map_err(fetch_err)?
        .dyn_into::<web_sys::Response>()
        .map_err(|_| GeometryError::Fetch("not a Response".into()))?;
    let status = response.status();
    let body = JsFuture::from(response.text().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?
        .as_string()
        .unwrap_or_default();
    decode_geometry_response(status, &body)
}
