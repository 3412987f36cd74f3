//! URL resolution and logging-scope decisions.
//!
//! A call is in-scope for logging when its resolved origin matches the
//! client's configured base origin. Cross-origin calls still execute but
//! are never logged; this bounds log volume and keeps third-party traffic
//! details out of the store.

use url::Url;

/// Resolves a request URL against the base origin.
///
/// Relative URLs are joined onto the base; absolute URLs replace it, which
/// is how cross-origin calls enter the pipeline.
///
/// # Arguments
///
/// * `base` - The client's configured base origin
/// * `url` - The request URL, absolute or relative
///
/// # Returns
///
/// The fully resolved URL, or a parse error for unresolvable input.
pub fn resolve_url(base: &Url, url: &str) -> Result<Url, url::ParseError> {
    base.join(url)
}

/// Decides whether a resolved URL is in-scope for logging.
///
/// # Arguments
///
/// * `base` - The client's configured base origin
/// * `target` - The resolved request URL
///
/// # Returns
///
/// `true` when scheme, host, and port all match the base origin.
pub fn is_in_scope(base: &Url, target: &Url) -> bool {
    base.origin() == target.origin()
}
