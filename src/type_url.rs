/// Resolver prefix prepended to type names when building a detail's type URL.
pub const DEFAULT_TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Recovers the bare type name from a type URL.
///
/// Returns the text after the last `/`, or the whole string when there is
/// none. No validation of the resulting name is performed.
pub fn type_name_from_url(url: &str) -> &str {
    url.rsplit_once('/').map_or(url, |(_, name)| name)
}

pub fn type_url_for(type_name: &str) -> String {
    format!("{DEFAULT_TYPE_URL_PREFIX}{type_name}")
}
