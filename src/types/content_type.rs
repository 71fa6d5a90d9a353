//! Resource type detection from vendor content types.

/// The vendor segment the RightScale API puts in its media types.
pub const DEFAULT_VENDOR: &str = "rightscale";

/// Extracts the resource type from a vendor media type.
///
/// `application/vnd.rightscale.server_array+json` yields `server_array`.
/// Returns `None` when the vendor segment or the `+json` suffix is absent,
/// in which case the payload carries no hypermedia bindings.
///
/// ```rust
/// use right_api::types::resource_type_from_content_type;
///
/// let kind = resource_type_from_content_type(
///     "application/vnd.rightscale.deployment+json;type=collection",
///     "rightscale",
/// );
/// assert_eq!(kind.as_deref(), Some("deployment"));
/// assert!(resource_type_from_content_type("application/json", "rightscale").is_none());
/// ```
pub fn resource_type_from_content_type(content_type: &str, vendor: &str) -> Option<String> {
    let marker = format!(".{}.", vendor);
    let start = content_type.find(&marker)? + marker.len();
    let rest = &content_type[start..];
    let end = rest.rfind("+json")?;
    Some(rest[..end].to_string())
}
