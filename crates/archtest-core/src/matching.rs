//! Segment-aware path matching for namespaces and imports.

/// Tests whether `needle` occurs in `path` on `/` segment boundaries.
///
/// Matches when `path` equals `needle`, starts with `needle/`, ends with
/// `/needle`, or contains `/needle/`. `"order"` therefore matches
/// `"app/order"` and `"order/sub"` but not `"reorder"` or `"orderly"`.
///
/// # Examples
///
/// ```
/// use archtest_core::matching::segment_match;
///
/// assert!(segment_match("app/internal/domain", "internal/domain"));
/// assert!(!segment_match("app/subdomain", "domain"));
/// ```
#[must_use]
pub fn segment_match(path: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    if path == needle {
        return true;
    }
    if path
        .strip_prefix(needle)
        .is_some_and(|rest| rest.starts_with('/'))
    {
        return true;
    }
    if path
        .strip_suffix(needle)
        .is_some_and(|rest| rest.ends_with('/'))
    {
        return true;
    }
    path.contains(&format!("/{needle}/"))
}

/// Tests whether any of `imports` segment-matches `dependency`.
#[must_use]
pub fn any_import_matches(imports: &[String], dependency: &str) -> bool {
    imports.iter().any(|imp| segment_match(imp, dependency))
}
