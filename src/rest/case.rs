//! Operation name to path segment conversion.

/// Converts a camel-case identifier into a hyphenated lowercase segment.
///
/// Every uppercase character after the first position that has a lowercase
/// form gets a `-` in front of it; the whole result is lowercased.
///
/// # Example
///
/// ```rust
/// use rest_entity::rest::to_hyphenated;
///
/// assert_eq!(to_hyphenated("repairAll"), "repair-all");
/// assert_eq!(to_hyphenated("id"), "id");
/// assert_eq!(to_hyphenated(""), "");
/// ```
#[must_use]
pub fn to_hyphenated(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (index, c) in input.chars().enumerate() {
        let lower = c.to_lowercase();
        if index > 0 && c.is_uppercase() && !lower.clone().eq(std::iter::once(c)) {
            out.push('-');
        }
        out.extend(lower);
    }
    out
}
