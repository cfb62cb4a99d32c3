//! Permissive case-insensitive matching used for every dictionary lookup.
//!
//! Two strings match when either one, lowercased, is a substring of the
//! other. This is deliberately loose: a short name can match an unrelated
//! longer one ("low" inside "yellow"). Dictionaries should avoid very short
//! entries for that reason.

/// True if lowercased `a` is contained in lowercased `b`, or vice versa.
pub fn matches(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    matches_folded(&a, &b)
}

/// Same as [`matches`] for strings that are already lowercased.
pub fn matches_folded(a: &str, b: &str) -> bool {
    b.contains(a) || a.contains(b)
}

/// True if `candidate` matches any entry of `entries`.
pub fn contains<S: AsRef<str>>(entries: &[S], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    entries
        .iter()
        .any(|entry| matches_folded(&entry.as_ref().to_lowercase(), &candidate))
}
