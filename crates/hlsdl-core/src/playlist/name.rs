//! Local filename derivation for playlist references.

/// Returns the final `/`-delimited segment of `reference`, verbatim.
///
/// Query strings are kept as part of the name. A reference ending in `/`
/// yields an empty string; callers treat that as an unusable name.
pub fn local_filename(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
