//! Key normalization for case/whitespace-insensitive lookups

/// Normalize a lookup key: strip all whitespace, lower-case
///
/// Applied to brand names, template filename stems, and box type/group
/// values so that `"BASIC_M"`, `"basic_m"` and `" Basic _ M "` all
/// resolve to the same template.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Normalize an origin-country code: strip all whitespace, upper-case
///
/// Produces the `<CODE>` used for icon filenames (`icon_<CODE>.png`)
/// and the "MADE IN <CODE>" text fallback.
pub fn normalize_country(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_uppercase())
        .collect()
}
