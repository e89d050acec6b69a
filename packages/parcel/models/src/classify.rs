//! Per-row exemption and water classification rules.
//!
//! Both classifiers are pure functions over a small fixed set of assessor
//! fields (owner, land-use code, land-use description) so they can be
//! applied row-by-row with no shared state.

/// Owner-name prefixes that mark a parcel as tax-exempt regardless of its
/// land-use code. Matched case-insensitively against the start of the
/// owner field.
pub const EXEMPT_OWNER_PREFIXES: &[&str] = &[
    "TOWN OF ARLINGTON",
    "COMMONWEALTH OF MASSACHUSETTS",
    "MASSACHUSETTS",
    "UNITED STATES",
    "U S A",
    "FEDERAL",
    "MBTA",
    "MWRA",
    "HOUSING AUTHORITY",
];

/// Substrings that tag a parcel as water-related when found in the owner
/// name or land-use description (case-insensitive).
pub const WATER_KEYWORDS: &[&str] = &["RESERVOIR", "AQUEDUCT", "WATER DEPT", "MWRA", "DCR"];

/// Land-use codes (integer prefix, before any `.` suffix) that denote
/// water bodies and utility waterworks.
pub const WATER_LANDUSE_CODES: &[&str] = &["920", "925"];

/// Returns true when the parcel should generate no modeled tax revenue.
///
/// Any single condition suffices: a land-use code starting with `9`
/// (the exempt classification block), or an owner name starting with one
/// of the public/government prefixes.
#[must_use]
pub fn is_exempt(owner: Option<&str>, landuse_code: Option<&str>) -> bool {
    if let Some(code) = landuse_code
        && code.trim().starts_with('9')
    {
        return true;
    }

    let Some(owner) = owner else {
        return false;
    };
    let owner = owner.to_uppercase();
    EXEMPT_OWNER_PREFIXES
        .iter()
        .any(|prefix| owner.starts_with(prefix))
}

/// Returns true when the parcel is water-related.
///
/// Informational tag only; does not feed into exemption or tax math.
#[must_use]
pub fn is_water(
    owner: Option<&str>,
    landuse_code: Option<&str>,
    landuse_description: Option<&str>,
) -> bool {
    if let Some(code) = landuse_code {
        let prefix = code.trim().split('.').next().unwrap_or("");
        if WATER_LANDUSE_CODES.contains(&prefix) {
            return true;
        }
    }

    let owner_upper = owner.map(str::to_uppercase).unwrap_or_default();
    let desc_upper = landuse_description.map(str::to_uppercase).unwrap_or_default();

    WATER_KEYWORDS
        .iter()
        .any(|key| owner_upper.contains(key) || desc_upper.contains(key))
}
