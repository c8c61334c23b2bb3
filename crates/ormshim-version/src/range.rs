//! npm-style version ranges evaluated with `semver` comparators.
//!
//! Every `||` alternative is lowered to one [`semver::VersionReq`]. Hyphen
//! ranges, x-ranges and bare exact versions are rewritten into explicit
//! comparators first, because Cargo's requirement syntax reads a bare version
//! as a caret requirement.
//!
//! Prerelease handling is the `semver` crate's: a version like `5.0.0-beta`
//! only satisfies an alternative that itself names a prerelease of `5.0.0`.
//! The universal wildcard is the exception and matches everything.

use semver::VersionReq;

use crate::{Bound, Partial, Version, VersionError};

const OPERATORS: [&str; 7] = [">=", "<=", ">", "<", "=", "^", "~"];

/// Contract for deciding whether a version falls inside a range.
pub trait RangeMatcher {
    fn matches(&self, version: &Version, range: &VersionRange) -> bool;
}

/// Default matcher backed by the `semver` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverMatcher;

impl RangeMatcher for SemverMatcher {
    fn matches(&self, version: &Version, range: &VersionRange) -> bool {
        range.matches(version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RangeKind {
    Any,
    Union(Vec<VersionReq>),
}

/// A parsed range expression, keeping its source text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    source: String,
    kind: RangeKind,
}

impl VersionRange {
    /// The universal wildcard `*`.
    pub fn any() -> Self {
        Self {
            source: "*".to_string(),
            kind: RangeKind::Any,
        }
    }

    pub fn parse(source: &str) -> Result<Self, VersionError> {
        let trimmed = source.trim();
        let invalid = |reason: String| VersionError::InvalidRange {
            range: source.to_string(),
            reason,
        };

        if trimmed.is_empty() || is_universal(trimmed) {
            return Ok(Self {
                source: trimmed.to_string(),
                kind: RangeKind::Any,
            });
        }

        let mut alternatives = Vec::new();
        for alternative in trimmed.split("||").map(str::trim) {
            if alternative.is_empty() {
                return Err(invalid("empty alternative".to_string()));
            }
            if is_universal(alternative) {
                return Ok(Self {
                    source: trimmed.to_string(),
                    kind: RangeKind::Any,
                });
            }
            alternatives.push(lower_alternative(alternative).map_err(invalid)?);
        }

        Ok(Self {
            source: trimmed.to_string(),
            kind: RangeKind::Union(alternatives),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, RangeKind::Any)
    }

    pub fn matches(&self, version: &Version) -> bool {
        match &self.kind {
            RangeKind::Any => true,
            RangeKind::Union(alternatives) => {
                alternatives.iter().any(|req| req.matches(version.inner()))
            }
        }
    }

    /// Versions named by the comparators of this range, in order of appearance.
    ///
    /// These are the edges where a table's bindings change, so they are the
    /// interesting points to check when auditing coverage.
    pub fn boundaries(&self) -> Vec<Version> {
        let RangeKind::Union(alternatives) = &self.kind else {
            return Vec::new();
        };

        let mut out: Vec<Version> = Vec::new();
        for comparator in alternatives.iter().flat_map(|req| req.comparators.iter()) {
            let mut version = semver::Version::new(
                comparator.major,
                comparator.minor.unwrap_or(0),
                comparator.patch.unwrap_or(0),
            );
            version.pre = comparator.pre.clone();
            let version = Version::from(version);
            if !out.contains(&version) {
                out.push(version);
            }
        }
        out
    }
}

impl std::str::FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::parse(s)
    }
}

impl std::fmt::Display for VersionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// A lone partial whose components are all wildcards: `*`, `x.x.x`, `=X.x`.
fn is_universal(alternative: &str) -> bool {
    let rest = alternative.strip_prefix('=').unwrap_or(alternative).trim();
    !rest.contains(char::is_whitespace) && Partial::parse(rest).is_ok_and(|partial| partial.is_any())
}

fn lower_alternative(alternative: &str) -> Result<VersionReq, String> {
    let comparators = match alternative.split_once(" - ") {
        Some((low, high)) => hyphen(low.trim(), high.trim())?,
        None => comparator_set(alternative)?,
    };

    let joined = if comparators.is_empty() {
        "*".to_string()
    } else {
        comparators.join(", ")
    };
    // `*` inside a comparator set still rejects prereleases, unlike a
    // top-level wildcard.
    VersionReq::parse(&joined).map_err(|e| e.to_string())
}

fn hyphen(low: &str, high: &str) -> Result<Vec<String>, String> {
    let low = Partial::parse(low).map_err(|e| e.to_string())?;
    let high = Partial::parse(high).map_err(|e| e.to_string())?;

    let mut out = Vec::new();
    if !low.is_any() {
        out.push(format!(">={}", low.floor()));
    }
    match high.upper() {
        Some(Bound::Inclusive(v)) => out.push(format!("<={}", v)),
        Some(Bound::Exclusive(v)) => out.push(format!("<{}", v)),
        None => {}
    }
    Ok(out)
}

fn comparator_set(alternative: &str) -> Result<Vec<String>, String> {
    let mut out = Vec::new();
    let mut pending_op: Option<&str> = None;

    for token in alternative.split_whitespace() {
        if OPERATORS.contains(&token) {
            if pending_op.replace(token).is_some() {
                return Err(format!("operator '{}' without a version", token));
            }
            continue;
        }

        let (op, rest) = match pending_op.take() {
            Some(op) => (op, token),
            None => split_operator(token),
        };
        out.extend(comparator(op, rest)?);
    }

    if let Some(op) = pending_op {
        return Err(format!("operator '{}' without a version", op));
    }
    Ok(out)
}

fn split_operator(token: &str) -> (&str, &str) {
    OPERATORS
        .iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (*op, rest)))
        .unwrap_or(("", token))
}

fn comparator(op: &str, version: &str) -> Result<Vec<String>, String> {
    let partial = Partial::parse(version).map_err(|e| e.to_string())?;

    if partial.is_any() {
        return match op {
            "" | "=" | ">=" | "<=" | "^" | "~" => Ok(Vec::new()),
            _ => Err(format!("'{}{}' matches nothing", op, version)),
        };
    }

    match op {
        // x-ranges and bare exact versions.
        "" | "=" if partial.is_full() => Ok(vec![format!("={}", partial.floor())]),
        "" | "=" => {
            let mut out = vec![format!(">={}", partial.floor())];
            if let Some(Bound::Exclusive(v)) = partial.upper() {
                out.push(format!("<{}", v));
            }
            Ok(out)
        }
        _ => Ok(vec![format!("{}{}", op, partial.numeric())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    fn r(s: &str) -> VersionRange {
        s.parse().unwrap()
    }

    #[test]
    fn test_comparison() {
        assert!(r(">=3.0.0").matches(&v("3.0.0")));
        assert!(r(">=3.0.0").matches(&v("7.1.0")));
        assert!(!r(">=3.0.0").matches(&v("2.9.9")));
        assert!(r("<5").matches(&v("4.99.0")));
        assert!(!r("<5").matches(&v("5.0.0")));
    }

    #[test]
    fn test_caret() {
        assert!(r("^2.0.0").matches(&v("2.5.0")));
        assert!(!r("^2.0.0").matches(&v("3.0.0")));
        assert!(!r("^2.0.0").matches(&v("1.9.0")));
    }

    #[test]
    fn test_bare_version_is_exact() {
        assert!(r("2.1.0").matches(&v("2.1.0")));
        assert!(!r("2.1.0").matches(&v("2.1.1")));
    }

    #[test]
    fn test_x_range() {
        assert!(r("4.x").matches(&v("4.44.3")));
        assert!(!r("4.x").matches(&v("5.0.0")));
        assert!(r("4.1").matches(&v("4.1.9")));
        assert!(!r("4.1").matches(&v("4.2.0")));
    }

    #[test]
    fn test_hyphen_partial_upper() {
        let range = r("3.0.0 - 4.x.x");
        assert!(range.matches(&v("3.0.0")));
        assert!(range.matches(&v("4.44.3")));
        assert!(!range.matches(&v("5.0.0")));
        assert!(!range.matches(&v("2.9.0")));
    }

    #[test]
    fn test_hyphen_full_upper_is_inclusive() {
        let range = r("2.0.0 - 3.1.4");
        assert!(range.matches(&v("3.1.4")));
        assert!(!range.matches(&v("3.1.5")));
    }

    #[test]
    fn test_separated_operator() {
        assert!(r(">= 3.0.0 < 4").matches(&v("3.5.0")));
        assert!(!r(">= 3.0.0 < 4").matches(&v("4.0.0")));
        assert!(">=".parse::<VersionRange>().is_err());
    }

    #[test]
    fn test_union() {
        let range = r("^2.0.0 || >=4.0.0");
        assert!(range.matches(&v("2.3.0")));
        assert!(!range.matches(&v("3.0.0")));
        assert!(range.matches(&v("4.0.0")));
    }

    #[test]
    fn test_prerelease_excluded_from_plain_ranges() {
        assert!(!r(">=3.0.0").matches(&v("5.0.0-beta")));
        assert!(!r("3.0.0 - 4.x.x").matches(&v("5.0.0-beta")));
        assert!(!r("2.0.0 - 3.x.x").matches(&v("3.0.0-rc.1")));
    }

    #[test]
    fn test_prerelease_boundary_admits_stream() {
        let range = r(">=4.0.0 || >=5.0.0-beta");
        assert!(range.matches(&v("5.0.0-beta")));
        assert!(range.matches(&v("5.0.0-beta.4")));
        assert!(range.matches(&v("5.0.0-rc.1")));
        assert!(!range.matches(&v("5.0.0-alpha")));
        assert!(!range.matches(&v("6.0.0-beta")));
    }

    #[test]
    fn test_wildcard_matches_prerelease() {
        assert!(r("*").matches(&v("5.0.0-beta")));
        assert!(r("").matches(&v("0.0.1")));
        assert!(r("^2.0.0 || *").is_wildcard());
    }

    #[test]
    fn test_spelled_out_wildcards_are_universal() {
        for source in ["x.x.x", "*.*", "X.x", "=*", "^2.0.0 || x.x"] {
            let range = r(source);
            assert!(range.is_wildcard(), "{}", source);
            assert!(range.matches(&v("5.0.0-beta")), "{}", source);
        }
        assert!(!r(">=x.x.x").is_wildcard());
        assert!(!r("x.x.x <5").is_wildcard());
    }

    #[test]
    fn test_invalid_prerelease_is_rejected() {
        assert!("5.0.0-01".parse::<VersionRange>().is_err());
        assert!(">=5.0.0-beta.01".parse::<VersionRange>().is_err());
        assert!(r(">=5.0.0-beta.1").matches(&v("5.0.0-beta.2")));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(">=three".parse::<VersionRange>().is_err());
        assert!("^2.0.0 ||".parse::<VersionRange>().is_err());
        assert!(">*".parse::<VersionRange>().is_err());
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(r("3.0.0 - 4.x.x").boundaries(), vec![v("3.0.0"), v("5.0.0")]);
        assert_eq!(
            r(">=4.0.0 || >=5.0.0-beta").boundaries(),
            vec![v("4.0.0"), v("5.0.0-beta")]
        );
        assert!(r("*").boundaries().is_empty());
    }

    #[test]
    fn test_display_keeps_source() {
        assert_eq!(r(" ^2.0.0 ").to_string(), "^2.0.0");
    }
}
