//! Partial version bounds (`4`, `4.x`, `4.x.x`, `3.0.0-beta`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::VersionError;

static PARTIAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^v?(?<major>[0-9]+|[xX*])(?:\.(?<minor>[0-9]+|[xX*]))?(?:\.(?<patch>[0-9]+|[xX*]))?(?:-(?<pre>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+(?<build>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$").unwrap()
});

/// Upper bound of a partial version used as the top of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Inclusive(semver::Version),
    Exclusive(semver::Version),
}

/// A version with possibly missing or wildcard components.
///
/// `None` means the component was omitted or written as `x`, `X` or `*`.
/// Once a component is a wildcard every later component is one too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partial {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre_release: Option<semver::Prerelease>,
}

impl Partial {
    /// Parse partial version string.
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let trimmed = s.trim();
        let caps = PARTIAL_REGEX
            .captures(trimmed)
            .ok_or_else(|| VersionError::InvalidBound(s.to_string()))?;

        let component = |name: &str| -> Result<Option<u64>, VersionError> {
            match caps.name(name).map(|c| c.as_str()) {
                None | Some("x" | "X" | "*") => Ok(None),
                Some(digits) => digits
                    .parse()
                    .map(Some)
                    .map_err(|_| VersionError::InvalidBound(s.to_string())),
            }
        };

        let major = component("major")?;
        let minor = major.and(component("minor")?);
        let patch = minor.and(component("patch")?);
        let pre_release = caps
            .name("pre")
            .map(|p| semver::Prerelease::new(p.as_str()))
            .transpose()
            .map_err(|_| VersionError::InvalidBound(s.to_string()))?;

        if pre_release.is_some() && patch.is_none() {
            return Err(VersionError::InvalidBound(s.to_string()));
        }

        Ok(Partial {
            major,
            minor,
            patch,
            pre_release,
        })
    }

    /// All three components are present.
    pub fn is_full(&self) -> bool {
        self.patch.is_some()
    }

    /// Matches every version (`*`, `x`).
    pub fn is_any(&self) -> bool {
        self.major.is_none()
    }

    /// The lowest version covered, missing components filled with zero.
    pub fn floor(&self) -> semver::Version {
        let mut version = semver::Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        if let Some(pre) = &self.pre_release {
            version.pre = pre.clone();
        }
        version
    }

    /// The top of the covered interval, or `None` when unbounded.
    ///
    /// `4.1.2` is inclusive, while `4.x.x` stops before `5.0.0` and `4.1` before `4.2.0`.
    pub fn upper(&self) -> Option<Bound> {
        match (self.major, self.minor, self.patch) {
            (None, _, _) => None,
            (Some(major), None, _) => Some(Bound::Exclusive(semver::Version::new(major + 1, 0, 0))),
            (Some(major), Some(minor), None) => {
                Some(Bound::Exclusive(semver::Version::new(major, minor + 1, 0)))
            }
            (Some(_), Some(_), Some(_)) => Some(Bound::Inclusive(self.floor())),
        }
    }

    /// Render only the numeric components, e.g. `4` for `4.x.x`.
    pub fn numeric(&self) -> String {
        let mut out = String::new();
        for (i, component) in [self.major, self.minor, self.patch]
            .into_iter()
            .map_while(|c| c)
            .enumerate()
        {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&component.to_string());
        }
        if let Some(pre) = &self.pre_release {
            out.push('-');
            out.push_str(pre.as_str());
        }
        out
    }
}

impl std::str::FromStr for Partial {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Partial::parse(s)
    }
}

impl std::fmt::Display for Partial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |c: Option<u64>| c.map_or_else(|| "x".to_string(), |n| n.to_string());
        write!(
            f,
            "{}.{}.{}",
            show(self.major),
            show(self.minor),
            show(self.patch)
        )?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
