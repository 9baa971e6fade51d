//! Image version resolution.
//!
//! Derives the current and next semantic version from a container image
//! reference, and composes fully qualified image references for a registry.
//! Every input resolves to a version: anything that is not a clean
//! `major.minor.patch` tag falls back to [`SemanticVersion::DEFAULT`], and the
//! returned [`VersionSource`] records which path was taken.

use std::fmt;

/// Rendered form of [`SemanticVersion::DEFAULT`].
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Highest value `minor` and `patch` may hold before carrying.
const CARRY_LIMIT: u64 = 99;

/// A `major.minor.patch` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    pub const DEFAULT: Self = Self::new(1, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a tag of exactly three dot-separated, all-digit components.
    ///
    /// Returns `None` for anything else (`v1.2.3`, `1.2`, `1.2.3-rc1`, `latest`),
    /// and for versions whose successor would overflow `major`.
    pub fn parse(tag: &str) -> Option<Self> {
        let mut parts = tag.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        let version = Self::new(
            parse_component(major)?,
            parse_component(minor)?,
            parse_component(patch)?,
        );
        version.checked_next()?;
        Some(version)
    }

    /// The version after this one, or `None` when carrying into `major`
    /// would overflow.
    ///
    /// Patch is bumped by one. Patch past 99 carries into minor, minor past 99
    /// carries into major.
    pub fn checked_next(self) -> Option<Self> {
        let Self {
            mut major,
            mut minor,
            mut patch,
        } = self;

        patch = patch.saturating_add(1);
        if patch > CARRY_LIMIT {
            patch = 0;
            minor = minor.saturating_add(1);
        }
        if minor > CARRY_LIMIT {
            minor = 0;
            major = major.checked_add(1)?;
        }

        Some(Self::new(major, minor, patch))
    }

    /// The version after this one.
    ///
    /// A version at the top of the `major` range is returned unchanged.
    /// [`SemanticVersion::parse`] never yields one.
    pub fn next(self) -> Self {
        match self.checked_next() {
            Some(next) => next,
            None => self,
        }
    }
}

impl Default for SemanticVersion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    s.chars().try_fold(0u64, |acc, c| {
        let digit = c.to_digit(10)?;
        acc.checked_mul(10)?.checked_add(u64::from(digit))
    })
}

/// How the current version of an image was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// The tag was a well-formed `major.minor.patch`.
    Parsed,
    /// The image carried no tag (or an empty one); the default was used.
    Untagged,
    /// The tag could not be parsed; the default was used for the increment.
    Malformed,
}

impl VersionSource {
    pub fn is_well_formed(self) -> bool {
        matches!(self, Self::Parsed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parsed => "parsed",
            Self::Untagged => "untagged",
            Self::Malformed => "malformed",
        }
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`extract_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// Tag exactly as found on the image, or `1.0.0` when there was none.
    pub current: String,
    /// Rendered next version.
    pub next: String,
    pub source: VersionSource,
}

/// The tag of an image reference: everything after the last `:`.
///
/// Returns `None` when there is no `:` or nothing follows it.
pub fn image_tag(image: &str) -> Option<&str> {
    image
        .rsplit_once(':')
        .map(|(_, tag)| tag)
        .filter(|tag| !tag.is_empty())
}

/// Resolve the current version of `image` and the version to publish next.
///
/// Never fails. Untagged and malformed images increment from `1.0.0`.
pub fn extract_version(image: &str) -> ResolvedVersion {
    let Some(tag) = image_tag(image) else {
        tracing::info!(
            image,
            "no version set on image, using default {DEFAULT_VERSION}"
        );
        return ResolvedVersion {
            current: DEFAULT_VERSION.to_owned(),
            next: SemanticVersion::DEFAULT.next().to_string(),
            source: VersionSource::Untagged,
        };
    };

    let (base, source) = match SemanticVersion::parse(tag) {
        Some(version) => (version, VersionSource::Parsed),
        None => {
            tracing::warn!(
                image,
                tag,
                "tag is not an incrementable major.minor.patch, using {DEFAULT_VERSION}"
            );
            (SemanticVersion::DEFAULT, VersionSource::Malformed)
        }
    };

    tracing::debug!(image, current = tag, %base, "resolved image version");

    ResolvedVersion {
        current: tag.to_owned(),
        next: base.next().to_string(),
        source,
    }
}

/// Short image name: `{prefix}_{service}`, or just `service` without a prefix.
pub fn image_name(prefix: &str, service: &str) -> String {
    if prefix.is_empty() {
        service.to_owned()
    } else {
        format!("{prefix}_{service}")
    }
}

/// Compose `{registry}/{image_name}:{version}`.
///
/// An empty `version` becomes `1.0.0`. Otherwise the parts are joined as
/// given, with one normalization: trailing slashes on `registry` are dropped,
/// the way a path join would, so `reg/` and `reg` give the same reference.
pub fn format_image_reference(
    registry: &str,
    prefix: &str,
    service: &str,
    version: &str,
) -> String {
    let version = if version.is_empty() {
        DEFAULT_VERSION
    } else {
        version
    };
    format!(
        "{registry}/{name}:{version}",
        registry = registry.trim_end_matches('/'),
        name = image_name(prefix, service),
    )
}
