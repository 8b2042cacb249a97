//! Package keys (`Acme.Site`) and the names derived from them

use crate::error::KickstartError;
use std::fmt;
use std::str::FromStr;

/// A validated, dotted package key such as `Acme.Site`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageKey(String);

impl PackageKey {
    /// Validate a package key.
    ///
    /// A key is a vendor segment of ASCII letters and digits, a dot, and at
    /// least one more segment which may itself contain dots.
    pub fn parse(key: &str) -> Result<Self, KickstartError> {
        if Self::is_valid(key) {
            Ok(Self(key.to_string()))
        } else {
            Err(KickstartError::InvalidPackageKey(key.to_string()))
        }
    }

    pub fn is_valid(key: &str) -> bool {
        let Some((vendor, rest)) = key.split_once('.') else {
            return false;
        };
        !vendor.is_empty()
            && vendor.chars().all(|c| c.is_ascii_alphanumeric())
            && rest.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
            && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Composer package name: `Acme.Site.Blog` -> `acme/site-blog`
    pub fn composer_name(&self) -> String {
        let (vendor, rest) = self.0.split_once('.').unwrap_or((self.0.as_str(), ""));
        format!("{}/{}", vendor, rest.replace('.', "-")).to_lowercase()
    }

    /// PSR-4 namespace prefix: `Acme.Site` -> `Acme\Site\`
    pub fn namespace(&self) -> String {
        format!("{}\\", self.0.replace('.', "\\"))
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PackageKey {
    type Err = KickstartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PackageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        for key in ["Acme.Site", "Acme.Demo", "Foo.Bar.Baz", "Neos.Demo2", "a1.b"] {
            assert!(PackageKey::is_valid(key), "{key} should be valid");
        }
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["", "Solo", ".Acme", "Acme.", "Acme..Site", "Acme-Corp.Site", "Acme.Site!", "Äcme.Site"] {
            assert!(!PackageKey::is_valid(key), "{key} should be invalid");
        }
    }

    #[test]
    fn test_parse_error_carries_key() {
        let err = PackageKey::parse("not a key").unwrap_err();
        assert!(matches!(err, KickstartError::InvalidPackageKey(k) if k == "not a key"));
    }

    #[test]
    fn test_composer_name() {
        assert_eq!(PackageKey::parse("Acme.Site").unwrap().composer_name(), "acme/site");
        assert_eq!(
            PackageKey::parse("Acme.Site.Blog").unwrap().composer_name(),
            "acme/site-blog"
        );
    }

    #[test]
    fn test_namespace() {
        assert_eq!(
            PackageKey::parse("Acme.Site.Blog").unwrap().namespace(),
            "Acme\\Site\\Blog\\"
        );
    }

    #[test]
    fn test_from_str_and_display() {
        let key: PackageKey = "Acme.Demo".parse().unwrap();
        assert_eq!(key.to_string(), "Acme.Demo");
    }
}
