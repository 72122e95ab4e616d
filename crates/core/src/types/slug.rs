//! Subdomain-safe store slug.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too short.
    #[error("slug must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that is not allowed in a subdomain.
    #[error("slug may only contain lowercase letters, digits and hyphens (found '{0}')")]
    InvalidCharacter(char),
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A store slug, used as the store's subdomain.
///
/// ## Constraints
///
/// - Length: 3-63 characters (a DNS label is at most 63)
/// - Only lowercase ASCII letters, digits and `-`
/// - Must not start or end with `-`
///
/// ## Examples
///
/// ```
/// use storemaker_core::Slug;
///
/// assert!(Slug::parse("my-store").is_ok());
/// assert!(Slug::parse("My Store").is_err());
/// assert!(Slug::parse("-store").is_err());
///
/// let slug = Slug::from_name("Acme Coffee & Tea").unwrap();
/// assert_eq!(slug.as_str(), "acme-coffee-tea");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Minimum length of a slug.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum length of a slug (DNS label limit).
    pub const MAX_LENGTH: usize = 63;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty, shorter than 3 or longer than 63 characters
    /// - Contains anything other than `a-z`, `0-9` and `-`
    /// - Starts or ends with `-`
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() < Self::MIN_LENGTH {
            return Err(SlugError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a slug from a store name.
    ///
    /// Lowercases ASCII letters, turns every run of other characters into a
    /// single hyphen and trims hyphens from both ends. Returns `None` when
    /// the result would not be a valid slug (e.g. a name with no letters).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let mut out = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
            } else if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
        }
        out.truncate(Self::MAX_LENGTH);
        let trimmed = out.trim_matches('-');
        Self::parse(trimmed).ok()
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(Slug::parse("abc").is_ok());
        assert!(Slug::parse("my-store-2").is_ok());
        assert!(Slug::parse(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
    }

    #[test]
    fn test_length_limits() {
        assert_eq!(Slug::parse("ab"), Err(SlugError::TooShort { min: 3 }));
        assert_eq!(
            Slug::parse(&"a".repeat(64)),
            Err(SlugError::TooLong { max: 63 })
        );
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(Slug::parse("My-store"), Err(SlugError::InvalidCharacter('M')));
        assert_eq!(Slug::parse("my store"), Err(SlugError::InvalidCharacter(' ')));
        assert_eq!(Slug::parse("my_store"), Err(SlugError::InvalidCharacter('_')));
    }

    #[test]
    fn test_edge_hyphens() {
        assert_eq!(Slug::parse("-store"), Err(SlugError::EdgeHyphen));
        assert_eq!(Slug::parse("store-"), Err(SlugError::EdgeHyphen));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            Slug::from_name("  Bob's  Bikes!! ").unwrap().as_str(),
            "bob-s-bikes"
        );
        assert_eq!(Slug::from_name("Shop 24/7").unwrap().as_str(), "shop-24-7");
        assert!(Slug::from_name("!!").is_none());
        assert!(Slug::from_name("ab").is_none());
    }

    #[test]
    fn test_from_name_truncates_to_label_length() {
        let long = "x".repeat(100);
        assert_eq!(Slug::from_name(&long).unwrap().as_str().len(), 63);
    }
}
