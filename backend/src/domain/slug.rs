//! URL-friendly community slug.
//!
//! Slugs are non-empty identifiers composed of lowercase ASCII letters,
//! digits and hyphens. Surrounding whitespace is trimmed; case is not folded,
//! so `Foo` is rejected rather than silently colliding with `foo`.

use std::fmt;

/// Maximum slug length in characters.
pub const SLUG_MAX: usize = 255;

/// Slug validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    /// The slug was blank.
    #[error("slug must not be empty")]
    Empty,
    /// The slug exceeds `max` characters.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// The slug contains characters outside `a-z`, `0-9` and `-`.
    #[error("slug may only contain lowercase letters, digits, or hyphens")]
    InvalidCharacters,
}

/// Globally unique community slug.
///
/// # Examples
/// ```
/// use backend::domain::Slug;
///
/// assert!(Slug::new("rust-berlin").is_ok());
/// assert!(Slug::new("Rust Berlin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a slug.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] for blank, oversized or non-slug input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SlugError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SlugError::Empty);
        }
        if trimmed.len() > SLUG_MAX {
            return Err(SlugError::TooLong { max: SLUG_MAX });
        }
        if !trimmed.chars().all(is_slug_char) {
            return Err(SlugError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-'
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
