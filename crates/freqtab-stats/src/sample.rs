//! Validated numeric samples
//!
//! Every analysis starts from a [`Sample`]: a non-empty, sorted sequence of
//! finite `f64` values. Free-form text is turned into a sample by
//! [`Sample::parse`] (strict) or [`Sample::parse_lenient`] (drops tokens that
//! are not numbers), so the statistical code never sees NaN, infinities, or
//! an empty slice.
//!
//! # Token syntax
//!
//! Tokens are separated by any run of whitespace and/or commas. Each token
//! must parse as an `f64` literal (`3`, `-2.5`, `1e3`, `.5`). A comma is
//! always a separator, never a decimal mark.
//!
//! # Examples
//!
//! ```
//! use freqtab_stats::sample::Sample;
//!
//! let sample = Sample::parse("5, 3 1\n4,2").unwrap();
//! assert_eq!(sample.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
//! assert_eq!(sample.min(), 1.0);
//! assert_eq!(sample.max(), 5.0);
//! ```

use serde::Serialize;

/// Errors produced while building a [`Sample`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParseSampleError {
    #[display("no data provided")]
    Empty,
    #[display("'{token}' (token #{position}) is not a number")]
    InvalidToken { token: String, position: usize },
    #[display("'{token}' (token #{position}) is not a finite number")]
    NonFinite { token: String, position: usize },
    #[display("no valid numbers found ({skipped} tokens skipped)")]
    NoValidNumbers { skipped: usize },
}

/// A non-empty, ascending sequence of finite values.
///
/// Immutable once built; derived statistics borrow it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample {
    values: Vec<f64>,
}

/// Result of [`Sample::parse_lenient`].
#[derive(Debug, Clone, PartialEq)]
pub struct LenientParse {
    pub sample: Sample,
    /// Tokens that were dropped because they were not finite numbers.
    pub skipped_tokens: Vec<String>,
}

impl Sample {
    /// Builds a sample from already-parsed values, sorting them ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqtab_stats::sample::Sample;
    /// let sample = Sample::new([3.0, 1.0, 2.0]).unwrap();
    /// assert_eq!(sample.as_slice(), &[1.0, 2.0, 3.0]);
    ///
    /// assert!(Sample::new([]).is_err());
    /// assert!(Sample::new([1.0, f64::NAN]).is_err());
    /// ```
    pub fn new<I>(values: I) -> Result<Self, ParseSampleError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(ParseSampleError::NonFinite {
                token: values[position].to_string(),
                position: position + 1,
            });
        }
        if values.is_empty() {
            return Err(ParseSampleError::Empty);
        }
        values.sort_by(f64::total_cmp);
        Ok(Self { values })
    }

    /// Parses whitespace/comma separated numbers, rejecting any bad token.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqtab_stats::sample::{ParseSampleError, Sample};
    /// let err = Sample::parse("1 2 x 4").unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     ParseSampleError::InvalidToken { token: "x".to_owned(), position: 3 }
    /// );
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseSampleError> {
        let mut values = vec![];
        for (idx, token) in tokens(text).enumerate() {
            let position = idx + 1;
            let value = token
                .parse::<f64>()
                .map_err(|_| ParseSampleError::InvalidToken {
                    token: token.to_owned(),
                    position,
                })?;
            if !value.is_finite() {
                return Err(ParseSampleError::NonFinite {
                    token: token.to_owned(),
                    position,
                });
            }
            values.push(value);
        }
        Self::new(values)
    }

    /// Parses numbers, silently dropping tokens that are not finite numbers.
    ///
    /// Fails only when the text holds no token at all, or when every token
    /// was dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqtab_stats::sample::Sample;
    /// let parsed = Sample::parse_lenient("1, two, 3, inf").unwrap();
    /// assert_eq!(parsed.sample.as_slice(), &[1.0, 3.0]);
    /// assert_eq!(parsed.skipped_tokens, ["two", "inf"]);
    /// ```
    pub fn parse_lenient(text: &str) -> Result<LenientParse, ParseSampleError> {
        let mut values = vec![];
        let mut skipped_tokens = vec![];
        for token in tokens(text) {
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() => values.push(value),
                _ => skipped_tokens.push(token.to_owned()),
            }
        }
        if values.is_empty() {
            if skipped_tokens.is_empty() {
                return Err(ParseSampleError::Empty);
            }
            return Err(ParseSampleError::NoValidNumbers {
                skipped: skipped_tokens.len(),
            });
        }
        if !skipped_tokens.is_empty() {
            tracing::debug!(skipped = skipped_tokens.len(), "dropped non-numeric tokens");
        }
        Ok(LenientParse {
            sample: Self::new(values)?,
            skipped_tokens,
        })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// `max - min`
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max() - self.min()
    }

    /// Sample size as `f64`, the divisor used by every mean and percentage.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn size(&self) -> f64 {
        self.values.len() as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let sample = Sample::parse("  4,,2 \t 9\n1 ,3  ").unwrap();
        assert_eq!(sample.as_slice(), &[1.0, 2.0, 3.0, 4.0, 9.0]);
        assert_eq!(sample.len(), 5);
        assert!((sample.size() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(Sample::parse(""), Err(ParseSampleError::Empty));
        assert_eq!(Sample::parse(" , \n "), Err(ParseSampleError::Empty));
        assert_eq!(
            Sample::parse_lenient("   ").unwrap_err(),
            ParseSampleError::Empty
        );
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        let err = Sample::parse("1 NaN").unwrap_err();
        assert_eq!(
            err,
            ParseSampleError::NonFinite {
                token: "NaN".to_owned(),
                position: 2
            }
        );
        assert!(Sample::parse("inf").is_err());
    }

    #[test]
    fn test_parse_lenient_all_invalid() {
        let err = Sample::parse_lenient("a b c").unwrap_err();
        assert_eq!(err, ParseSampleError::NoValidNumbers { skipped: 3 });
    }

    #[test]
    fn test_new_sorts_negative_and_fractional() {
        let sample = Sample::new([0.5, -3.25, 2.0, -0.0]).unwrap();
        assert_eq!(sample.as_slice(), &[-3.25, -0.0, 0.5, 2.0]);
        assert!((sample.range() - 5.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scientific_notation() {
        let sample = Sample::parse("1e2 2.5E-1 -4").unwrap();
        assert_eq!(sample.as_slice(), &[-4.0, 0.25, 100.0]);
    }

    #[test]
    fn test_error_messages() {
        let err = Sample::parse("1 abc").unwrap_err();
        assert_eq!(err.to_string(), "'abc' (token #2) is not a number");
        let err = Sample::parse_lenient("x y").unwrap_err();
        assert_eq!(err.to_string(), "no valid numbers found (2 tokens skipped)");
    }
}
