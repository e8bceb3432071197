//! Typed conversion of raw option values.
//!
//! An [`Extractor`] turns the token following a parameterized option into a
//! typed value. Built-in extractors cover strings (optionally restricted to a
//! domain), bounded integers and reals, and delimiter-separated lists, which
//! nest to any depth:
//!
//! ```
//! use optlogic::extractor::{self, Extractor};
//!
//! let ranges = extractor::list_of(",", extractor::list_of("-", extractor::integer()).unwrap()).unwrap();
//! assert_eq!(ranges.parse("1-44,2-55").unwrap(), vec![vec![1, 44], vec![2, 55]]);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ExtractorError;

/// A value produced by an extractor and stored in a parsed result.
///
/// Implemented for every `Clone + PartialEq + Debug` type, so custom
/// extractors can return their own structs.
pub trait Value: Any + fmt::Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn eq_value(&self, other: &dyn Value) -> bool;
    fn clone_value(&self) -> Box<dyn Value>;
}

impl<T> Value for T
where
    T: Any + fmt::Debug + Clone + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
}

impl dyn Value {
    /// Borrow the value as `T` if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for dyn Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other)
    }
}

/// Converts a raw string into a typed value.
///
/// `validate(raw)` must return `true` exactly when `parse(raw)` succeeds.
/// Callers may skip `validate` and handle the error from `parse` instead.
pub trait Extractor: fmt::Debug + Send + Sync + 'static {
    type Output: Value + Clone + PartialEq;

    fn validate(&self, raw: &str) -> bool;

    fn parse(&self, raw: &str) -> Result<Self::Output, ExtractorError>;
}

trait ErasedExtractor: fmt::Debug + Send + Sync {
    fn validate_erased(&self, raw: &str) -> bool;
    fn parse_value(&self, raw: &str) -> Result<Box<dyn Value>, ExtractorError>;
}

impl<E: Extractor> ErasedExtractor for E {
    fn validate_erased(&self, raw: &str) -> bool {
        Extractor::validate(self, raw)
    }

    fn parse_value(&self, raw: &str) -> Result<Box<dyn Value>, ExtractorError> {
        let value = Extractor::parse(self, raw)?;
        Ok(Box::new(value))
    }
}

/// Type-erased, shareable extractor as stored on an option.
#[derive(Clone)]
pub struct AnyExtractor(Arc<dyn ErasedExtractor>);

impl AnyExtractor {
    pub fn new<E: Extractor>(extractor: E) -> Self {
        Self(Arc::new(extractor))
    }

    pub fn validate(&self, raw: &str) -> bool {
        self.0.validate_erased(raw)
    }

    pub fn parse(&self, raw: &str) -> Result<Box<dyn Value>, ExtractorError> {
        self.0.parse_value(raw)
    }
}

impl fmt::Debug for AnyExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Accepts any string, or only the strings of a fixed domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringExtractor {
    domain: Option<Vec<String>>,
}

impl StringExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: Some(allowed.into_iter().map(Into::into).collect()),
        }
    }

    pub fn domain(&self) -> Option<&[String]> {
        self.domain.as_deref()
    }
}

impl Extractor for StringExtractor {
    type Output = String;

    fn validate(&self, raw: &str) -> bool {
        match &self.domain {
            Some(domain) => domain.iter().any(|allowed| allowed == raw),
            None => true,
        }
    }

    fn parse(&self, raw: &str) -> Result<String, ExtractorError> {
        if self.validate(raw) {
            Ok(raw.to_string())
        } else {
            Err(ExtractorError::NotInDomain(raw.to_string()))
        }
    }
}

/// Parses an `i32` within inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntExtractor {
    min: i32,
    max: i32,
}

impl Default for IntExtractor {
    fn default() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
        }
    }
}

impl IntExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(min: i32, max: i32) -> Result<Self, ExtractorError> {
        if min >= max {
            return Err(ExtractorError::InvalidBounds {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }
}

impl Extractor for IntExtractor {
    type Output = i32;

    fn validate(&self, raw: &str) -> bool {
        raw.parse::<i32>()
            .is_ok_and(|value| self.min <= value && value <= self.max)
    }

    fn parse(&self, raw: &str) -> Result<i32, ExtractorError> {
        let value = raw
            .parse::<i32>()
            .map_err(|_| ExtractorError::NotAnInteger(raw.to_string()))?;
        if self.min <= value && value <= self.max {
            Ok(value)
        } else {
            Err(ExtractorError::OutOfBounds {
                value: raw.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            })
        }
    }
}

/// Literal spellings recognized as positive infinity.
pub const POSITIVE_INFINITY_ALIASES: &[&str] = &[
    "Infinity",
    "+Infinity",
    "infinity",
    "+infinity",
    "Infty",
    "+Infty",
    "infty",
    "+infty",
    "Inf",
    "+Inf",
    "inf",
    "+inf",
];

/// Literal spellings recognized as negative infinity.
pub const NEGATIVE_INFINITY_ALIASES: &[&str] =
    &["-Infinity", "-infinity", "-Infty", "-infty", "-Inf", "-inf"];

/// Parses an `f64` within inclusive bounds.
///
/// The infinity aliases are matched literally and bypass the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealExtractor {
    min: f64,
    max: f64,
}

impl Default for RealExtractor {
    fn default() -> Self {
        Self {
            min: -f64::MAX,
            max: f64::MAX,
        }
    }
}

impl RealExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(min: f64, max: f64) -> Result<Self, ExtractorError> {
        if min.is_nan() || max.is_nan() {
            return Err(ExtractorError::NanBound);
        }
        if min >= max {
            return Err(ExtractorError::InvalidBounds {
                min: bound_text(min),
                max: bound_text(max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn convert(&self, raw: &str) -> Result<f64, ExtractorError> {
        if POSITIVE_INFINITY_ALIASES.contains(&raw) {
            return Ok(f64::INFINITY);
        }
        if NEGATIVE_INFINITY_ALIASES.contains(&raw) {
            return Ok(f64::NEG_INFINITY);
        }
        if !is_decimal_literal(raw) {
            return Err(ExtractorError::NotAReal(raw.to_string()));
        }
        let value = raw
            .parse::<f64>()
            .map_err(|_| ExtractorError::NotAReal(raw.to_string()))?;
        // NaN fails both comparisons
        if self.min <= value && value <= self.max {
            Ok(value)
        } else {
            Err(ExtractorError::OutOfBounds {
                value: raw.to_string(),
                min: bound_text(self.min),
                max: bound_text(self.max),
            })
        }
    }
}

/// Large magnitudes such as `f64::MAX` print in exponent form.
fn bound_text(bound: f64) -> String {
    if bound.abs() >= 1e16 {
        format!("{bound:e}")
    } else {
        bound.to_string()
    }
}

/// Only `NaN` is accepted as a textual special value; other spellings of
/// infinity must come from the alias tables.
fn is_decimal_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if unsigned == "NaN" {
        return true;
    }
    !unsigned.is_empty()
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

impl Extractor for RealExtractor {
    type Output = f64;

    fn validate(&self, raw: &str) -> bool {
        self.convert(raw).is_ok()
    }

    fn parse(&self, raw: &str) -> Result<f64, ExtractorError> {
        self.convert(raw)
    }
}

fn check_delimiter(delimiter: &str) -> Result<String, ExtractorError> {
    if delimiter.is_empty() {
        return Err(ExtractorError::EmptyDelimiter);
    }
    Ok(delimiter.to_string())
}

fn split_parts<'a>(raw: &'a str, delimiter: &'a str) -> impl Iterator<Item = &'a str> {
    // An empty value is an empty list, not a list with one empty part.
    let raw = if raw.is_empty() { None } else { Some(raw) };
    raw.into_iter().flat_map(move |raw| raw.split(delimiter))
}

/// Splits a value on a literal delimiter, keeping empty parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListExtractor {
    delimiter: String,
}

impl ListExtractor {
    pub fn new(delimiter: &str) -> Result<Self, ExtractorError> {
        Ok(Self {
            delimiter: check_delimiter(delimiter)?,
        })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl Extractor for ListExtractor {
    type Output = Vec<String>;

    fn validate(&self, _raw: &str) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Vec<String>, ExtractorError> {
        Ok(split_parts(raw, &self.delimiter)
            .map(str::to_string)
            .collect())
    }
}

/// Splits a value on a literal delimiter and parses every part with a
/// nested extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedListExtractor<E> {
    delimiter: String,
    inner: E,
}

impl<E: Extractor> NestedListExtractor<E> {
    pub fn new(delimiter: &str, inner: E) -> Result<Self, ExtractorError> {
        Ok(Self {
            delimiter: check_delimiter(delimiter)?,
            inner,
        })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: Extractor> Extractor for NestedListExtractor<E> {
    type Output = Vec<E::Output>;

    fn validate(&self, raw: &str) -> bool {
        split_parts(raw, &self.delimiter).all(|part| self.inner.validate(part))
    }

    fn parse(&self, raw: &str) -> Result<Vec<E::Output>, ExtractorError> {
        split_parts(raw, &self.delimiter)
            .map(|part| self.inner.parse(part))
            .collect()
    }
}

/// Unbounded string extractor.
pub fn string() -> StringExtractor {
    StringExtractor::new()
}

/// String extractor restricted to `allowed`.
pub fn one_of<I, S>(allowed: I) -> StringExtractor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StringExtractor::with_domain(allowed)
}

/// Integer extractor over the whole `i32` range.
pub fn integer() -> IntExtractor {
    IntExtractor::new()
}

/// Integer extractor accepting `min..=max`.
pub fn integer_in(min: i32, max: i32) -> Result<IntExtractor, ExtractorError> {
    IntExtractor::bounded(min, max)
}

/// Real extractor over all finite `f64` values and the infinity aliases.
pub fn real() -> RealExtractor {
    RealExtractor::new()
}

/// Real extractor accepting `min..=max` and the infinity aliases.
pub fn real_in(min: f64, max: f64) -> Result<RealExtractor, ExtractorError> {
    RealExtractor::bounded(min, max)
}

/// List of strings separated by `delimiter`.
pub fn list(delimiter: &str) -> Result<ListExtractor, ExtractorError> {
    ListExtractor::new(delimiter)
}

/// List of values separated by `delimiter`, each parsed by `inner`.
pub fn list_of<E: Extractor>(
    delimiter: &str,
    inner: E,
) -> Result<NestedListExtractor<E>, ExtractorError> {
    NestedListExtractor::new(delimiter, inner)
}
