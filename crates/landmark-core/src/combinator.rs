//! The primitive validator kernel.
//!
//! Validators are immutable values built once and composed by construction:
//! literal tags, pairs, arrays, non-empty arrays, string-keyed records,
//! ordered unions and intersections. Each validator both decides whether an
//! untyped [`Value`] conforms and names, through its associated `Output`
//! type, the precise static type of the values it accepts. Composite
//! validators derive their `Output` from their constituents, so the type of
//! a whole grammar is resolved at construction, never by runtime inspection.
//!
//! Validation is pure and re-entrant: no validator mutates shared state, so
//! a validator built at startup may be used from any number of threads.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{nested, ErrorKind, Validated, ValidationError};

/// A decision procedure over untyped JSON values, together with the static
/// type of the values it accepts.
pub trait Validate {
    /// The precise type of values this validator accepts.
    type Output;

    /// Human-readable description of the accepted shape, for reports.
    fn expecting(&self) -> String;

    /// Check `value`, producing the typed value or a list of rejections
    /// whose paths are relative to `value`.
    fn validate(&self, value: &Value) -> Validated<Self::Output>;

    /// Adapt the typed output, keeping the accept/reject decision intact.
    fn map<T, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> T,
    {
        Map { inner: self, f }
    }
}

/// A boxed validator with a known output type, as stored by [`OneOf`].
pub type BoxValidator<T> = Box<dyn Validate<Output = T> + Send + Sync>;

/// Output adapter returned by [`Validate::map`].
pub struct Map<V, F> {
    inner: V,
    f: F,
}

impl<V, F, T> Validate for Map<V, F>
where
    V: Validate,
    F: Fn(V::Output) -> T,
{
    type Output = T;

    fn expecting(&self) -> String {
        self.inner.expecting()
    }

    fn validate(&self, value: &Value) -> Validated<T> {
        self.inner.validate(value).map(&self.f)
    }
}

/// Overrides the reported name of a validator without changing its
/// decision. Used to give grammar-level names to composed shapes.
pub struct Named<V> {
    name: &'static str,
    inner: V,
}

/// Wrap `inner` so reports refer to it as `name`.
pub fn named<V: Validate>(name: &'static str, inner: V) -> Named<V> {
    Named { name, inner }
}

impl<V: Validate> Validate for Named<V> {
    type Output = V::Output;

    fn expecting(&self) -> String {
        self.name.to_string()
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        self.inner.validate(value)
    }
}

/// Accepts exactly one string constant, e.g. the `"Point"` tag.
pub struct Literal {
    tag: &'static str,
}

/// A validator for one specific string constant.
pub fn literal(tag: &'static str) -> Literal {
    Literal { tag }
}

impl Validate for Literal {
    type Output = ();

    fn expecting(&self) -> String {
        format!("\"{}\"", self.tag)
    }

    fn validate(&self, value: &Value) -> Validated<()> {
        match value {
            Value::String(tag) if tag == self.tag => Ok(()),
            Value::String(tag) => Err(vec![ValidationError::here(ErrorKind::TagMismatch {
                expected: self.tag.to_string(),
                found: tag.clone(),
            })]),
            other => Err(vec![shape_mismatch(self.expecting(), other)]),
        }
    }
}

/// Any JSON number, as `f64`.
pub struct Number;

/// A validator for JSON numbers. Strings are never coerced.
pub fn number() -> Number {
    Number
}

impl Validate for Number {
    type Output = f64;

    fn expecting(&self) -> String {
        "a number".to_string()
    }

    fn validate(&self, value: &Value) -> Validated<f64> {
        value
            .as_f64()
            .ok_or_else(|| vec![shape_mismatch(self.expecting(), value)])
    }
}

/// Any JSON string.
pub struct Str;

/// A validator for JSON strings.
pub fn string() -> Str {
    Str
}

impl Validate for Str {
    type Output = String;

    fn expecting(&self) -> String {
        "a string".to_string()
    }

    fn validate(&self, value: &Value) -> Validated<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(vec![shape_mismatch(self.expecting(), other)]),
        }
    }
}

/// JSON `null`, and nothing else.
pub struct Null;

/// A validator for explicit `null`.
pub fn null() -> Null {
    Null
}

impl Validate for Null {
    type Output = ();

    fn expecting(&self) -> String {
        "null".to_string()
    }

    fn validate(&self, value: &Value) -> Validated<()> {
        match value {
            Value::Null => Ok(()),
            other => Err(vec![shape_mismatch(self.expecting(), other)]),
        }
    }
}

/// Accepts any JSON value verbatim.
pub struct AnyValue;

/// A validator that accepts anything, carrying the value through unchanged.
pub fn any() -> AnyValue {
    AnyValue
}

impl Validate for AnyValue {
    type Output = Value;

    fn expecting(&self) -> String {
        "any value".to_string()
    }

    fn validate(&self, value: &Value) -> Validated<Value> {
        Ok(value.clone())
    }
}

/// A sequence of exactly two elements, validated in order. Rejects on wrong
/// arity, and reports the first failing element's index.
pub struct Pair<A, B> {
    first: A,
    second: B,
}

/// A fixed 2-tuple validator.
pub fn pair<A: Validate, B: Validate>(first: A, second: B) -> Pair<A, B> {
    Pair { first, second }
}

impl<A: Validate, B: Validate> Validate for Pair<A, B> {
    type Output = (A::Output, B::Output);

    fn expecting(&self) -> String {
        format!("[{}, {}]", self.first.expecting(), self.second.expecting())
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        let Some(items) = value.as_array() else {
            return Err(vec![shape_mismatch(self.expecting(), value)]);
        };
        if items.len() != 2 {
            return Err(vec![ValidationError::here(ErrorKind::ShapeMismatch {
                expected: self.expecting(),
                found: format!("an array of {} elements", items.len()),
            })]);
        }
        let first = self
            .first
            .validate(&items[0])
            .map_err(|errors| nested(0, errors))?;
        let second = self
            .second
            .validate(&items[1])
            .map_err(|errors| nested(1, errors))?;
        Ok((first, second))
    }
}

/// A homogeneous array of any length, including zero. Reports every failing
/// index with path context.
pub struct List<T> {
    item: T,
}

/// An array validator, element type `item`.
pub fn list<T: Validate>(item: T) -> List<T> {
    List { item }
}

impl<T: Validate> Validate for List<T> {
    type Output = Vec<T::Output>;

    fn expecting(&self) -> String {
        format!("an array of {}", self.item.expecting())
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        let Some(items) = value.as_array() else {
            return Err(vec![shape_mismatch(self.expecting(), value)]);
        };
        let mut out = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.item.validate(item) {
                Ok(item) => out.push(item),
                Err(item_errors) => errors.extend(nested(index, item_errors)),
            }
        }
        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }
}

/// As [`List`], but additionally rejects zero elements.
pub struct NonEmptyList<T> {
    inner: List<T>,
}

/// A non-empty array validator, element type `item`.
pub fn non_empty_list<T: Validate>(item: T) -> NonEmptyList<T> {
    NonEmptyList { inner: list(item) }
}

impl<T: Validate> Validate for NonEmptyList<T> {
    type Output = Vec<T::Output>;

    fn expecting(&self) -> String {
        format!("a non-empty array of {}", self.inner.item.expecting())
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        if let Some(items) = value.as_array() {
            if items.is_empty() {
                return Err(vec![ValidationError::here(ErrorKind::EmptinessViolation {
                    expected: self.expecting(),
                })]);
            }
        }
        self.inner.validate(value)
    }
}

/// A string-keyed object whose values all validate against one validator.
/// Keys are carried through as-is.
pub struct Record<V> {
    value: V,
}

/// A dictionary validator, value type `value`.
pub fn record<V: Validate>(value: V) -> Record<V> {
    Record { value }
}

impl<V: Validate> Validate for Record<V> {
    type Output = BTreeMap<String, V::Output>;

    fn expecting(&self) -> String {
        format!("an object of {}", self.value.expecting())
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        let Some(entries) = value.as_object() else {
            return Err(vec![shape_mismatch(self.expecting(), value)]);
        };
        let mut out = BTreeMap::new();
        let mut errors = Vec::new();
        for (key, entry) in entries {
            match self.value.validate(entry) {
                Ok(entry) => {
                    out.insert(key.clone(), entry);
                }
                Err(entry_errors) => errors.extend(nested(key.as_str(), entry_errors)),
            }
        }
        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }
}

/// Ordered union: alternatives are tried in declared order and the first
/// success wins, so overlapping shapes resolve deterministically. If every
/// alternative rejects, the rejections are aggregated under a single
/// [`ErrorKind::NoMatch`].
pub struct OneOf<T> {
    name: &'static str,
    alternatives: Vec<BoxValidator<T>>,
}

/// A union validator over `alternatives`, reported as `name`.
pub fn one_of<T>(name: &'static str, alternatives: Vec<BoxValidator<T>>) -> OneOf<T> {
    OneOf { name, alternatives }
}

impl<T> Validate for OneOf<T> {
    type Output = T;

    fn expecting(&self) -> String {
        self.name.to_string()
    }

    fn validate(&self, value: &Value) -> Validated<T> {
        let mut rejections = Vec::new();
        for alternative in &self.alternatives {
            match alternative.validate(value) {
                Ok(out) => return Ok(out),
                Err(errors) => rejections.extend(errors),
            }
        }
        tracing::trace!(union = self.name, "no alternative matched");
        Err(vec![ValidationError::here(ErrorKind::NoMatch {
            name: self.name.to_string(),
            alternatives: rejections,
        })])
    }
}

/// Intersection: the same value must satisfy both validators. The derived
/// output is the pair of both outputs; the structural merge into a single
/// domain value happens in the [`Validate::map`] that follows.
pub struct Both<A, B> {
    left: A,
    right: B,
}

/// An intersection validator over `left` and `right`.
pub fn both<A: Validate, B: Validate>(left: A, right: B) -> Both<A, B> {
    Both { left, right }
}

impl<A: Validate, B: Validate> Validate for Both<A, B> {
    type Output = (A::Output, B::Output);

    fn expecting(&self) -> String {
        self.left.expecting()
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        match (self.left.validate(value), self.right.validate(value)) {
            (Ok(left), Ok(right)) => Ok((left, right)),
            (Err(errors), Ok(_)) | (Ok(_), Err(errors)) => Err(errors),
            (Err(mut left), Err(right)) => {
                left.extend(right);
                Err(left)
            }
        }
    }
}

/// A required key on an object. Absence is a [`ErrorKind::MissingField`];
/// a key present with value `null` is validated like any other value.
pub struct RequiredField<V> {
    key: &'static str,
    value: V,
}

/// A validator for the required object key `key`.
pub fn required<V: Validate>(key: &'static str, value: V) -> RequiredField<V> {
    RequiredField { key, value }
}

impl<V: Validate> Validate for RequiredField<V> {
    type Output = V::Output;

    fn expecting(&self) -> String {
        format!("an object with \"{}\"", self.key)
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        let Some(entries) = value.as_object() else {
            return Err(vec![shape_mismatch("an object".to_string(), value)]);
        };
        match entries.get(self.key) {
            Some(entry) => self
                .value
                .validate(entry)
                .map_err(|errors| nested(self.key, errors)),
            None => Err(vec![ValidationError::at(
                self.key,
                ErrorKind::MissingField {
                    field: self.key.to_string(),
                },
            )]),
        }
    }
}

/// An optional key on an object: absent keys yield `None`, present keys
/// must validate.
pub struct OptionalField<V> {
    key: &'static str,
    value: V,
}

/// A validator for the optional object key `key`.
pub fn optional<V: Validate>(key: &'static str, value: V) -> OptionalField<V> {
    OptionalField { key, value }
}

impl<V: Validate> Validate for OptionalField<V> {
    type Output = Option<V::Output>;

    fn expecting(&self) -> String {
        format!("an object, optionally with \"{}\"", self.key)
    }

    fn validate(&self, value: &Value) -> Validated<Self::Output> {
        let Some(entries) = value.as_object() else {
            return Err(vec![shape_mismatch("an object".to_string(), value)]);
        };
        match entries.get(self.key) {
            Some(entry) => self
                .value
                .validate(entry)
                .map(Some)
                .map_err(|errors| nested(self.key, errors)),
            None => Ok(None),
        }
    }
}

/// Describe the structural kind of a JSON value, for mismatch reports.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn shape_mismatch(expected: String, found: &Value) -> ValidationError {
    ValidationError::here(ErrorKind::ShapeMismatch {
        expected,
        found: json_kind(found).to_string(),
    })
}
