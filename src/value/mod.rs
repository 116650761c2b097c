//! The nested value model lenses operate on.
//!
//! A [`Value`] is one of three shapes:
//!
//! - [`Value::List`]: an ordered, index-addressable sequence of values
//! - [`Value::Dict`]: a mapping from string keys to values, iterated in
//!   insertion order
//! - [`Value::Scalar`]: an opaque leaf that is never traversed further
//!
//! # Examples
//!
//! ```
//! use pathlens::value::{Shape, Value};
//! use pathlens::{dict, list};
//!
//! let mut document = dict! { "x" => list!["a", "b", dict! { "y" => 1, "z" => 2 }] };
//! assert_eq!(document.shape(), Shape::Dict);
//!
//! let items = document.dict_get_mut("x").unwrap();
//! items.list_append(Value::from("c")).unwrap();
//! assert_eq!(items.list_len().unwrap(), 4);
//! assert_eq!(items.list_get(-1).unwrap(), &Value::from("c"));
//! ```

mod shape;

#[cfg(feature = "serde")]
mod serde_support;

use std::fmt;

use indexmap::IndexMap;

use crate::error::{LensError, StepPosition};

pub use shape::Shape;

/// The list payload of a [`Value`].
pub type List = Vec<Value>;

/// The dict payload of a [`Value`]. Keys iterate in insertion order.
pub type Dict = IndexMap<String, Value>;

/// An opaque leaf value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Scalar {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Text(String),
    /// An uninterpreted byte blob.
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Returns the text if this is [`Scalar::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer if this is [`Scalar::Integer`].
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the number as `f64` if this is [`Scalar::Float`] or [`Scalar::Integer`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(float) => Some(*float),
            Self::Integer(integer) => Some(*integer as f64),
            _ => None,
        }
    }

    /// Returns the boolean if this is [`Scalar::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(boolean) => Some(*boolean),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(boolean) => write!(formatter, "{boolean}"),
            Self::Integer(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => write!(formatter, "{float:?}"),
            Self::Text(text) => write!(formatter, "{text:?}"),
            Self::Bytes(bytes) => write!(formatter, "<{} bytes>", bytes.len()),
        }
    }
}

/// A nested heterogeneous value built from lists, dicts and scalars.
///
/// Equality is structural. Dict equality ignores key order, while every
/// traversal over a dict follows its insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An ordered sequence of values.
    List(List),
    /// A string-keyed mapping with unique keys.
    Dict(Dict),
    /// A leaf.
    Scalar(Scalar),
}

impl Default for Value {
    fn default() -> Self {
        Self::Scalar(Scalar::Null)
    }
}

/// Resolves a possibly negative list index against `length`.
///
/// `-1` addresses the last element. Anything outside `[-length, length)`
/// is out of range.
pub(crate) fn resolve_index(index: i64, length: usize) -> Result<usize, LensError> {
    let out_of_range = || LensError::IndexOutOfRange {
        index,
        length,
        at: StepPosition::UNKNOWN,
    };
    let resolved = if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).map_err(|_| out_of_range())?;
        length.checked_sub(back).ok_or_else(out_of_range)?
    } else {
        usize::try_from(index).map_err(|_| out_of_range())?
    };
    if resolved < length {
        Ok(resolved)
    } else {
        Err(out_of_range())
    }
}

impl Value {
    /// The null scalar.
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Creates a list from any iterable of values.
    pub fn list<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(elements.into_iter().map(Into::into).collect())
    }

    /// Creates a dict from `(key, value)` pairs. Later duplicates replace earlier ones.
    pub fn dict<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Self>,
    {
        Self::Dict(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Creates a byte blob scalar.
    #[must_use]
    pub const fn bytes(bytes: Vec<u8>) -> Self {
        Self::Scalar(Scalar::Bytes(bytes))
    }

    /// Returns the list payload, if this is a list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the mutable list payload, if this is a list.
    pub const fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the dict payload, if this is a dict.
    #[must_use]
    pub const fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns the mutable dict payload, if this is a dict.
    pub const fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns the scalar payload, if this is a scalar.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the text of a text scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Returns the integer of an integer scalar.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    /// Returns the number of a numeric scalar.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    /// Returns the boolean of a boolean scalar.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    fn expect_list(&self) -> Result<&List, LensError> {
        match self {
            Self::List(list) => Ok(list),
            other => Err(Shape::List.mismatch(other.shape())),
        }
    }

    fn expect_list_mut(&mut self) -> Result<&mut List, LensError> {
        match self {
            Self::List(list) => Ok(list),
            other => Err(Shape::List.mismatch(other.shape())),
        }
    }

    fn expect_dict(&self) -> Result<&Dict, LensError> {
        match self {
            Self::Dict(dict) => Ok(dict),
            other => Err(Shape::Dict.mismatch(other.shape())),
        }
    }

    fn expect_dict_mut(&mut self) -> Result<&mut Dict, LensError> {
        match self {
            Self::Dict(dict) => Ok(dict),
            other => Err(Shape::Dict.mismatch(other.shape())),
        }
    }

    /// Returns the element at `index`. Negative indices count from the end.
    ///
    /// # Errors
    ///
    /// [`LensError::Shape`] if this is not a list, [`LensError::IndexOutOfRange`]
    /// if `index` is outside the list.
    pub fn list_get(&self, index: i64) -> Result<&Self, LensError> {
        let list = self.expect_list()?;
        let position = resolve_index(index, list.len())?;
        Ok(&list[position])
    }

    /// Returns the element at `index` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`Value::list_get`].
    pub fn list_get_mut(&mut self, index: i64) -> Result<&mut Self, LensError> {
        let list = self.expect_list_mut()?;
        let position = resolve_index(index, list.len())?;
        Ok(&mut list[position])
    }

    /// Replaces the element at `index`, returning the previous element.
    ///
    /// # Errors
    ///
    /// Same as [`Value::list_get`].
    pub fn list_set(&mut self, index: i64, value: Self) -> Result<Self, LensError> {
        let slot = self.list_get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Pushes `value` onto the end of the list.
    ///
    /// # Errors
    ///
    /// [`LensError::Shape`] if this is not a list.
    pub fn list_append(&mut self, value: Self) -> Result<(), LensError> {
        self.expect_list_mut()?.push(value);
        Ok(())
    }

    /// Returns the number of elements in the list.
    ///
    /// # Errors
    ///
    /// [`LensError::Shape`] if this is not a list.
    pub fn list_len(&self) -> Result<usize, LensError> {
        Ok(self.expect_list()?.len())
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`LensError::Shape`] if this is not a dict, [`LensError::KeyNotFound`]
    /// if `key` is absent.
    pub fn dict_get(&self, key: &str) -> Result<&Self, LensError> {
        self.expect_dict()?
            .get(key)
            .ok_or_else(|| LensError::KeyNotFound {
                key: key.to_string(),
                at: StepPosition::UNKNOWN,
            })
    }

    /// Returns the value stored under `key` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`Value::dict_get`].
    pub fn dict_get_mut(&mut self, key: &str) -> Result<&mut Self, LensError> {
        self.expect_dict_mut()?
            .get_mut(key)
            .ok_or_else(|| LensError::KeyNotFound {
                key: key.to_string(),
                at: StepPosition::UNKNOWN,
            })
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// A new key is appended to the iteration order; an existing key keeps
    /// its position.
    ///
    /// # Errors
    ///
    /// [`LensError::Shape`] if this is not a dict.
    pub fn dict_set(&mut self, key: impl Into<String>, value: Self) -> Result<Option<Self>, LensError> {
        Ok(self.expect_dict_mut()?.insert(key.into(), value))
    }

    /// Returns the keys of the dict in insertion order.
    ///
    /// # Errors
    ///
    /// [`LensError::Shape`] if this is not a dict.
    pub fn dict_keys(&self) -> Result<impl Iterator<Item = &str> + '_, LensError> {
        Ok(self.expect_dict()?.keys().map(String::as_str))
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Self {
        Self::Dict(dict)
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Scalar(Scalar::Bool(boolean))
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(integer)))
    }
}

impl From<u32> for Value {
    fn from(integer: u32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(integer)))
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Scalar(Scalar::Integer(integer))
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Self::Scalar(Scalar::Float(float))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Scalar(Scalar::Text(text.to_string()))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Scalar(Scalar::Text(text))
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::List(iterator.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iterator: I) -> Self {
        Self::Dict(
            iterator
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => {
                formatter.write_str("[")?;
                for (position, element) in list.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                formatter.write_str("]")
            }
            Self::Dict(dict) => {
                formatter.write_str("{")?;
                for (position, (key, value)) in dict.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key:?}: {value}")?;
                }
                formatter.write_str("}")
            }
            Self::Scalar(scalar) => write!(formatter, "{scalar}"),
        }
    }
}

// =============================================================================
// Literal macros
// =============================================================================

/// Builds a [`Value::List`] literal, converting each element with `Value::from`.
///
/// # Examples
///
/// ```
/// use pathlens::list;
/// use pathlens::value::Value;
///
/// let value = list![1, "two", list![3.0]];
/// assert_eq!(value.list_len().unwrap(), 3);
/// assert_eq!(list![], Value::List(vec![]));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::value::Value::List(::std::vec::Vec::new())
    };
    ($($element:expr),+ $(,)?) => {
        $crate::value::Value::List(::std::vec![$($crate::value::Value::from($element)),+])
    };
}

/// Builds a [`Value::Dict`] literal, keeping the written key order.
///
/// # Examples
///
/// ```
/// use pathlens::dict;
///
/// let value = dict! { "hello" => 1, "world" => 2 };
/// let keys: Vec<&str> = value.dict_keys().unwrap().collect();
/// assert_eq!(keys, vec!["hello", "world"]);
/// ```
#[macro_export]
macro_rules! dict {
    () => {
        $crate::value::Value::Dict($crate::value::Dict::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut entries = $crate::value::Dict::new();
        $(
            entries.insert(::std::string::String::from($key), $crate::value::Value::from($value));
        )+
        $crate::value::Value::Dict(entries)
    }};
}

static_assertions::assert_impl_all!(Value: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dict, list};
    use rstest::rstest;

    #[rstest]
    #[case(0, 3, Ok(0))]
    #[case(2, 3, Ok(2))]
    #[case(-1, 3, Ok(2))]
    #[case(-3, 3, Ok(0))]
    fn test_resolve_index_in_range(
        #[case] index: i64,
        #[case] length: usize,
        #[case] expected: Result<usize, LensError>,
    ) {
        assert_eq!(resolve_index(index, length), expected);
    }

    #[rstest]
    #[case(3, 3)]
    #[case(-4, 3)]
    #[case(0, 0)]
    #[case(i64::MIN, 3)]
    #[case(i64::MAX, 3)]
    fn test_resolve_index_out_of_range(#[case] index: i64, #[case] length: usize) {
        assert_eq!(
            resolve_index(index, length),
            Err(LensError::IndexOutOfRange {
                index,
                length,
                at: StepPosition::UNKNOWN,
            })
        );
    }

    #[rstest]
    fn test_list_set_returns_previous() {
        let mut value = list!["a", "b"];
        let previous = value.list_set(1, Value::from("c")).unwrap();
        assert_eq!(previous, Value::from("b"));
        assert_eq!(value, list!["a", "c"]);
    }

    #[rstest]
    fn test_list_accessors_reject_dict() {
        let mut value = dict! { "a" => 1 };
        assert!(matches!(value.list_get(0), Err(LensError::Shape { .. })));
        assert!(matches!(
            value.list_append(Value::null()),
            Err(LensError::Shape { .. })
        ));
        assert!(matches!(value.list_len(), Err(LensError::Shape { .. })));
    }

    #[rstest]
    fn test_dict_set_keeps_position_of_existing_key() {
        let mut value = dict! { "a" => 1, "b" => 2 };
        let previous = value.dict_set("a", Value::from(3)).unwrap();
        value.dict_set("c", Value::from(4)).unwrap();

        assert_eq!(previous, Some(Value::from(1)));
        let keys: Vec<&str> = value.dict_keys().unwrap().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(value.dict_get("a").unwrap(), &Value::from(3));
    }

    #[rstest]
    fn test_dict_get_missing_key() {
        let value = dict! { "a" => 1 };
        assert_eq!(
            value.dict_get("b"),
            Err(LensError::KeyNotFound {
                key: "b".to_string(),
                at: StepPosition::UNKNOWN,
            })
        );
    }

    #[rstest]
    fn test_dict_accessors_reject_scalar() {
        let value = Value::from(1);
        assert!(matches!(value.dict_get("a"), Err(LensError::Shape { .. })));
        assert!(value.dict_keys().is_err());
    }

    #[rstest]
    fn test_from_iterator_builds_containers() {
        let list: Value = (1..=3).map(Value::from).collect();
        assert_eq!(list, list![1, 2, 3]);

        let dict: Value = vec![("a", Value::from(1))].into_iter().collect();
        assert_eq!(dict, dict! { "a" => 1 });
    }

    #[rstest]
    fn test_dict_macro_later_duplicate_wins() {
        let value = dict! { "a" => 1, "a" => 2 };
        assert_eq!(value.dict_get("a").unwrap(), &Value::from(2));
        assert_eq!(value.dict_keys().unwrap().count(), 1);
    }

    #[rstest]
    fn test_display_nested() {
        let value = dict! { "x" => list![1, "a", 2.5], "y" => Value::null() };
        assert_eq!(format!("{value}"), r#"{"x": [1, "a", 2.5], "y": null}"#);
    }

    #[rstest]
    fn test_display_bytes() {
        assert_eq!(format!("{}", Value::bytes(vec![1, 2, 3])), "<3 bytes>");
    }

    #[rstest]
    fn test_scalar_readers() {
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(4).as_i64(), Some(4));
        assert_eq!(Value::from(4).as_f64(), Some(4.0));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(list![].as_str(), None);
    }
}
