//! Shape predicates for [`Value`].
//!
//! Every step of a lens acts on exactly one container shape. A step that
//! meets any other shape fails with [`LensError::Shape`], built by
//! [`Shape::mismatch`].

use std::fmt;

use crate::error::{LensError, StepPosition};
use crate::value::Value;

/// The runtime variant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    /// An ordered sequence of values.
    List,
    /// A string-keyed, insertion-ordered mapping.
    Dict,
    /// An opaque leaf.
    Scalar,
}

impl Shape {
    /// Returns the shape of `value`.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::List(_) => Self::List,
            Value::Dict(_) => Self::Dict,
            Value::Scalar(_) => Self::Scalar,
        }
    }

    /// Returns `true` if `value` has this shape.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        Self::of(value) == self
    }

    /// Fails with [`LensError::Shape`] unless `value` has this shape.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Shape`] without a step position.
    pub fn require(self, value: &Value) -> Result<(), LensError> {
        let found = Self::of(value);
        if found == self {
            Ok(())
        } else {
            Err(self.mismatch(found))
        }
    }

    /// Builds the error reported when `found` stands where `self` was expected.
    #[must_use]
    pub const fn mismatch(self, found: Self) -> LensError {
        LensError::Shape {
            expected: self,
            found,
            at: StepPosition::UNKNOWN,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Dict => "dict",
            Self::Scalar => "scalar",
        };
        formatter.write_str(name)
    }
}

impl Value {
    /// Returns the shape of this value.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        Shape::of(self)
    }

    /// Returns `true` if this value is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns `true` if this value is a dict.
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(_))
    }

    /// Returns `true` if this value is a scalar leaf.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}
