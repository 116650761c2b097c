//! A single segment of a lens path.
//!
//! Steps come in two flavours:
//!
//! - direct descents ([`Step::Key`], [`Step::Index`]) that focus exactly one child
//! - traversals ([`Step::Each`], [`Step::Keys`], [`Step::Values`]) that fan out to
//!   every child of a container

use std::fmt;

use crate::error::LensError;
use crate::value::{Scalar, Value};

/// One element of a lens path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Step {
    /// Descend into a dict at the given key.
    Key(String),
    /// Descend into a list at the given position. Negative positions count
    /// from the end.
    Index(i64),
    /// Descend into every element of a list.
    Each,
    /// Emit the keys of a dict. Read-only and terminal.
    Keys,
    /// Descend into every value of a dict, in insertion order.
    Values,
}

impl Step {
    /// Returns `true` for steps that may focus more than one location.
    #[must_use]
    pub const fn is_traversal(&self) -> bool {
        matches!(self, Self::Each | Self::Keys | Self::Values)
    }

    /// Returns the tag used in the [`Value`] encoding of this step.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Index(_) => "index",
            Self::Each => "each",
            Self::Keys => "keys",
            Self::Values => "values",
        }
    }
}

/// Returns `true` if `name` can be written as `.name` in path syntax.
pub(crate) fn is_plain_key(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '_' || character == '-')
}

impl fmt::Display for Step {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) if is_plain_key(name) => write!(formatter, ".{name}"),
            Self::Key(name) => {
                formatter.write_str("[\"")?;
                for character in name.chars() {
                    if matches!(character, '"' | '\\') {
                        formatter.write_str("\\")?;
                    }
                    write!(formatter, "{character}")?;
                }
                formatter.write_str("\"]")
            }
            Self::Index(index) => write!(formatter, "[{index}]"),
            Self::Each => formatter.write_str("[*]"),
            Self::Keys => formatter.write_str("{keys}"),
            Self::Values => formatter.write_str("{*}"),
        }
    }
}

// =============================================================================
// Value encoding
// =============================================================================

impl From<&Step> for Value {
    fn from(step: &Step) -> Self {
        let tag = Self::from(step.tag());
        match step {
            Step::Key(name) => Self::List(vec![tag, Self::from(name.as_str())]),
            Step::Index(index) => Self::List(vec![tag, Self::from(*index)]),
            Step::Each | Step::Keys | Step::Values => Self::List(vec![tag]),
        }
    }
}

fn expect_arity(tag: &str, arguments: &[Value], expected: usize) -> Result<(), LensError> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(LensError::malformed(format!(
            "step `{tag}` expects {expected} argument(s), found {}",
            arguments.len()
        )))
    }
}

impl TryFrom<&Value> for Step {
    type Error = LensError;

    /// Decodes a step from its list form, e.g. `["key", "x"]` or `["each"]`.
    fn try_from(encoded: &Value) -> Result<Self, Self::Error> {
        let Value::List(parts) = encoded else {
            return Err(LensError::malformed(format!(
                "step must be a list, found {}",
                encoded.shape()
            )));
        };
        let Some((tag, arguments)) = parts.split_first() else {
            return Err(LensError::malformed("step is empty"));
        };
        let Some(tag) = tag.as_str() else {
            return Err(LensError::malformed(format!("step tag must be text, found {tag}")));
        };

        match tag {
            "key" => {
                expect_arity(tag, arguments, 1)?;
                match &arguments[0] {
                    Value::Scalar(Scalar::Text(name)) => Ok(Self::Key(name.clone())),
                    other => Err(LensError::malformed(format!(
                        "step `key` expects a text argument, found {other}"
                    ))),
                }
            }
            "index" => {
                expect_arity(tag, arguments, 1)?;
                arguments[0].as_i64().map(Self::Index).ok_or_else(|| {
                    LensError::malformed(format!(
                        "step `index` expects an integer argument, found {}",
                        arguments[0]
                    ))
                })
            }
            "each" => expect_arity(tag, arguments, 0).map(|()| Self::Each),
            "keys" => expect_arity(tag, arguments, 0).map(|()| Self::Keys),
            "values" => expect_arity(tag, arguments, 0).map(|()| Self::Values),
            unknown => Err(LensError::malformed(format!("unknown step tag `{unknown}`"))),
        }
    }
}
