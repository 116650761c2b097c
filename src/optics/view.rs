//! Reading through a lens.
//!
//! [`view`] walks a [`Value`] step by step. Direct steps descend into one
//! child; traversal steps fan out and every branch contributes its results,
//! in order, to one flat sequence.
//!
//! # Examples
//!
//! ```
//! use pathlens::optics::{EACH, KEYS, View, key, view};
//! use pathlens::{dict, lens, list};
//!
//! let document = list![dict! { "x" => 1, "y" => 1 }, dict! { "x" => 2, "y" => 2 }];
//!
//! assert_eq!(
//!     view(&document, &lens![EACH, key("x")]).unwrap(),
//!     View::Many(vec![1.into(), 2.into()]),
//! );
//! assert_eq!(
//!     view(&document, &lens![EACH, KEYS]).unwrap().len(),
//!     4,
//! );
//! ```

use crate::error::LensError;
use crate::optics::lens::Lens;
use crate::optics::step::Step;
use crate::value::{Shape, Value};

/// The result of viewing a value through a lens.
///
/// The variant depends only on the lens: lenses without traversal steps
/// yield [`View::Single`], lenses with at least one yield [`View::Many`].
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// The one value focused by a traversal-free lens.
    Single(Value),
    /// Every value focused by a lens with traversals, flattened in order.
    Many(Vec<Value>),
}

impl View {
    /// Returns `true` for [`View::Many`].
    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    /// Returns the number of focused values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    /// Returns `true` if a traversal focused nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of a [`View::Single`].
    #[must_use]
    pub fn into_single(self) -> Option<Value> {
        match self {
            Self::Single(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    /// Returns all focused values; a single value becomes a one-element vector.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::Single(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    /// Converts the view back into a [`Value`]; a sequence becomes a list.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Single(value) => value,
            Self::Many(values) => Value::List(values),
        }
    }
}

impl IntoIterator for View {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_values().into_iter()
    }
}

/// Collects every value focused by `steps` into `focused`.
///
/// `position` is the index of `steps[0]` within the whole lens.
fn collect(
    current: &Value,
    steps: &[Step],
    position: usize,
    focused: &mut Vec<Value>,
) -> Result<(), LensError> {
    let Some((step, rest)) = steps.split_first() else {
        focused.push(current.clone());
        return Ok(());
    };
    let stamp = |error: LensError| error.at_step(position);

    match step {
        Step::Key(name) => {
            let child = current.dict_get(name).map_err(stamp)?;
            collect(child, rest, position + 1, focused)
        }
        Step::Index(index) => {
            let child = current.list_get(*index).map_err(stamp)?;
            collect(child, rest, position + 1, focused)
        }
        Step::Each => {
            let Value::List(elements) = current else {
                return Err(stamp(Shape::List.mismatch(current.shape())));
            };
            elements
                .iter()
                .try_for_each(|element| collect(element, rest, position + 1, focused))
        }
        Step::Values => {
            let Value::Dict(entries) = current else {
                return Err(stamp(Shape::Dict.mismatch(current.shape())));
            };
            entries
                .values()
                .try_for_each(|value| collect(value, rest, position + 1, focused))
        }
        // Keys never descends; whatever follows it is not interpreted.
        Step::Keys => {
            let names = current.dict_keys().map_err(stamp)?;
            focused.extend(names.map(Value::from));
            Ok(())
        }
    }
}

/// Reads every location `lens` focuses inside `root`.
///
/// # Errors
///
/// - [`LensError::Shape`] when a step meets the wrong container shape
/// - [`LensError::KeyNotFound`] when a `Key` step names an absent key
/// - [`LensError::IndexOutOfRange`] when an `Index` step falls outside the list
///
/// # Examples
///
/// ```
/// use pathlens::optics::{View, index, key, view};
/// use pathlens::{dict, lens, list};
///
/// let document = dict! { "x" => list!["a", "b", dict! { "y" => 1, "z" => 2 }] };
/// let path = lens![key("x"), index(2), key("z")];
/// assert_eq!(view(&document, &path).unwrap(), View::Single(2.into()));
/// ```
#[tracing::instrument(level = "trace", skip_all, fields(lens = %lens))]
pub fn view(root: &Value, lens: &Lens) -> Result<View, LensError> {
    if !lens.has_traversal() {
        return focus(root, lens).cloned().map(View::Single);
    }

    let mut focused = Vec::new();
    collect(root, lens.steps(), 0, &mut focused)?;
    tracing::trace!(count = focused.len(), "traversal collected");
    Ok(View::Many(focused))
}

/// Resolves a traversal-free lens to a borrowed location inside `root`.
///
/// # Errors
///
/// The same descent errors as [`view`], plus [`LensError::MalformedLens`]
/// if `lens` contains a traversal step.
pub fn focus<'a>(root: &'a Value, lens: &Lens) -> Result<&'a Value, LensError> {
    lens.steps()
        .iter()
        .enumerate()
        .try_fold(root, |current, (position, step)| {
            let child = match step {
                Step::Key(name) => current.dict_get(name),
                Step::Index(index) => current.list_get(*index),
                Step::Each | Step::Keys | Step::Values => {
                    return Err(LensError::malformed(format!(
                        "step {position} `{step}` focuses more than one location"
                    )));
                }
            };
            child.map_err(|error| error.at_step(position))
        })
}

impl Lens {
    /// Reads every location this lens focuses inside `root`.
    ///
    /// # Errors
    ///
    /// See [`view`].
    pub fn view(&self, root: &Value) -> Result<View, LensError> {
        view(root, self)
    }
}
