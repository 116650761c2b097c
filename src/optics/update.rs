//! Writing through a lens.
//!
//! [`update`] replaces every location a lens focuses with the result of a
//! transform. [`set`] and [`append`] are updates with a fixed transform.
//!
//! # Write-back
//!
//! Each child is reached through an exclusive borrow of its slot in the
//! parent container. The focused value is moved out of that slot, transformed,
//! and written back before the next sibling is visited, so a parent always
//! observes the writes made beneath it within one pass.
//!
//! # Failure
//!
//! Updates are not transactional. If a traversal fails partway, say on the
//! third of five list elements, the first two elements keep their new values.
//! Wrap the work in [`transaction`] to get all-or-nothing behavior.
//!
//! A lens containing [`Step::Keys`] is rejected with
//! [`LensError::UnsupportedOperation`] before anything is written.
//!
//! # Examples
//!
//! ```
//! use pathlens::optics::{EACH, key, set, update, view, View};
//! use pathlens::value::Value;
//! use pathlens::{dict, lens, list};
//!
//! let mut document = list![dict! { "x" => 1, "y" => 1 }, dict! { "x" => 2, "y" => 2 }];
//! let xs = lens![EACH, key("x")];
//!
//! update(&mut document, &xs, |x| Value::from(x.as_i64().unwrap_or(0) * 10)).unwrap();
//! assert_eq!(view(&document, &xs).unwrap(), View::Many(vec![10.into(), 20.into()]));
//!
//! set(&mut document, &xs, Value::from(3)).unwrap();
//! assert_eq!(document, list![dict! { "x" => 3, "y" => 1 }, dict! { "x" => 3, "y" => 2 }]);
//! ```

use crate::error::LensError;
use crate::optics::lens::Lens;
use crate::optics::step::Step;
use crate::value::{Shape, Value};

/// Applies `modify` to every location `steps` focuses under `current`.
///
/// `position` is the index of `steps[0]` within the whole lens.
fn modify_at<F>(
    current: &mut Value,
    steps: &[Step],
    position: usize,
    modify: &mut F,
) -> Result<(), LensError>
where
    F: FnMut(&mut Value) -> Result<(), LensError>,
{
    let Some((step, rest)) = steps.split_first() else {
        return modify(current);
    };
    let stamp = |error: LensError| error.at_step(position);

    match step {
        Step::Key(name) => {
            let child = current.dict_get_mut(name).map_err(stamp)?;
            modify_at(child, rest, position + 1, modify)
        }
        Step::Index(index) => {
            let child = current.list_get_mut(*index).map_err(stamp)?;
            modify_at(child, rest, position + 1, modify)
        }
        Step::Each => {
            let found = current.shape();
            let Value::List(elements) = current else {
                return Err(stamp(Shape::List.mismatch(found)));
            };
            elements
                .iter_mut()
                .try_for_each(|element| modify_at(element, rest, position + 1, modify))
        }
        Step::Values => {
            let found = current.shape();
            let Value::Dict(entries) = current else {
                return Err(stamp(Shape::Dict.mismatch(found)));
            };
            entries
                .values_mut()
                .try_for_each(|value| modify_at(value, rest, position + 1, modify))
        }
        Step::Keys => Err(LensError::UnsupportedOperation {
            operation: "update",
            step: Step::Keys,
        }),
    }
}

fn reject_read_only(lens: &Lens, operation: &'static str) -> Result<(), LensError> {
    match lens.steps().iter().find(|step| matches!(step, Step::Keys)) {
        Some(step) => Err(LensError::UnsupportedOperation {
            operation,
            step: step.clone(),
        }),
        None => Ok(()),
    }
}

fn run<'a, F>(
    root: &'a mut Value,
    lens: &Lens,
    operation: &'static str,
    mut modify: F,
) -> Result<&'a mut Value, LensError>
where
    F: FnMut(&mut Value) -> Result<(), LensError>,
{
    reject_read_only(lens, operation)?;
    if let Err(error) = modify_at(root, lens.steps(), 0, &mut modify) {
        tracing::debug!(
            %error,
            operation,
            "lens write aborted; earlier targets keep their new values"
        );
        return Err(error);
    }
    Ok(root)
}

/// Replaces every location `lens` focuses with `transform` of its current value.
///
/// With the identity lens the root itself is replaced.
///
/// # Errors
///
/// - [`LensError::UnsupportedOperation`] if `lens` contains a `Keys` step
/// - [`LensError::Shape`], [`LensError::KeyNotFound`], [`LensError::IndexOutOfRange`]
///   when descent fails
#[tracing::instrument(level = "trace", skip_all, fields(lens = %lens))]
pub fn update<'a, F>(
    root: &'a mut Value,
    lens: &Lens,
    mut transform: F,
) -> Result<&'a mut Value, LensError>
where
    F: FnMut(Value) -> Value,
{
    run(root, lens, "update", |slot| {
        let current = std::mem::take(slot);
        *slot = transform(current);
        Ok(())
    })
}

/// Replaces every location `lens` focuses with a copy of `value`.
///
/// # Errors
///
/// See [`update`].
#[tracing::instrument(level = "trace", skip_all, fields(lens = %lens))]
pub fn set<'a>(
    root: &'a mut Value,
    lens: &Lens,
    value: Value,
) -> Result<&'a mut Value, LensError> {
    run(root, lens, "set", |slot| {
        slot.clone_from(&value);
        Ok(())
    })
}

/// Pushes a copy of `element` onto every list `lens` focuses.
///
/// # Errors
///
/// See [`update`]. Additionally [`LensError::Shape`] if a focused value is
/// not a list; targets visited before it keep the appended element.
#[tracing::instrument(level = "trace", skip_all, fields(lens = %lens))]
pub fn append<'a>(
    root: &'a mut Value,
    lens: &Lens,
    element: Value,
) -> Result<&'a mut Value, LensError> {
    run(root, lens, "append", |slot| slot.list_append(element.clone()))
}

/// Runs `body` against a scratch copy of `root` and commits it only on success.
///
/// On error `root` is left exactly as it was.
///
/// # Errors
///
/// Whatever `body` returns.
///
/// # Examples
///
/// ```
/// use pathlens::optics::{EACH, append, transaction};
/// use pathlens::value::Value;
/// use pathlens::list;
///
/// let mut document = list![list![1], Value::from("not a list"), list![2]];
/// let result = transaction(&mut document, |scratch| {
///     append(scratch, &EACH, Value::from(0))?;
///     Ok(())
/// });
///
/// assert!(result.is_err());
/// assert_eq!(document, list![list![1], Value::from("not a list"), list![2]]);
/// ```
pub fn transaction<F, T>(root: &mut Value, body: F) -> Result<T, LensError>
where
    F: FnOnce(&mut Value) -> Result<T, LensError>,
{
    let mut scratch = root.clone();
    match body(&mut scratch) {
        Ok(output) => {
            *root = scratch;
            Ok(output)
        }
        Err(error) => {
            tracing::debug!(%error, "lens transaction rolled back");
            Err(error)
        }
    }
}

impl Lens {
    /// Replaces every focused location with `transform` of its current value.
    ///
    /// # Errors
    ///
    /// See [`update`].
    pub fn update<'a, F>(
        &self,
        root: &'a mut Value,
        transform: F,
    ) -> Result<&'a mut Value, LensError>
    where
        F: FnMut(Value) -> Value,
    {
        update(root, self, transform)
    }

    /// Replaces every focused location with a copy of `value`.
    ///
    /// # Errors
    ///
    /// See [`update`].
    pub fn set<'a>(&self, root: &'a mut Value, value: Value) -> Result<&'a mut Value, LensError> {
        set(root, self, value)
    }

    /// Pushes a copy of `element` onto every focused list.
    ///
    /// # Errors
    ///
    /// See [`append`].
    pub fn append<'a>(
        &self,
        root: &'a mut Value,
        element: Value,
    ) -> Result<&'a mut Value, LensError> {
        append(root, self, element)
    }
}
