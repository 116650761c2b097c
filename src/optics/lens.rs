//! Path lenses and their builders.
//!
//! A [`Lens`] is an immutable, ordered sequence of [`Step`]s. Two lenses with
//! the same steps are interchangeable. Building a larger lens never touches
//! the lenses it was built from, so intermediate lenses can be shared freely.
//!
//! # Composition
//!
//! Composition is concatenation, which makes it associative with the empty
//! lens as identity:
//!
//! ```text
//! compose([compose([a, b]), c]) == compose([a, compose([b, c])]) == compose([a, b, c])
//! compose([Lens::identity(), a]) == a == compose([a, Lens::identity()])
//! ```
//!
//! # Examples
//!
//! ```
//! use pathlens::lens;
//! use pathlens::optics::{EACH, Lens, compose, index, key};
//!
//! let last_position = lens![key("positions"), index(-1)];
//! let x = compose([&last_position, &key("x")]);
//! let xs = compose([&key("positions"), &EACH, &key("x")]);
//!
//! assert_eq!(x.to_string(), "positions[-1].x");
//! assert_eq!(xs.to_string(), "positions[*].x");
//! assert!(xs.has_traversal());
//!
//! // Reused lenses are unaffected by composition.
//! assert_eq!(last_position.len(), 2);
//! assert_eq!(".positions[-1].x".parse::<Lens>().unwrap(), x);
//! ```

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::str::FromStr;

use crate::error::LensError;
use crate::optics::parse;
use crate::optics::step::Step;
use crate::value::Value;

/// A reusable path into a nested [`Value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Lens {
    steps: Cow<'static, [Step]>,
}

const NO_STEPS: &[Step] = &[];
const EACH_STEPS: &[Step] = &[Step::Each];
const KEYS_STEPS: &[Step] = &[Step::Keys];
const VALUES_STEPS: &[Step] = &[Step::Values];

/// Traverses every element of a list.
pub const EACH: Lens = Lens::from_static(EACH_STEPS);

/// Emits the keys of a dict, in insertion order. Read-only.
pub const KEYS: Lens = Lens::from_static(KEYS_STEPS);

/// Traverses every value of a dict, in insertion order.
pub const VALUES: Lens = Lens::from_static(VALUES_STEPS);

impl Lens {
    /// The empty lens, which focuses the root itself.
    #[must_use]
    pub const fn identity() -> Self {
        Self::from_static(NO_STEPS)
    }

    /// Creates a lens over a static step sequence without allocating.
    #[must_use]
    pub const fn from_static(steps: &'static [Step]) -> Self {
        Self {
            steps: Cow::Borrowed(steps),
        }
    }

    /// Creates a lens from owned steps.
    pub fn from_steps<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Step>,
    {
        Self {
            steps: Cow::Owned(steps.into_iter().collect()),
        }
    }

    /// Returns the steps of this lens in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` for the identity lens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns `true` if any step is a traversal.
    ///
    /// This alone decides whether [`view`](crate::optics::view) yields a
    /// single value or a sequence.
    #[must_use]
    pub fn has_traversal(&self) -> bool {
        self.steps.iter().any(Step::is_traversal)
    }

    /// Returns a new lens that focuses through `self` and then `other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        compose([self, other])
    }
}

impl From<Step> for Lens {
    fn from(step: Step) -> Self {
        Self {
            steps: Cow::Owned(vec![step]),
        }
    }
}

impl FromIterator<Step> for Lens {
    fn from_iter<I: IntoIterator<Item = Step>>(iterator: I) -> Self {
        Self::from_steps(iterator)
    }
}

impl<'a> IntoIterator for &'a Lens {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

// =============================================================================
// Builders
// =============================================================================

/// A lens with a single [`Step::Key`].
pub fn key(name: impl Into<String>) -> Lens {
    Lens::from(Step::Key(name.into()))
}

/// A lens with a single [`Step::Index`]. Negative indices count from the end.
#[must_use]
pub fn index(position: i64) -> Lens {
    Lens::from(Step::Index(position))
}

/// Builds a composite lens from single- or multi-step parts.
///
/// This is how path literals are written from the primitive builders; see
/// also the [`lens!`](crate::lens!) macro.
///
/// # Examples
///
/// ```
/// use pathlens::optics::{EACH, key, lens};
///
/// let path = lens([EACH, key("x")]);
/// assert_eq!(path.to_string(), "[*].x");
/// ```
pub fn lens<I>(parts: I) -> Lens
where
    I: IntoIterator,
    I::Item: Borrow<Lens>,
{
    compose(parts)
}

/// Concatenates lenses in argument order.
///
/// The arguments are never modified; the result owns a fresh step sequence.
pub fn compose<I>(lenses: I) -> Lens
where
    I: IntoIterator,
    I::Item: Borrow<Lens>,
{
    let mut steps = Vec::new();
    for part in lenses {
        steps.extend_from_slice(part.borrow().steps());
    }
    Lens {
        steps: Cow::Owned(steps),
    }
}

/// Builds a [`Lens`] from a list of lens expressions.
///
/// `lens![a, b, c]` is `lens([a, b, c])`; with no arguments it is the
/// identity lens.
///
/// # Examples
///
/// ```
/// use pathlens::lens;
/// use pathlens::optics::{VALUES, index, key};
///
/// let path = lens![key("z"), index(2), VALUES];
/// assert_eq!(path.len(), 3);
/// assert!(lens![].is_empty());
/// ```
#[macro_export]
macro_rules! lens {
    () => {
        $crate::optics::Lens::identity()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::optics::lens([$($part),+])
    };
}

// =============================================================================
// Text and value encodings
// =============================================================================

impl fmt::Display for Lens {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, step) in self.steps.iter().enumerate() {
            match step {
                Step::Key(name) if position == 0 && crate::optics::step::is_plain_key(name) => {
                    formatter.write_str(name)?;
                }
                _ => write!(formatter, "{step}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Lens {
    type Err = LensError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse::parse_path(text)
    }
}

impl From<&Lens> for Value {
    fn from(lens: &Lens) -> Self {
        Self::List(lens.steps.iter().map(Self::from).collect())
    }
}

impl TryFrom<&Value> for Lens {
    type Error = LensError;

    /// Decodes a lens from a list of encoded steps, validating every step.
    fn try_from(encoded: &Value) -> Result<Self, Self::Error> {
        let Value::List(parts) = encoded else {
            return Err(LensError::malformed(format!(
                "lens must be a list of steps, found {}",
                encoded.shape()
            )));
        };
        parts
            .iter()
            .enumerate()
            .map(|(position, part)| {
                Step::try_from(part).map_err(|error| match error {
                    LensError::MalformedLens { reason } => {
                        LensError::malformed(format!("step {position}: {reason}"))
                    }
                    other => other,
                })
            })
            .collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Lens {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Lens {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

static_assertions::assert_impl_all!(Lens: Send, Sync, Clone, Eq, std::hash::Hash);
