//! # pathlens
//!
//! Path-based lenses for viewing and updating nested values built from
//! lists and dicts.
//!
//! ## Overview
//!
//! - **Values**: [`value::Value`] is a list, an insertion-ordered dict, or a scalar leaf
//! - **Lenses**: [`optics::Lens`] is an immutable path of steps, built with
//!   [`optics::key`], [`optics::index`], [`optics::lens`], [`optics::compose`] and the
//!   traversal constants [`optics::EACH`], [`optics::KEYS`], [`optics::VALUES`]
//! - **Engine**: [`optics::view`] reads every focused location;
//!   [`optics::update`], [`optics::set`] and [`optics::append`] write them in place
//! - **Errors**: every failure is an [`error::LensError`]
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for values, steps and lenses
//!
//! ## Example
//!
//! ```rust
//! use pathlens::prelude::*;
//! use pathlens::{dict, lens, list};
//!
//! let mut document = list![dict! { "x" => 1, "y" => 1 }, dict! { "x" => 2, "y" => 2 }];
//! let xs = lens![EACH, key("x")];
//!
//! assert_eq!(view(&document, &xs).unwrap(), View::Many(vec![1.into(), 2.into()]));
//!
//! set(&mut document, &xs, Value::from(3)).unwrap();
//! assert_eq!(document, list![dict! { "x" => 3, "y" => 1 }, dict! { "x" => 3, "y" => 2 }]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use pathlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;
    pub use crate::optics::*;
    pub use crate::value::*;
}

pub mod error;
pub mod optics;
pub mod value;
