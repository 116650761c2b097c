//! Path lenses over nested [`Value`](crate::value::Value)s.
//!
//! A [`Lens`] is a reusable path made of [`Step`]s. It can be applied to any
//! root of a matching shape to read ([`view`]) or write ([`update`], [`set`],
//! [`append`]) every location it focuses.
//!
//! # Steps
//!
//! ```text
//! Key(name)   descend into a dict             .name  or  ["name"]
//! Index(i)    descend into a list             [i]    (negative counts from the end)
//! Each        every element of a list         [*]
//! Values      every value of a dict           {*}
//! Keys        the keys of a dict (read-only)  {keys}
//! ```
//!
//! `Each`, `Values` and `Keys` are traversals. A lens containing at least one
//! traversal views as a flat [`View::Many`]; any other lens views as a
//! [`View::Single`].
//!
//! # Example
//!
//! ```
//! use pathlens::optics::{EACH, append, index, key, set, view, View};
//! use pathlens::value::Value;
//! use pathlens::{dict, lens, list};
//!
//! let mut document = dict! { "z" => list!["a", "b", dict! { "f" => list!["hello", "there"] }] };
//! let f = lens![key("z"), index(2), key("f")];
//!
//! set(&mut document, &f.compose(&index(1)), Value::from("world")).unwrap();
//! assert_eq!(
//!     view(&document, &f.compose(&EACH)).unwrap(),
//!     View::Many(vec!["hello".into(), "world".into()]),
//! );
//!
//! append(&mut document, &f, Value::from("!")).unwrap();
//! assert_eq!(view(&document, &f.compose(&index(-1))).unwrap(), View::Single("!".into()));
//! ```
//!
//! # Laws
//!
//! For a traversal-free lens `p` that is valid for `d`:
//!
//! 1. **SetView Law**: viewing after setting yields the set value.
//!    ```text
//!    set(d, p, v); view(d, p) == Single(v)
//!    ```
//!
//! 2. **ViewSet Law**: setting the viewed value leaves the root unchanged.
//!    ```text
//!    set(d, p, view(d, p)) leaves d unchanged
//!    ```
//!
//! 3. **SetSet Law**: two consecutive sets equal the last set.
//!
//! For any valid lens, `update(d, p, identity)` leaves `d` unchanged, and
//! composition is associative with [`Lens::identity`] as its unit.
//!
//! # Concurrency
//!
//! Operations are synchronous and assume exclusive access to the root for
//! their duration; `update` takes `&mut Value`, so the borrow checker enforces
//! this within one thread. Sharing a root across threads requires external
//! synchronization chosen by the caller.

mod lens;
mod parse;
mod step;
mod update;
mod view;

pub use lens::EACH;
pub use lens::KEYS;
pub use lens::Lens;
pub use lens::VALUES;
pub use lens::compose;
pub use lens::index;
pub use lens::key;
pub use lens::lens;

pub use step::Step;

pub use view::View;
pub use view::focus;
pub use view::view;

pub use update::append;
pub use update::set;
pub use update::transaction;
pub use update::update;
