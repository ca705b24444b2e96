//! Path-based navigation and mutation of nested values.
//!
//! A [`Value`] is a tree of objects, arrays and scalars. Paths such as `spec.containers.0.image`
//! address values inside of it; see the [`path`] module for the syntax. On top of [`navigate`]
//! this crate offers a few mutators that only act when a path does or doesn't exist, a
//! depth-first enumeration of every value with its path, and deletion of every path matching
//! a glob.
//!
//! ```
//! use valuenav::{delete_matching_path, navigate, value, Key};
//!
//! let mut root = value!({ "a": { "x": 1, "y": [1, 2, 3] }, "b": { "x": 3 } });
//!
//! let navigation = navigate(&root, "a.y.1").unwrap();
//! assert!(navigation.found);
//! assert_eq!(navigation.key, Some(Key::Index(1)));
//!
//! delete_matching_path(&mut root, "*.x").unwrap();
//! assert_eq!(root, value!({ "a": { "y": [1, 2, 3] }, "b": {} }));
//! ```
//!
//! None of the operations hold state between calls. Mutators take `&mut Value`, so a tree can't
//! change while it is being navigated or enumerated.

#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(unused_allocation)]
#![deny(unused_extern_crates)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![allow(clippy::module_name_repetitions)]

pub mod glob;
pub mod iter;
pub mod navigate;
pub mod path;
pub mod prune;
pub mod value;

mod error;

pub use error::Error;
pub use glob::{GlobPattern, PatternError};
pub use iter::{enumerate, PathIter};
pub use navigate::{
    delete_if_exists, delete_if_falsy, navigate, set_if_not_exists, Key, Navigation,
};
pub use path::{parse_path, OwnedPath, PathError, ValuePath};
pub use prune::{delete_matching, delete_matching_path, PruneConfig};
pub use value::{KeyString, ObjectMap, Value};
