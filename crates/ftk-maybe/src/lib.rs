//! Optional values for the functional toolkit (ftk).
//!
//! This crate provides [`Maybe`], a value that is either present or absent,
//! eliminated only through total pattern matching. It exists so that absence
//! is a disjoint state of the type rather than a property of a reference:
//! there is no way to construct a "present" value without a payload, and no
//! way to read a payload out of an absent value.
//!
//! # Key Types
//!
//! - [`Maybe`] — Two-case sum type: `Present(T)` or `Absent`
//! - [`MaybeError`] — Error raised by explicit narrowing on an absent value
//! - [`Iter`] / [`IntoIter`] — The zero-or-one-element sequence view
//!
//! # Example
//!
//! ```
//! use ftk_maybe::Maybe;
//!
//! let found = Maybe::present(42);
//! let doubled = found.fold(|n| n * 2, || 0);
//! assert_eq!(doubled, 84);
//!
//! let missing: Maybe<i32> = Maybe::absent();
//! assert_eq!(missing.fold(|n| n * 2, || 0), 0);
//! ```

pub mod error;
pub mod iter;
pub mod maybe;

pub use error::MaybeError;
pub use iter::{IntoIter, Iter};
pub use maybe::Maybe;
