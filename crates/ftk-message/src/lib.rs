//! Immutable structured messages for the functional toolkit (ftk).
//!
//! A [`Message`] is a fixed record — timestamp, severity, text, optional
//! event name, opaque shared state — plus an ordered property bag that also
//! answers keyed lookups. Every update operation returns a new instance and
//! leaves the original untouched, so instances can be shared freely.
//!
//! Property keys are compared case-insensitively everywhere (merging,
//! upserts, lookups) while the stored pairs keep their original casing.
//!
//! # Modules
//!
//! - [`severity`] — The ordered [`Severity`] enumeration
//! - [`property`] — [`Property`] pairs, [`MergePolicy`], and the merge engine
//! - [`message`] — [`Message`] and its derivation builders

pub mod message;
pub mod property;
pub mod severity;

pub use message::{Message, MessageBuilder, MessageUpdate, StateRef};
pub use property::{merge_properties, MergePolicy, Property};
pub use severity::Severity;
