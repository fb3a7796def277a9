use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MaybeError;
use crate::iter::{IntoIter, Iter};

/// A value that is either present or absent.
///
/// `Maybe` is a genuine two-case sum type: the payload exists only in the
/// [`Present`](Maybe::Present) arm, so reading the value of an absent
/// instance is impossible by construction. The safe way to consume one is
/// [`fold`](Maybe::fold), which forces a handler for each state and always
/// produces a result.
///
/// Structural equality: two values are equal iff both are absent, or both
/// are present with equal payloads. An absent value hashes as the fixed
/// constant `0`; a present value hashes exactly as its payload does.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Maybe<T> {
    /// A value is present.
    Present(T),
    /// No value.
    Absent,
}

impl<T> Maybe<T> {
    /// Wrap a value as present.
    pub fn present(value: T) -> Self {
        Self::Present(value)
    }

    /// The canonical absent value.
    pub const fn absent() -> Self {
        Self::Absent
    }

    /// The single boundary conversion from a nullable value:
    /// `None` becomes absent, `Some(v)` becomes present.
    pub fn from_nullable(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Present(v),
            None => Self::Absent,
        }
    }

    /// Take the first element of a sequence; an empty sequence is absent.
    pub fn from_first<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_nullable(iter.into_iter().next())
    }

    /// Returns `true` if a value is present.
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if no value is present.
    pub const fn is_absent(&self) -> bool {
        !self.is_present()
    }

    /// The total eliminator: exactly one branch runs, and the result is
    /// always a constructed value. Never fails due to absence.
    pub fn fold<R>(self, on_present: impl FnOnce(T) -> R, on_absent: impl FnOnce() -> R) -> R {
        match self {
            Self::Present(value) => on_present(value),
            Self::Absent => on_absent(),
        }
    }

    /// Borrowing variant of [`fold`](Maybe::fold).
    pub fn fold_ref<R>(&self, on_present: impl FnOnce(&T) -> R, on_absent: impl FnOnce() -> R) -> R {
        match self {
            Self::Present(value) => on_present(value),
            Self::Absent => on_absent(),
        }
    }

    /// Side-effecting eliminator: runs exactly one of the two actions.
    pub fn each(self, on_present: impl FnOnce(T), on_absent: impl FnOnce()) {
        match self {
            Self::Present(value) => on_present(value),
            Self::Absent => on_absent(),
        }
    }

    /// Apply a function to the payload, if any.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        self.fold(|value| Maybe::Present(f(value)), || Maybe::Absent)
    }

    /// Monadic bind: chain a computation that may itself come up absent.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
        self.fold(f, || Maybe::Absent)
    }

    /// Keep the payload only if the predicate holds.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        self.and_then(|value| {
            if predicate(&value) {
                Self::Present(value)
            } else {
                Self::Absent
            }
        })
    }

    /// This value if present, otherwise `other`.
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Present(_) => self,
            Self::Absent => other,
        }
    }

    /// The payload, or `default` when absent.
    pub fn unwrap_or(self, default: T) -> T {
        self.fold(|value| value, || default)
    }

    /// The payload, or the result of `f` when absent.
    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        self.fold(|value| value, f)
    }

    /// Borrow the payload without consuming the value.
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Present(value) => Maybe::Present(value),
            Self::Absent => Maybe::Absent,
        }
    }

    /// Borrow the payload, failing with [`MaybeError::Absent`] when absent.
    pub fn value(&self) -> Result<&T, MaybeError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(MaybeError::Absent),
        }
    }

    /// Explicit narrowing back to the payload type. Succeeds only when
    /// present; an absent value is a contract violation surfaced as
    /// [`MaybeError::Absent`].
    pub fn into_value(self) -> Result<T, MaybeError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(MaybeError::Absent),
        }
    }

    /// Boundary conversion back out to a nullable value.
    pub fn into_nullable(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Iterate the zero-or-one elements by reference.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_nullable(value)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        maybe.into_nullable()
    }
}

impl<T> IntoIterator for Maybe<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Maybe<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for Maybe<T> {
    /// Takes the first element; an empty iterator collects to absent.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_first(iter)
    }
}

/// Absent hashes as the constant `0`; present hashes exactly as the payload
/// does, with no discriminant mixed in.
impl<T: Hash> Hash for Maybe<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Present(value) => value.hash(state),
            Self::Absent => 0i32.hash(state),
        }
    }
}

/// Absent orders before any present value.
impl<T: PartialOrd> PartialOrd for Maybe<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Absent, Self::Absent) => Some(Ordering::Equal),
            (Self::Absent, Self::Present(_)) => Some(Ordering::Less),
            (Self::Present(_), Self::Absent) => Some(Ordering::Greater),
            (Self::Present(a), Self::Present(b)) => a.partial_cmp(b),
        }
    }
}

impl<T: Ord> Ord for Maybe<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Absent, Self::Absent) => Ordering::Equal,
            (Self::Absent, Self::Present(_)) => Ordering::Less,
            (Self::Present(_), Self::Absent) => Ordering::Greater,
            (Self::Present(a), Self::Present(b)) => a.cmp(b),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => f.debug_tuple("Present").field(value).finish(),
            Self::Absent => write!(f, "Absent"),
        }
    }
}

/// Diagnostic rendering: `Some(<value>)` when present, `None` when absent.
/// Not intended for parsing.
impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => write!(f, "Some({value})"),
            Self::Absent => write!(f, "None"),
        }
    }
}

/// Serializes like `Option`: `null` for absent, the bare payload for present.
impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => serializer.serialize_some(value),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_nullable)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn present_is_present() {
        let maybe = Maybe::present(5);
        assert!(maybe.is_present());
        assert!(!maybe.is_absent());
    }

    #[test]
    fn absent_is_absent() {
        let maybe: Maybe<i32> = Maybe::absent();
        assert!(maybe.is_absent());
        assert!(!maybe.is_present());
    }

    #[test]
    fn fold_runs_exactly_one_branch() {
        assert_eq!(Maybe::present(5).fold(|n| n, || 0), 5);

        let absent: Maybe<i32> = Maybe::absent();
        assert_eq!(absent.fold(|n| n, || 0), 0);
    }

    #[test]
    fn fold_ref_does_not_consume() {
        let maybe = Maybe::present(String::from("hi"));
        let len = maybe.fold_ref(|s| s.len(), || 0);
        assert_eq!(len, 2);
        assert!(maybe.is_present());
    }

    #[test]
    fn each_runs_present_action() {
        let seen = std::cell::Cell::new(0);
        Maybe::present(3).each(|n| seen.set(n), || seen.set(-1));
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn each_runs_absent_action() {
        let seen = std::cell::Cell::new(0);
        Maybe::<i32>::absent().each(|n| seen.set(n), || seen.set(-1));
        assert_eq!(seen.get(), -1);
    }

    #[test]
    fn map_transforms_payload() {
        assert_eq!(Maybe::present(2).map(|n| n * 10), Maybe::present(20));
        assert_eq!(Maybe::<i32>::absent().map(|n| n * 10), Maybe::absent());
    }

    #[test]
    fn and_then_chains() {
        let half = |n: i32| {
            if n % 2 == 0 {
                Maybe::present(n / 2)
            } else {
                Maybe::absent()
            }
        };
        assert_eq!(Maybe::present(8).and_then(half), Maybe::present(4));
        assert_eq!(Maybe::present(3).and_then(half), Maybe::absent());
        assert_eq!(Maybe::absent().and_then(half), Maybe::absent());
    }

    #[test]
    fn filter_keeps_matching() {
        assert_eq!(Maybe::present(4).filter(|n| *n > 0), Maybe::present(4));
        assert_eq!(Maybe::present(-4).filter(|n| *n > 0), Maybe::absent());
    }

    #[test]
    fn or_prefers_first_present() {
        assert_eq!(Maybe::present(1).or(Maybe::present(2)), Maybe::present(1));
        assert_eq!(Maybe::absent().or(Maybe::present(2)), Maybe::present(2));
    }

    #[test]
    fn unwrap_or_defaults_on_absent() {
        assert_eq!(Maybe::present(1).unwrap_or(9), 1);
        assert_eq!(Maybe::absent().unwrap_or(9), 9);
        assert_eq!(Maybe::absent().unwrap_or_else(|| 7), 7);
    }

    #[test]
    fn equality_contract() {
        assert_eq!(Maybe::present(1), Maybe::present(1));
        assert_ne!(Maybe::present(1), Maybe::present(2));
        assert_eq!(Maybe::<i32>::absent(), Maybe::absent());
        assert_ne!(Maybe::present(1), Maybe::absent());
    }

    #[test]
    fn present_hashes_as_payload() {
        assert_eq!(hash_of(&Maybe::present(42)), hash_of(&42));
        assert_eq!(
            hash_of(&Maybe::present(String::from("key"))),
            hash_of(&String::from("key"))
        );
    }

    #[test]
    fn absent_hashes_as_zero_constant() {
        assert_eq!(hash_of(&Maybe::<i32>::absent()), hash_of(&0i32));
        assert_eq!(
            hash_of(&Maybe::<String>::absent()),
            hash_of(&Maybe::<i32>::absent())
        );
    }

    #[test]
    fn absent_orders_before_present() {
        assert!(Maybe::<i32>::absent() < Maybe::present(i32::MIN));
        assert!(Maybe::present(1) < Maybe::present(2));
    }

    #[test]
    fn nullable_boundary_roundtrip() {
        assert_eq!(Maybe::from_nullable(Some(3)), Maybe::present(3));
        assert_eq!(Maybe::<i32>::from_nullable(None), Maybe::absent());
        assert_eq!(Maybe::present(3).into_nullable(), Some(3));
        assert_eq!(Maybe::<i32>::absent().into_nullable(), None);
    }

    #[test]
    fn from_first_takes_head() {
        assert_eq!(Maybe::from_first(vec![1, 2, 3]), Maybe::present(1));
        assert_eq!(Maybe::from_first(Vec::<i32>::new()), Maybe::absent());
    }

    #[test]
    fn sequence_roundtrip() {
        let present = Maybe::present(9);
        let back: Maybe<i32> = present.into_iter().collect();
        assert_eq!(back, present);

        let absent: Maybe<i32> = Maybe::absent();
        assert_eq!(absent.into_iter().count(), 0);
        let back: Maybe<i32> = absent.into_iter().collect();
        assert_eq!(back, Maybe::absent());
    }

    #[test]
    fn narrowing_fails_on_absent() {
        assert_eq!(Maybe::present(1).into_value(), Ok(1));
        assert_eq!(Maybe::<i32>::absent().into_value(), Err(MaybeError::Absent));
        assert_eq!(Maybe::<i32>::absent().value(), Err(MaybeError::Absent));
    }

    #[test]
    fn as_ref_borrows() {
        let maybe = Maybe::present(String::from("s"));
        let borrowed: Maybe<&String> = maybe.as_ref();
        assert!(borrowed.is_present());
        assert!(maybe.is_present());
    }

    #[test]
    fn default_is_absent() {
        assert_eq!(Maybe::<i32>::default(), Maybe::absent());
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Maybe::present(12)), "Some(12)");
        assert_eq!(format!("{}", Maybe::<i32>::absent()), "None");
    }

    #[test]
    fn serde_roundtrip() {
        let present = Maybe::present(String::from("v"));
        let json = serde_json::to_string(&present).unwrap();
        assert_eq!(json, "\"v\"");
        let parsed: Maybe<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, present);

        let absent: Maybe<String> = Maybe::absent();
        let json = serde_json::to_string(&absent).unwrap();
        assert_eq!(json, "null");
        let parsed: Maybe<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, absent);
    }
}
