use std::iter::FusedIterator;

use crate::maybe::Maybe;

/// Borrowing iterator over the zero-or-one elements of a [`Maybe`].
///
/// Finite and re-creatable: calling [`Maybe::iter`] again yields a fresh
/// iterator over the same element.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    remaining: Option<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(maybe: &'a Maybe<T>) -> Self {
        let remaining = match maybe {
            Maybe::Present(value) => Some(value),
            Maybe::Absent => None,
        };
        Self { remaining }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::from(self.remaining.is_some());
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.remaining.take()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over the zero-or-one elements of a [`Maybe`].
#[derive(Clone, Debug)]
pub struct IntoIter<T> {
    remaining: Option<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(maybe: Maybe<T>) -> Self {
        Self {
            remaining: maybe.into_nullable(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::from(self.remaining.is_some());
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.remaining.take()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
