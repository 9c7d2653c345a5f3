//! `std::iter::Iterator` over one cursor.

use std::iter::FusedIterator;

use seqline_operators::BoxCursor;

/// Drives a single cursor. Each `Iter` is its own traversal.
pub struct Iter<T> {
    cursor: BoxCursor<T>,
}

impl<T> Iter<T> {
    pub fn new(cursor: BoxCursor<T>) -> Self {
        Self { cursor }
    }
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.cursor.move_next() {
            self.cursor.current()
        } else {
            None
        }
    }
}

// Cursors never move again after their first false.
impl<T> FusedIterator for Iter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use seqline_operators::source::SourceFactory;
    use seqline_operators::{Factory, Sequence};

    #[test]
    fn yields_then_stays_exhausted() {
        let factory = SourceFactory::new(Sequence::new(vec!["a", "b"]));
        let mut it = Iter::new(factory.create());
        assert_eq!(it.next(), Some("a"));
        assert_eq!(it.next(), Some("b"));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
