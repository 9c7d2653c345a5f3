//! Sort direction and comparer composition.
//!
//! A `Comparer<T>` is a total order over elements. Comparers built here are
//! what `SortFactory` consumes; `then_by` is how subsort chains tie-breaks.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Shared comparer over elements.
pub type Comparer<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "asc", alias = "ASC")]
    Ascending,
    #[serde(alias = "desc", alias = "DESC")]
    Descending,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            other => Err(Error::type_mismatch("asc|desc", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => f.write_str("asc"),
            Direction::Descending => f.write_str("desc"),
        }
    }
}

/// Default key comparison. Incomparable keys (e.g. NaN) compare equal.
pub fn natural_order<K: PartialOrd>(left: &K, right: &K) -> Ordering {
    left.partial_cmp(right).unwrap_or(Ordering::Equal)
}

/// Build an element comparer from a key selector, a direction, and a key comparer.
///
/// Descending swaps the arguments handed to `compare` rather than reversing its
/// result, so a caller-supplied comparer sees `(right, left)`.
pub fn key_comparer<T, K, S, C>(selector: S, direction: Direction, compare: C) -> Comparer<T>
where
    T: 'static,
    K: 'static,
    S: Fn(&T) -> K + 'static,
    C: Fn(&K, &K) -> Ordering + 'static,
{
    match direction {
        Direction::Ascending => Rc::new(move |left: &T, right: &T| {
            compare(&selector(left), &selector(right))
        }),
        Direction::Descending => Rc::new(move |left: &T, right: &T| {
            compare(&selector(right), &selector(left))
        }),
    }
}

/// Compose `primary` with a tie-break. `secondary` is consulted only on `Equal`.
pub fn then_by<T: 'static>(primary: Comparer<T>, secondary: Comparer<T>) -> Comparer<T> {
    Rc::new(move |left: &T, right: &T| match primary(left, right) {
        Ordering::Equal => secondary(left, right),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("ASC".parse::<Direction>().unwrap(), Direction::Ascending);
        assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Descending);
        assert_eq!(
            "Descending".parse::<Direction>().unwrap(),
            Direction::Descending
        );
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn descending_flips_arguments() {
        let asc = key_comparer(|v: &i32| *v, Direction::Ascending, natural_order);
        let desc = key_comparer(|v: &i32| *v, Direction::Descending, natural_order);
        assert_eq!(asc(&1, &2), Ordering::Less);
        assert_eq!(desc(&1, &2), Ordering::Greater);
        assert_eq!(desc(&2, &2), Ordering::Equal);
    }

    #[test]
    fn then_by_short_circuits() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let primary = key_comparer(|v: &(i32, i32)| v.0, Direction::Ascending, natural_order);
        let secondary: Comparer<(i32, i32)> = Rc::new(move |l, r| {
            counter.set(counter.get() + 1);
            l.1.cmp(&r.1)
        });
        let composite = then_by(primary, secondary);

        assert_eq!(composite(&(1, 9), &(2, 0)), Ordering::Less);
        assert_eq!(calls.get(), 0);
        assert_eq!(composite(&(1, 9), &(1, 0)), Ordering::Greater);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn nan_keys_compare_equal() {
        assert_eq!(natural_order(&f64::NAN, &1.0), Ordering::Equal);
    }
}
