use std::cmp::Ordering;

/// Stable in-place insertion sort.
///
/// An element moves left only past neighbours that compare strictly
/// `Greater`, so equal elements keep their input order.
pub fn insertion_sort<T>(items: &mut [T], compare: &dyn Fn(&T, &T) -> Ordering) {
    for index in 1..items.len() {
        let mut pos = index;
        while pos > 0 && compare(&items[pos - 1], &items[pos]) == Ordering::Greater {
            items.swap(pos - 1, pos);
            pos -= 1;
        }
    }
}
