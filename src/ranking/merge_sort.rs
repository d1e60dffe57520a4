//! Stable descending merge sort over `(entity, metric)` pairs.

/// Sort `items` by metric, highest first, without touching the input.
///
/// Equal metrics keep their input order: the merge takes the left head
/// whenever `left >= right`, and the left half always holds the earlier
/// input elements. Metrics that do not compare (NaN) lose against the
/// right head.
pub fn merge_sort_desc<T, M>(items: &[(T, M)]) -> Vec<(T, M)>
where
    T: Clone,
    M: PartialOrd + Clone,
{
    sort_owned(items.to_vec())
}

fn sort_owned<T, M: PartialOrd>(mut items: Vec<(T, M)>) -> Vec<(T, M)> {
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    merge(sort_owned(items), sort_owned(right))
}

fn merge<T, M: PartialOrd>(left: Vec<(T, M)>, right: Vec<(T, M)>) -> Vec<(T, M)> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.1 >= r.1,
            _ => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_preserve_input_order() {
        let input = [("A", 3), ("B", 5), ("C", 5), ("D", 1)];
        let sorted = merge_sort_desc(&input);
        assert_eq!(sorted, vec![("B", 5), ("C", 5), ("A", 3), ("D", 1)]);
    }

    #[test]
    fn test_base_cases() {
        let empty: [(&str, u32); 0] = [];
        assert!(merge_sort_desc(&empty).is_empty());
        assert_eq!(merge_sort_desc(&[("solo", 7)]), vec![("solo", 7)]);
    }

    #[test]
    fn test_input_untouched() {
        let input = vec![(1, 0.5), (2, 2.5), (3, 1.0)];
        let sorted = merge_sort_desc(&input);
        assert_eq!(sorted, vec![(2, 2.5), (3, 1.0), (1, 0.5)]);
        assert_eq!(input, vec![(1, 0.5), (2, 2.5), (3, 1.0)]);
    }

    #[test]
    fn test_all_equal_is_identity() {
        let input: Vec<(usize, u8)> = (0..17).map(|i| (i, 4)).collect();
        assert_eq!(merge_sort_desc(&input), input);
    }

    #[test]
    fn test_matches_std_stable_sort() {
        // Deterministic pseudo-random metrics with many duplicates
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        let input: Vec<(usize, u64)> = (0..200)
            .map(|i| {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                (i, seed % 11)
            })
            .collect();

        let mut expected = input.clone();
        expected.sort_by(|a, b| b.1.cmp(&a.1));

        assert_eq!(merge_sort_desc(&input), expected);
    }
}
