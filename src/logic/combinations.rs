//! Exhaustive k-subset enumeration, used by the every-combination schedule.

/// Every `size`-element subset of `items`, in lexicographic order of indices.
///
/// Produces `C(n, size)` groupings; keep `items` small.
pub fn generate_combinations<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    let mut out = Vec::new();
    if size > items.len() {
        return out;
    }
    let mut current = Vec::with_capacity(size);
    backtrack(items, size, 0, &mut current, &mut out);
    out
}

fn backtrack<T: Clone>(
    items: &[T],
    size: usize,
    start: usize,
    current: &mut Vec<T>,
    out: &mut Vec<Vec<T>>,
) {
    if current.len() == size {
        out.push(current.clone());
        return;
    }
    let still_needed = size - current.len();
    for i in start..=items.len() - still_needed {
        current.push(items[i].clone());
        backtrack(items, size, i + 1, current, out);
        current.pop();
    }
}

/// Binomial coefficient `C(n, k)`, saturating at `usize::MAX`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays integral at every step
        acc = match acc.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return usize::MAX,
        };
    }
    acc
}
