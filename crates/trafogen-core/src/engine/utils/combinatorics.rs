/// Cartesian product across a slice of per-position candidate lists.
///
/// Each combination draws exactly one element from each list, in list order.
/// The product over an empty slice is a single empty combination; any empty
/// list makes the whole product empty.
pub fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut combos: Vec<Vec<T>> = vec![Vec::new()];
    for list in lists {
        if list.is_empty() {
            return Vec::new();
        }
        let mut next = Vec::with_capacity(combos.len() * list.len());
        for combo in &combos {
            for item in list {
                let mut extended = combo.clone();
                extended.push(item.clone());
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}

/// Every ordering of `items`, generated with Heap's algorithm.
///
/// Exactly `n!` orderings are produced; equal elements are not deduplicated.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut work = items.to_vec();
    let mut out = Vec::new();
    let n = work.len();
    heap_permute(&mut work, n, &mut out);
    out
}

fn heap_permute<T: Clone>(work: &mut [T], k: usize, out: &mut Vec<Vec<T>>) {
    if k <= 1 {
        out.push(work.to_vec());
        return;
    }
    for i in 0..k {
        heap_permute(work, k - 1, out);
        if k % 2 == 0 {
            work.swap(i, k - 1);
        } else {
            work.swap(0, k - 1);
        }
    }
}
