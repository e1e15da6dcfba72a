use cflr_matrix::{BoolMatrix, LazyMatrixMap, LazyMatrixSet};
use cflr_symbol::Symbol;

fn sym(id: u32) -> Symbol {
    Symbol::from(id)
}

/// A matrix with `count` pairs in distinct rows.
fn matrix_with(size: usize, count: usize) -> BoolMatrix {
    let pairs: Vec<(u32, u32)> = (0..count as u32).map(|i| (i % size as u32, i / size as u32)).collect();
    BoolMatrix::from_pairs(size, &pairs)
}

fn invariant_holds(threshold: f64, sizes: &[usize]) -> bool {
    sizes.iter().enumerate().all(|(i, &a)| {
        sizes[i + 1..]
            .iter()
            .all(|&b| threshold * (a.min(b) as f64) < a.max(b) as f64)
    })
}

#[test]
fn empty_add_is_dropped() {
    let mut set = LazyMatrixSet::new(8, 2.0);
    assert!(!set.add(BoolMatrix::new(8)));
    assert_eq!(set.entry_count(), 0);
    assert!(set.materialize().is_empty());
}

#[test]
fn materialize_is_the_or_of_components() {
    let mut set = LazyMatrixSet::new(64, 4.0);
    let mut expected = BoolMatrix::new(64);
    for pairs in [&[(0, 1)][..], &[(1, 2), (2, 3)][..], &[(5, 5)][..]] {
        let component = BoolMatrix::from_pairs(64, pairs);
        expected.or_with(&component);
        set.add(component);
    }
    assert_eq!(set.materialize(), expected);
    // The bag stays intact; materializing again gives the same value.
    assert_eq!(set.materialize(), expected);
}

#[test]
fn sparsity_invariant_holds_after_every_add() {
    let mut set = LazyMatrixSet::new(64, 3.0);
    for count in [1, 2, 40, 3, 41, 1, 9, 27] {
        set.add(matrix_with(64, count));
        assert!(
            invariant_holds(3.0, &set.entry_sizes()),
            "invariant violated: {:?}",
            set.entry_sizes()
        );
    }
}

#[test]
fn entry_sizes_are_sorted() {
    let mut set = LazyMatrixSet::new(64, 2.0);
    for count in [40, 1, 9] {
        set.add(matrix_with(64, count));
    }
    let sizes = set.entry_sizes();
    let mut sorted = sizes.clone();
    sorted.sort_unstable();
    assert_eq!(sizes, sorted);
}

#[test]
fn close_sizes_merge() {
    let mut set = LazyMatrixSet::new(64, 2.0);
    set.add(BoolMatrix::from_pairs(64, &[(0, 0), (0, 1)]));
    set.add(BoolMatrix::from_pairs(64, &[(1, 0), (1, 1), (1, 2)]));
    // 2 * min(2, 3) >= max(2, 3), so the two components merge into one.
    assert_eq!(set.entry_count(), 1);
    assert_eq!(set.merge_count(), 1);
    assert_eq!(set.entry_sizes(), vec![5]);
}

#[test]
fn eager_bag_always_holds_one_entry() {
    let mut set = LazyMatrixSet::eager(64);
    for count in [1, 40, 2, 17] {
        set.add(matrix_with(64, count));
        assert_eq!(set.entry_count(), 1);
    }
}

#[test]
fn exponent_constructor_uses_n_to_the_c() {
    // n = 64, c = 0.5 gives b = 8: component sizes 1 and 8 merge,
    // sizes 1 and 9 stay apart.
    let mut merging = LazyMatrixSet::with_exponent(64, 0.5);
    merging.add(matrix_with(64, 1));
    merging.add(matrix_with(64, 8));
    assert_eq!(merging.entry_count(), 1);

    let mut apart = LazyMatrixSet::with_exponent(64, 0.5);
    apart.add(matrix_with(64, 1));
    apart.add(matrix_with(64, 9));
    assert_eq!(apart.entry_count(), 2);
}

#[test]
fn map_materializes_every_label() {
    let mut bag = LazyMatrixMap::new(8, 2.0);
    assert!(bag.add(sym(0), BoolMatrix::from_pairs(8, &[(0, 1)])));
    assert!(bag.add(sym(0), BoolMatrix::from_pairs(8, &[(5, 6), (6, 7), (7, 7)])));
    assert!(bag.add(sym(1), BoolMatrix::from_pairs(8, &[(2, 2)])));
    assert!(!bag.add(sym(2), BoolMatrix::new(8)));

    let map = bag.into_map();
    assert_eq!(
        map.get(sym(0)).unwrap().pairs(),
        vec![(0, 1), (5, 6), (6, 7), (7, 7)]
    );
    assert_eq!(map.get(sym(1)).unwrap().pairs(), vec![(2, 2)]);
    assert!(!map.contains(sym(2)));
}

#[test]
fn map_counts_entries_and_merges() {
    let mut bag = LazyMatrixMap::new(64, 2.0);
    bag.add(sym(0), matrix_with(64, 1));
    bag.add(sym(0), matrix_with(64, 40));
    bag.add(sym(1), matrix_with(64, 2));
    bag.add(sym(1), matrix_with(64, 3));
    assert_eq!(bag.label_count(), 2);
    // Label 1's components merged; label 0's stayed apart.
    assert_eq!(bag.entry_count(), 3);
    assert_eq!(bag.merge_count(), 1);
}
