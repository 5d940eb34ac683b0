use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::Set;

/// Width of the region values are drawn from. Small enough that exhaustive
/// membership checks over the region are fast.
const SPAN: usize = 4096;

/// Strategy: a region base (so windows do not always start at word zero) and
/// values inside `base..base + SPAN`.
fn arb_values() -> impl Strategy<Value = Vec<usize>> {
    (prop_oneof![Just(0usize), Just(1usize << 40)], 0..=256usize).prop_flat_map(
        |(base, len)| {
            proptest::collection::vec(0..SPAN, 0..=len)
                .prop_map(move |vals| vals.into_iter().map(|v| base + v).collect::<Vec<_>>())
        },
    )
}

/// Strategy: two value lists over the same region.
fn arb_two() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    prop_oneof![Just(0usize), Just(1usize << 40)].prop_flat_map(|base| {
        let side = proptest::collection::vec(0..SPAN, 0..=256usize)
            .prop_map(move |vals| vals.into_iter().map(|v| base + v).collect::<Vec<_>>());
        (side.clone(), side)
    })
}

/// Strategy: an inclusive range `lo..=hi` inside `0..SPAN`.
fn arb_range() -> impl Strategy<Value = (usize, usize)> {
    (0..SPAN, 0..SPAN).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

/// Build both a Set and a BTreeSet from the same values.
fn make_pair(vals: &[usize]) -> (Set, BTreeSet<usize>) {
    (vals.iter().copied().collect(), vals.iter().copied().collect())
}

/// The region base the values were drawn from.
fn base_of(vals: &[usize]) -> usize {
    vals.first().map_or(0, |&v| v - v % SPAN)
}

fn members(set: &Set) -> Vec<usize> {
    set.iter().collect()
}

fn model_members(model: &BTreeSet<usize>) -> Vec<usize> {
    model.iter().copied().collect()
}

// ===== Construction & queries =====

proptest! {
    #[test]
    fn contains_matches_btree(vals in arb_values()) {
        let (set, model) = make_pair(&vals);
        let base = base_of(&vals);
        for n in base..base + SPAN {
            prop_assert_eq!(set.contains(n), model.contains(&n), "n = {}", n);
        }
    }

    #[test]
    fn iter_matches_btree(vals in arb_values()) {
        let (set, model) = make_pair(&vals);
        prop_assert_eq!(members(&set), model_members(&model));
    }

    #[test]
    fn len_matches_btree(vals in arb_values()) {
        let (set, model) = make_pair(&vals);
        prop_assert_eq!(set.len(), model.len());
        prop_assert_eq!(set.is_empty(), model.is_empty());
        prop_assert_eq!(set.iter().count(), model.len());
    }

    #[test]
    fn min_max_match_btree(vals in arb_values()) {
        let (set, model) = make_pair(&vals);
        prop_assert_eq!(set.min(), model.first().copied());
        prop_assert_eq!(set.max(), model.last().copied());
    }

    #[test]
    fn reverse_iteration_matches_btree(vals in arb_values()) {
        let (set, model) = make_pair(&vals);
        let mut got = Vec::new();
        let mut cursor = set.max();
        while let Some(n) = cursor {
            got.push(n);
            cursor = set.prev_before(n);
        }
        let expected: Vec<usize> = model.iter().rev().copied().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn next_after_matches_btree(vals in arb_values(), probe in 0..SPAN) {
        let (set, model) = make_pair(&vals);
        let base = base_of(&vals);
        let n = base + probe;
        prop_assert_eq!(set.next_after(n), model.range(n + 1..).next().copied());
        prop_assert_eq!(set.prev_before(n), model.range(..n).next_back().copied());
    }
}

// ===== Mutation =====

proptest! {
    #[test]
    fn insert_remove_match_btree(
        vals in arb_values(),
        ops in proptest::collection::vec((any::<bool>(), 0..SPAN), 0..128),
    ) {
        let (mut set, mut model) = make_pair(&vals);
        let base = base_of(&vals);
        for (insert, v) in ops {
            let n = base + v;
            if insert {
                prop_assert_eq!(set.insert(n), model.insert(n));
            } else {
                prop_assert_eq!(set.remove(n), model.remove(&n));
            }
        }
        prop_assert_eq!(members(&set), model_members(&model));
        prop_assert_eq!(set.min(), model.first().copied());
        prop_assert_eq!(set.max(), model.last().copied());
    }

    #[test]
    fn insert_range_matches_btree(vals in arb_values(), (lo, hi) in arb_range()) {
        let (mut set, mut model) = make_pair(&vals);
        let (lo, hi) = (base_of(&vals) + lo, base_of(&vals) + hi);
        set.insert_range(lo..=hi);
        model.extend(lo..=hi);
        prop_assert_eq!(members(&set), model_members(&model));
    }

    #[test]
    fn remove_range_matches_btree(vals in arb_values(), (lo, hi) in arb_range()) {
        let (mut set, mut model) = make_pair(&vals);
        let (lo, hi) = (base_of(&vals) + lo, base_of(&vals) + hi);
        set.remove_range(lo..=hi);
        model.retain(|n| !(lo..=hi).contains(n));
        prop_assert_eq!(members(&set), model_members(&model));
        prop_assert_eq!(set.min(), model.first().copied());
        prop_assert_eq!(set.max(), model.last().copied());
    }

    #[test]
    fn flip_range_matches_btree(vals in arb_values(), (lo, hi) in arb_range()) {
        let (mut set, mut model) = make_pair(&vals);
        let (lo, hi) = (base_of(&vals) + lo, base_of(&vals) + hi);
        set.flip_range(lo..=hi);
        for n in lo..=hi {
            if !model.remove(&n) {
                model.insert(n);
            }
        }
        prop_assert_eq!(members(&set), model_members(&model));
        prop_assert_eq!(set.len(), model.len());
    }

    #[test]
    fn drain_from_both_ends_matches_btree(
        vals in arb_values(),
        from_front in proptest::collection::vec(any::<bool>(), 0..64),
    ) {
        let (mut set, mut model) = make_pair(&vals);
        for front in from_front {
            if front {
                prop_assert_eq!(set.pop_min(), model.pop_first());
            } else {
                prop_assert_eq!(set.pop_max(), model.pop_last());
            }
            prop_assert_eq!(set.len(), model.len());
        }
        prop_assert_eq!(members(&set), model_members(&model));
    }

    #[test]
    fn remove_min_drains_in_order(vals in arb_values()) {
        let (mut set, model) = make_pair(&vals);
        let mut drained = Vec::with_capacity(model.len());
        while !set.is_empty() {
            drained.push(set.remove_min());
        }
        prop_assert_eq!(drained, model_members(&model));
    }
}

// ===== Set operations =====

proptest! {
    #[test]
    fn union_matches_btree((a_vals, b_vals) in arb_two()) {
        let (a, model_a) = make_pair(&a_vals);
        let (b, model_b) = make_pair(&b_vals);
        let expected: Vec<usize> = model_a.union(&model_b).copied().collect();
        prop_assert_eq!(members(&(&a | &b)), expected);
    }

    #[test]
    fn intersection_matches_btree((a_vals, b_vals) in arb_two()) {
        let (a, model_a) = make_pair(&a_vals);
        let (b, model_b) = make_pair(&b_vals);
        let expected: Vec<usize> = model_a.intersection(&model_b).copied().collect();
        prop_assert_eq!(members(&(&a & &b)), expected);
    }

    #[test]
    fn difference_matches_btree((a_vals, b_vals) in arb_two()) {
        let (a, model_a) = make_pair(&a_vals);
        let (b, model_b) = make_pair(&b_vals);
        let expected: Vec<usize> = model_a.difference(&model_b).copied().collect();
        prop_assert_eq!(members(&(&a - &b)), expected);
    }

    #[test]
    fn symmetric_difference_matches_btree((a_vals, b_vals) in arb_two()) {
        let (a, model_a) = make_pair(&a_vals);
        let (b, model_b) = make_pair(&b_vals);
        let expected: Vec<usize> = model_a.symmetric_difference(&model_b).copied().collect();
        let got = &a ^ &b;
        prop_assert_eq!(members(&got), expected);
        prop_assert_eq!(got.min(), model_a.symmetric_difference(&model_b).min().copied());
        prop_assert_eq!(got.max(), model_a.symmetric_difference(&model_b).max().copied());
    }

    #[test]
    fn in_place_forms_match_allocating((a_vals, b_vals) in arb_two()) {
        let a: Set = a_vals.iter().copied().collect();
        let b: Set = b_vals.iter().copied().collect();

        let mut s = a.clone();
        s.union_with(&b);
        prop_assert_eq!(&s, &a.union(&b));

        let mut s = a.clone();
        s.intersect_with(&b);
        prop_assert_eq!(&s, &a.intersection(&b));

        let mut s = a.clone();
        s.difference_with(&b);
        prop_assert_eq!(&s, &a.difference(&b));

        let mut s = a.clone();
        s.symmetric_difference_with(&b);
        prop_assert_eq!(&s, &a.symmetric_difference(&b));
    }

    #[test]
    fn destination_forms_match_allocating(
        (a_vals, b_vals) in arb_two(),
        stale in arb_values(),
    ) {
        let a: Set = a_vals.iter().copied().collect();
        let b: Set = b_vals.iter().copied().collect();
        let mut dst: Set = stale.iter().copied().collect();

        dst.set_union(&a, &b);
        prop_assert_eq!(&dst, &(&a | &b));

        dst.set_intersection(&a, &b);
        prop_assert_eq!(&dst, &(&a & &b));

        dst.set_difference(&a, &b);
        prop_assert_eq!(&dst, &(&a - &b));

        dst.set_symmetric_difference(&a, &b);
        prop_assert_eq!(&dst, &(&a ^ &b));
    }
}

// ===== Algebraic set properties =====

proptest! {
    #[test]
    fn union_is_commutative((a_vals, b_vals) in arb_two()) {
        let (a, _) = make_pair(&a_vals);
        let (b, _) = make_pair(&b_vals);
        prop_assert_eq!(&a | &b, &b | &a);
    }

    #[test]
    fn intersection_is_commutative((a_vals, b_vals) in arb_two()) {
        let (a, _) = make_pair(&a_vals);
        let (b, _) = make_pair(&b_vals);
        prop_assert_eq!(&a & &b, &b & &a);
    }

    #[test]
    fn xor_is_union_minus_intersection((a_vals, b_vals) in arb_two()) {
        let (a, _) = make_pair(&a_vals);
        let (b, _) = make_pair(&b_vals);
        prop_assert_eq!(&a ^ &b, &(&a | &b) - &(&a & &b));
    }

    #[test]
    fn xor_with_self_is_empty(vals in arb_values()) {
        let (a, _) = make_pair(&vals);
        let x = &a ^ &a;
        prop_assert!(x.is_empty());
        prop_assert_eq!(x, Set::new());
    }

    #[test]
    fn union_with_empty_is_identity(vals in arb_values()) {
        let (a, _) = make_pair(&vals);
        prop_assert_eq!(&a | &Set::new(), a.clone());
        prop_assert!((&a & &Set::new()).is_empty());
        prop_assert_eq!(&a - &Set::new(), a);
    }

    #[test]
    fn difference_partitions((a_vals, b_vals) in arb_two()) {
        let (a, _) = make_pair(&a_vals);
        let (b, _) = make_pair(&b_vals);
        let only_a = &a - &b;
        let both = &a & &b;
        prop_assert!((&only_a & &both).is_empty());
        prop_assert_eq!(&only_a | &both, a);
    }
}

// ===== Runs & text form =====

proptest! {
    #[test]
    fn runs_cover_members(vals in arb_values()) {
        let (set, model) = make_pair(&vals);
        let flattened: Vec<usize> = set.runs().flatten().collect();
        prop_assert_eq!(flattened, model_members(&model));

        // Runs are maximal: consecutive runs never touch.
        let runs: Vec<_> = set.runs().collect();
        for pair in runs.windows(2) {
            prop_assert!(*pair[0].end() + 1 < *pair[1].start());
        }
    }

    #[test]
    fn display_parse_roundtrip(vals in arb_values()) {
        let (set, _) = make_pair(&vals);
        let text = set.to_string();
        let parsed: Set = text.parse().unwrap();
        prop_assert_eq!(parsed, set);
    }

    #[test]
    fn equality_ignores_capacity(vals in arb_values()) {
        let (set, _) = make_pair(&vals);
        let mut roomy = Set::with_capacity(SPAN * 4);
        roomy.extend(&vals);
        prop_assert_eq!(&roomy, &set);

        let mut shrunk = roomy.clone();
        shrunk.shrink_to_fit();
        prop_assert_eq!(shrunk, set);
    }
}
