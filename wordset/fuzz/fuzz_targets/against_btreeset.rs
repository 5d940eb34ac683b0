#![no_main]

use std::collections::BTreeSet;
use std::mem;

use libfuzzer_sys::arbitrary::{self, Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use wordset::{MAX_INT, Set};

// Region bases. Every value of a run lives in `base..=base + u16::MAX`, so
// windows stay small while still starting at interesting word offsets.
const REGIONS: [usize; 5] = [
    0,                          // word zero
    100,                        // unaligned start
    1 << 20,                    // far from zero
    1 << 40,                    // very far from zero
    MAX_INT - u16::MAX as usize, // touches the largest representable value
];

#[derive(Debug, Copy, Clone)]
struct Num(u16);

impl<'a> Arbitrary<'a> for Num {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self(u.arbitrary()?))
    }
}

#[derive(Arbitrary, Debug)]
enum Operation {
    Insert(Num),
    Remove(Num),
    Clear,
    Contains(Num),
    CheckLen,
    CheckMinMax,
    CheckIter,
    NextAfter(Num),
    PrevBefore(Num),
    InsertRange(Num, Num),
    RemoveRange(Num, Num),
    FlipRange(Num, Num),
    PopMin,
    PopMax,
    And,
    Or,
    Sub,
    Xor,
    SetAnd,
    SwapSides,
    ShrinkToFit,
    DisplayRoundtrip,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    region_idx: u8,
    initial_lhs: Vec<Num>,
    initial_rhs: Vec<Num>,
    ops: Vec<Operation>,
}

/// Assert that a Set and a BTreeSet contain the same elements.
fn check_equal(s: &Set, m: &BTreeSet<usize>) {
    assert_eq!(s.len(), m.len(), "len mismatch: set={} model={}", s.len(), m.len());
    assert_eq!(s.min(), m.first().copied(), "min mismatch");
    assert_eq!(s.max(), m.last().copied(), "max mismatch");
    assert_eq!(s.is_empty(), m.is_empty(), "is_empty mismatch");

    let s_vals: Vec<usize> = s.iter().collect();
    let m_vals: Vec<usize> = m.iter().copied().collect();
    assert_eq!(s_vals, m_vals, "iter mismatch");
}

fn make_pair(vals: &[usize]) -> (Set, BTreeSet<usize>) {
    (vals.iter().copied().collect(), vals.iter().copied().collect())
}

fuzz_target!(|input: FuzzInput| {
    let base = REGIONS[input.region_idx as usize % REGIONS.len()];
    let at = |n: Num| base + n.0 as usize;
    let span = |a: Num, b: Num| (at(Num(a.0.min(b.0))), at(Num(a.0.max(b.0))));

    let lhs_vals: Vec<usize> = input.initial_lhs.iter().map(|&n| at(n)).collect();
    let (mut lhs_s, mut lhs_m) = make_pair(&lhs_vals);

    let rhs_vals: Vec<usize> = input.initial_rhs.iter().map(|&n| at(n)).collect();
    let (mut rhs_s, mut rhs_m) = make_pair(&rhs_vals);

    check_equal(&lhs_s, &lhs_m);
    check_equal(&rhs_s, &rhs_m);

    for op in &input.ops {
        match *op {
            Operation::Insert(n) => {
                let v = at(n);
                assert_eq!(lhs_s.insert(v), lhs_m.insert(v), "insert({}) mismatch", v);
            }
            Operation::Remove(n) => {
                let v = at(n);
                assert_eq!(lhs_s.remove(v), lhs_m.remove(&v), "remove({}) mismatch", v);
            }
            Operation::Clear => {
                lhs_s.clear();
                lhs_m.clear();
            }
            Operation::Contains(n) => {
                let v = at(n);
                assert_eq!(lhs_s.contains(v), lhs_m.contains(&v), "contains({}) mismatch", v);
            }
            Operation::CheckLen => {
                assert_eq!(lhs_s.len(), lhs_m.len(), "len mismatch");
            }
            Operation::CheckMinMax => {
                assert_eq!(lhs_s.min(), lhs_m.first().copied(), "min mismatch");
                assert_eq!(lhs_s.max(), lhs_m.last().copied(), "max mismatch");
            }
            Operation::CheckIter => {
                check_equal(&lhs_s, &lhs_m);
            }
            Operation::NextAfter(n) => {
                let v = at(n);
                let expected = v.checked_add(1).and_then(|from| lhs_m.range(from..).next().copied());
                assert_eq!(lhs_s.next_after(v), expected, "next_after({}) mismatch", v);
            }
            Operation::PrevBefore(n) => {
                let v = at(n);
                let expected = lhs_m.range(..v).next_back().copied();
                assert_eq!(lhs_s.prev_before(v), expected, "prev_before({}) mismatch", v);
            }
            Operation::InsertRange(a, b) => {
                let (lo, hi) = span(a, b);
                lhs_s.insert_range(lo..=hi);
                lhs_m.extend(lo..=hi);
            }
            Operation::RemoveRange(a, b) => {
                let (lo, hi) = span(a, b);
                lhs_s.remove_range(lo..=hi);
                lhs_m.retain(|n| !(lo..=hi).contains(n));
            }
            Operation::FlipRange(a, b) => {
                let (lo, hi) = span(a, b);
                lhs_s.flip_range(lo..=hi);
                for n in lo..=hi {
                    if !lhs_m.remove(&n) {
                        lhs_m.insert(n);
                    }
                }
            }
            Operation::PopMin => {
                assert_eq!(lhs_s.pop_min(), lhs_m.pop_first(), "pop_min mismatch");
            }
            Operation::PopMax => {
                assert_eq!(lhs_s.pop_max(), lhs_m.pop_last(), "pop_max mismatch");
            }
            Operation::And => {
                lhs_s &= &rhs_s;
                lhs_m.retain(|n| rhs_m.contains(n));
            }
            Operation::Or => {
                lhs_s |= &rhs_s;
                lhs_m.extend(rhs_m.iter().copied());
            }
            Operation::Sub => {
                lhs_s -= &rhs_s;
                lhs_m.retain(|n| !rhs_m.contains(n));
            }
            Operation::Xor => {
                lhs_s ^= &rhs_s;
                lhs_m = lhs_m.symmetric_difference(&rhs_m).copied().collect();
            }
            Operation::SetAnd => {
                let mut out = Set::new();
                out.set_intersection(&lhs_s, &rhs_s);
                lhs_s = out;
                lhs_m.retain(|n| rhs_m.contains(n));
            }
            Operation::SwapSides => {
                mem::swap(&mut lhs_s, &mut rhs_s);
                mem::swap(&mut lhs_m, &mut rhs_m);
            }
            Operation::ShrinkToFit => {
                lhs_s.shrink_to_fit();
                assert_eq!(lhs_s.capacity_words(), lhs_s.clone().capacity_words());
            }
            Operation::DisplayRoundtrip => {
                let restored: Set = lhs_s.to_string().parse().unwrap();
                assert_eq!(restored, lhs_s, "display roundtrip mismatch");
            }
        }
    }

    check_equal(&lhs_s, &lhs_m);
    check_equal(&rhs_s, &rhs_m);
});
