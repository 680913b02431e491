// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use proptest::prelude::*;
use std::cmp::Ordering;
use tempora_span::instant_set::InstantSet;
use tempora_span::ops;
use tempora_span::span::Span;
use tempora_span::span_set::{SpanSet, normalize};

/// Float spans on a coarse grid so that shared and touching bounds are common.
fn float_span() -> impl Strategy<Value = Span<f64>> {
    (-20i32..20, 0i32..10, any::<bool>(), any::<bool>()).prop_filter_map(
        "empty span",
        |(lower, width, lower_inc, upper_inc)| {
            Span::make(
                f64::from(lower),
                f64::from(lower + width),
                lower_inc,
                upper_inc,
            )
            .ok()
        },
    )
}

fn int_span() -> impl Strategy<Value = Span<i32>> {
    (-20i32..20, 0i32..10, any::<bool>(), any::<bool>()).prop_filter_map(
        "empty span",
        |(lower, width, lower_inc, upper_inc)| {
            Span::make(lower, lower + width, lower_inc, upper_inc).ok()
        },
    )
}

fn float_span_set() -> impl Strategy<Value = SpanSet<f64>> {
    prop::collection::vec(float_span(), 1..12).prop_map(|spans| SpanSet::new(spans).unwrap())
}

/// Sample points at every half unit of the generated range.
fn sample_points() -> impl Iterator<Item = f64> {
    (-50..80).map(|k| f64::from(k) / 2.0)
}

fn is_normalized<T: tempora_core::BaseValue>(spans: &[Span<T>]) -> bool {
    spans.windows(2).all(|w| {
        w[0].cmp(&w[1]) == Ordering::Less
            && w[0].before(&w[1])
            && !w[0].overlaps(&w[1])
            && !w[0].adjacent(&w[1])
    })
}

proptest! {
    #[test]
    fn test_normalize_is_idempotent(mut spans in prop::collection::vec(float_span(), 0..20)) {
        let once = normalize(&mut spans);
        let mut again = once.clone();
        prop_assert_eq!(normalize(&mut again), once);
    }

    #[test]
    fn test_normalize_output_is_disjoint(mut spans in prop::collection::vec(int_span(), 0..20)) {
        let merged = normalize(&mut spans);
        prop_assert!(is_normalized(&merged));
        for span in &spans {
            prop_assert!(merged.iter().any(|m| m.contains(span)));
        }
    }

    #[test]
    fn test_contains_contained_duality(a in float_span(), b in float_span()) {
        prop_assert_eq!(a.contains(&b), b.contained(&a));
    }

    #[test]
    fn test_adjacency_is_symmetric(a in int_span(), b in int_span()) {
        prop_assert_eq!(a.adjacent(&b), b.adjacent(&a));
        prop_assert!(!(a.adjacent(&b) && a.overlaps(&b)));
    }

    #[test]
    fn test_expand_contains_both(a in float_span(), b in float_span()) {
        let hull = a.expand(&b);
        prop_assert!(hull.contains(&a));
        prop_assert!(hull.contains(&b));
    }

    #[test]
    fn test_intersection_and_minus_consistency(a in float_span(), b in float_span()) {
        if a.overlaps(&b) {
            let common = a.intersection(&b);
            prop_assert!(common.is_some());
            let common = common.unwrap();
            prop_assert!(common.contained(&a));
            prop_assert!(common.contained(&b));
        } else {
            prop_assert!(a.intersection(&b).is_none());
        }
        for piece in a.minus(&b) {
            prop_assert!(piece.contained(&a));
            prop_assert!(!piece.overlaps(&b));
        }
    }

    #[test]
    fn test_order_laws(a in float_span(), b in float_span(), c in float_span()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        if a.cmp(&b) != Ordering::Greater && b.cmp(&c) != Ordering::Greater {
            prop_assert!(a.cmp(&c) != Ordering::Greater);
        }
    }

    #[test]
    fn test_span_set_operators_match_membership(a in float_span_set(), b in float_span_set()) {
        let union = a.union(&b);
        let common = a.intersection(&b);
        let rest = a.minus(&b);
        prop_assert!(is_normalized(union.spans()));
        for x in sample_points() {
            let (in_a, in_b) = (a.contains_value(&x), b.contains_value(&x));
            prop_assert_eq!(union.contains_value(&x), in_a || in_b);
            prop_assert_eq!(common.as_ref().is_some_and(|s| s.contains_value(&x)), in_a && in_b);
            prop_assert_eq!(rest.as_ref().is_some_and(|s| s.contains_value(&x)), in_a && !in_b);
        }
        prop_assert_eq!(a.overlaps(&b), common.is_some());
    }

    #[test]
    fn test_span_set_distance_uses_bounding_spans(a in float_span_set(), b in float_span_set()) {
        let expected = a.bounding_span().distance(b.bounding_span());
        prop_assert_eq!(a.distance(&b), expected);
        prop_assert_eq!(b.distance(&a), expected);
        prop_assert_eq!(ops::distance(&a, &b), expected);
    }

    #[test]
    fn test_adjacency_is_symmetric_across_shapes(
        a in float_span_set(),
        s in float_span(),
        values in prop::collection::btree_set(-20i32..30, 1..6),
        x in -20i32..30,
    ) {
        let points = InstantSet::new(values.into_iter().map(f64::from).collect()).unwrap();
        let x = f64::from(x);
        prop_assert_eq!(ops::adjacent(&a, &s), ops::adjacent(&s, &a));
        prop_assert_eq!(ops::adjacent(&a, &points), ops::adjacent(&points, &a));
        prop_assert_eq!(ops::adjacent(&a, &x), ops::adjacent(&x, &a));
        prop_assert_eq!(ops::adjacent(&s, &points), ops::adjacent(&points, &s));
        prop_assert_eq!(ops::adjacent(&points, &x), ops::adjacent(&x, &points));
        prop_assert!(!(ops::adjacent(&a, &s) && ops::overlaps(&a, &s)));
        prop_assert!(!(ops::adjacent(&a, &points) && ops::overlaps(&a, &points)));
    }

    #[test]
    fn test_text_round_trips(a in float_span_set(), values in prop::collection::btree_set(-1000i64..1000, 1..10)) {
        let parsed: SpanSet<f64> = a.to_string().parse().unwrap();
        prop_assert_eq!(&parsed, &a);
        let span = a.bounding_span().clone();
        prop_assert_eq!(span.to_string().parse::<Span<f64>>().unwrap(), span);
        let set = InstantSet::new(values.into_iter().collect()).unwrap();
        prop_assert_eq!(set.to_string().parse::<InstantSet<i64>>().unwrap(), set);
    }
}
