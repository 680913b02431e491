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
use tempora_box::stbox::{Extent, STBox};
use tempora_box::tbox::TBox;
use tempora_core::bytes::{ByteReader, Endian};
use tempora_core::time::Timestamp;
use tempora_span::instant_set::InstantSet;
use tempora_span::span::Span;
use tempora_span::span_set::SpanSet;
use tempora_wkb::{WkbOptions, decode, from_hex_wkb, from_wkb, to_hex_wkb, to_wkb};

fn endian() -> impl Strategy<Value = Endian> {
    prop_oneof![Just(Endian::Big), Just(Endian::Little)]
}

fn float_span() -> impl Strategy<Value = Span<f64>> {
    (-1e6f64..1e6, 0f64..1e3, any::<bool>(), any::<bool>()).prop_filter_map(
        "empty span",
        |(lower, width, lower_inc, upper_inc)| Span::make(lower, lower + width, lower_inc, upper_inc).ok(),
    )
}

fn period() -> impl Strategy<Value = Span<Timestamp>> {
    (0i64..1_000_000_000_000, 0i64..1_000_000_000, any::<bool>(), any::<bool>()).prop_filter_map(
        "empty period",
        |(start, width, lower_inc, upper_inc)| {
            Span::make(
                Timestamp::from_micros(start),
                Timestamp::from_micros(start + width),
                lower_inc,
                upper_inc,
            )
            .ok()
        },
    )
}

fn int_span_set() -> impl Strategy<Value = SpanSet<i32>> {
    prop::collection::vec((-1000i32..1000, 1i32..50), 1..16).prop_map(|pairs| {
        SpanSet::new(
            pairs
                .into_iter()
                .filter_map(|(lo, w)| Span::make(lo, lo + w, true, false).ok()),
        )
        .unwrap()
    })
}

fn text_set() -> impl Strategy<Value = InstantSet<String>> {
    prop::collection::vec("[a-z ]{0,8}", 1..10).prop_map(|values| InstantSet::from_unsorted(values).unwrap())
}

fn extent() -> impl Strategy<Value = Extent> {
    (
        -180f64..180.0,
        0f64..10.0,
        -90f64..90.0,
        0f64..10.0,
        prop::option::of((-100f64..100.0, 0f64..10.0)),
    )
        .prop_map(|(x, w, y, h, z)| {
            let e = Extent::new(x, x + w, y, y + h).unwrap();
            match z {
                Some((z, d)) => e.with_z(z, z + d).unwrap(),
                None => e,
            }
        })
}

proptest! {
    #[test]
    fn test_float_span_round_trip(span in float_span(), order in endian()) {
        let bytes = to_wkb(&span, &WkbOptions::new().endian(order));
        prop_assert_eq!(from_wkb::<Span<f64>>(&bytes).unwrap(), span);
    }

    #[test]
    fn test_span_set_round_trip_across_hosts(set in int_span_set(), order in endian(), host in endian()) {
        let bytes = to_wkb(&set, &WkbOptions::new().endian(order));
        let mut reader = ByteReader::new(&bytes, host).with_host(host);
        let decoded: SpanSet<i32> = decode(&mut reader).unwrap();
        prop_assert_eq!(reader.swaps_bytes(), order != host);
        prop_assert_eq!(decoded, set);
    }

    #[test]
    fn test_text_set_hex_round_trip(set in text_set(), order in endian()) {
        let hex = to_hex_wkb(&set, &WkbOptions::new().endian(order));
        prop_assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        prop_assert_eq!(from_hex_wkb::<InstantSet<String>>(&hex).unwrap(), set);
    }

    #[test]
    fn test_tbox_round_trip(span in prop::option::of(float_span()), p in period(), with_t in any::<bool>()) {
        let p = with_t.then_some(p);
        prop_assume!(span.is_some() || p.is_some());
        let tbox = TBox::new(span, p).unwrap();
        let bytes = to_wkb(&tbox, &WkbOptions::new());
        prop_assert_eq!(from_wkb::<TBox>(&bytes).unwrap(), tbox);
    }

    #[test]
    fn test_stbox_round_trip(e in extent(), p in period(), srid in 0i32..5000, geodetic in any::<bool>(), order in endian()) {
        let stbox = STBox::new(Some(e), Some(p)).unwrap().with_srid(srid).with_geodetic(geodetic);
        let bytes = to_wkb(&stbox, &WkbOptions::new().endian(order));
        prop_assert!(from_wkb::<STBox>(&bytes).unwrap().eq_exact(&stbox));
    }
}
