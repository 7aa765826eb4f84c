//! Property tests over the universal invariants in the format spec (P1-P5)
//! plus a concurrency smoke test for the by-call thread-safety claim in
//! the resource model: independent encode/decode calls on disjoint masks
//! require no coordination.

use proptest::collection::vec as pvec;
use proptest::prelude::*;

fn arb_mask(max_h: u32, max_w: u32) -> impl Strategy<Value = (Vec<u8>, u32, u32)> {
    (1..=max_h, 1..=max_w).prop_flat_map(|(h, w)| {
        pvec(any::<u8>(), (h as usize) * (w as usize)).prop_map(move |mask| (mask, h, w))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn p1_roundtrip((mask, h, w) in arb_mask(12, 12)) {
        let encoded = pfmf::encode(&mask, h, w).unwrap();
        let (decoded, shape) = pfmf::decode(&encoded).unwrap();
        prop_assert_eq!(decoded, mask);
        prop_assert_eq!(shape, (h, w));
    }

    #[test]
    fn p2_determinism((mask, h, w) in arb_mask(10, 10)) {
        let a = pfmf::encode(&mask, h, w).unwrap();
        let b = pfmf::encode(&mask, h, w).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn p3_header_fidelity((mask, h, w) in arb_mask(10, 10)) {
        let encoded = pfmf::encode(&mask, h, w).unwrap();
        let info = pfmf::header_of(&encoded).unwrap();
        prop_assert_eq!((info.height, info.width), (h, w));

        let unique: std::collections::HashSet<u8> = mask.iter().copied().collect();
        prop_assert_eq!(info.unique_symbols_count as usize, unique.len());
    }

    #[test]
    fn p5_alignment((mask, h, w) in arb_mask(10, 10)) {
        let encoded = pfmf::encode(&mask, h, w).unwrap();
        prop_assert_eq!((encoded.len() - pfmf::header::HEADER_LEN) % 8, 0);
    }

    #[test]
    fn p7_diff_locality((mut mask, h, w) in arb_mask(10, 10), flip_index in any::<usize>(), flip_value in any::<u8>()) {
        let baseline = pfmf::encode(&mask, h, w).unwrap();

        let idx = flip_index % mask.len();
        mask[idx] = flip_value;
        let perturbed = pfmf::encode(&mask, h, w).unwrap();

        // A single pixel differing should not explode the encoded size;
        // bounded by a constant number of bytes' worth of slack for width
        // recomputation and one extra run split per affected row.
        let delta = (baseline.len() as i64 - perturbed.len() as i64).unsigned_abs();
        prop_assert!(delta <= 32, "delta {delta} too large for a one-pixel change");
    }
}

#[test]
fn independent_calls_need_no_coordination() {
    use rayon::prelude::*;

    let masks: Vec<(Vec<u8>, u32, u32)> = (0..64)
        .map(|seed| {
            let h = 4 + (seed % 5);
            let w = 4 + (seed % 7);
            let mask: Vec<u8> = (0..(h * w)).map(|i| ((i + seed) % 6) as u8).collect();
            (mask, h, w)
        })
        .collect();

    masks.par_iter().for_each(|(mask, h, w)| {
        let encoded = pfmf::encode(mask, *h, *w).unwrap();
        let (decoded, shape) = pfmf::decode(&encoded).unwrap();
        assert_eq!(&decoded, mask);
        assert_eq!(shape, (*h, *w));
    });
}
