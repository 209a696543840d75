use bolero::check;

use cryptonight::kernels::portable::utils::{mul128, v2_sqrt};

#[test]
fn fuzz_sqrt_fixup_inequality() {
    // v2_sqrt(n) is pinned down by a single property: it is the largest r
    // with s*(s+b) + (r << 32) + b <= n, where s = r >> 1 and b = r & 1.
    check!().with_type::<u64>().for_each(|&input| {
        let holds = |r: u64| {
            let s = u128::from(r >> 1);
            let b = u128::from(r & 1);
            s * (s + b) + (u128::from(r) << 32) + b <= u128::from(input)
        };

        let r = v2_sqrt(input);
        assert!(holds(r), "v2_sqrt({input:#x}) = {r} overshoots");
        assert!(!holds(r + 1), "v2_sqrt({input:#x}) = {r} undershoots");
    });
}

#[test]
fn fuzz_mul128_against_wide_arithmetic() {
    check!().with_type::<(u64, u64)>().for_each(|&(x, y)| {
        let (lo, hi) = mul128(x, y);
        let wide = (u128::from(hi) << 64) | u128::from(lo);
        assert_eq!(wide, u128::from(x) * u128::from(y));
    });
}
