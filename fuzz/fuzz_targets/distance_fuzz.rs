//! Fuzz target for the token-aware edit distance engine.
//!
//! Feeds arbitrary byte pairs through `distance` and checks that it never
//! panics and never produces NaN, regardless of input.
//!
//! Run with: cargo +nightly fuzz run distance_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use toked_core::distance;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Split on the first NUL scalar to get two independent strings out of
    // one fuzzer-supplied corpus entry; without one, compare the string
    // against itself (still exercises the identity fast path honestly).
    let (a, b) = match input.split_once('\0') {
        Some((a, b)) => (a, b),
        None => (input, input),
    };

    let d = distance(a, b);
    assert!(!d.is_nan(), "distance({a:?}, {b:?}) returned NaN");
    assert!(d >= 0.0 || d.is_infinite(), "distance returned a negative finite value: {d}");
});
