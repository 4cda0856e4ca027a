#![no_main]
use bytescan::{scan_linear, Capabilities, PairMethod, PairSearcher, Pattern, Strategy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // First two bytes are the pair, third picks a start offset.
    let (first, second) = (data[0], data[1]);
    let start = 3 + (data[2] as usize % 16).min(data.len() - 3);
    let hay = &data[start..];

    let expect = scan_linear(hay, Pattern::Pair(first, second));
    for strategy in Strategy::available(Capabilities::detect()).filter(|s| s.supports_pairs()) {
        for method in [PairMethod::ShiftCombine, PairMethod::Rolling] {
            let searcher = PairSearcher::with_strategy(first, second, strategy, method).unwrap();
            assert_eq!(searcher.find(hay), expect, "{strategy}/{method}");
        }
    }
});
