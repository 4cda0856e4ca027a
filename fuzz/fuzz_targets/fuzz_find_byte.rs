#![no_main]
use bytescan::{scan_linear, ByteSearcher, Capabilities, Pattern, Strategy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte is the needle, second picks a start offset so the haystack
    // lands on every alignment.
    let needle = data[0];
    let start = 2 + (data[1] as usize % 16).min(data.len() - 2);
    let hay = &data[start..];

    let expect = scan_linear(hay, Pattern::Byte(needle));
    for strategy in Strategy::available(Capabilities::detect()) {
        let searcher = ByteSearcher::with_strategy(needle, strategy).unwrap();
        assert_eq!(searcher.find(hay), expect, "{strategy}");
    }
});
