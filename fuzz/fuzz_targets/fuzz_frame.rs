#![no_main]

use libfuzzer_sys::fuzz_target;
use odyssey_sync::core::header::{decode_frame, encode_packet};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must encode again
    if let Ok((header, packet)) = decode_frame(data) {
        let frame = encode_packet(header.id, &packet);
        assert!(frame.is_ok());
        let _ = decode_frame(&frame.unwrap_or_default());
    }
});
