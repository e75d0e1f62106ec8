#![no_main]

use libfuzzer_sys::fuzz_target;
use odyssey_sync::core::header::PacketHeader;
use odyssey_sync::registry::Registry;

fuzz_target!(|data: &[u8]| {
    // Split the input into frames and replay them against one registry,
    // alternating between two sessions
    let registry = Registry::new(2);
    let mut rest = data;
    let mut session = 0u64;

    while let Ok(header) = PacketHeader::deserialize(rest) {
        let body = &rest[PacketHeader::SIZE..];
        let _ = registry.receive(session, &header, body, None);

        let consumed = usize::try_from(header.size).unwrap_or(0).min(body.len());
        rest = &body[consumed..];
        session ^= 1;
    }

    assert!(registry.client_count() <= 2);
});
