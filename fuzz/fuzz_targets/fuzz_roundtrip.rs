#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical images
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode() else {
        return;
    };

    let reencoded = decoded.to_bytes().expect("decoded image failed to encode");
    let Ok(decoded2) = BitmapImage::load(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.palette(), decoded2.palette());
    assert_eq!(decoded.header(), decoded2.header());
    assert_eq!(reencoded, decoded2.to_bytes().unwrap());
});
