#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and full decode must never panic
    let _ = zenbmp::ImageInfo::from_bytes(data);
    let Ok(image) = zenbmp::BitmapImage::load(data) else {
        return;
    };

    // Anything that decodes must survive every transform
    let _ = image.describe().to_string();
    let _ = image
        .mirror(zenbmp::MirrorAxis::ColumnReverse)
        .rotate(zenbmp::RotateDirection::CounterClockwise);
});
