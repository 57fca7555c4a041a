#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u32, height: u32, bpp: u16) -> Vec<u8> {
    let palette = if bpp == 24 { 0 } else { 4u32 << bpp };
    let stride = (width * u32::from(bpp)).div_ceil(32) * 4;
    let offset = 54 + palette;
    let image_size = stride * height;
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(offset + image_size).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[34..38].copy_from_slice(&image_size.to_le_bytes());
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = header(1, 1, 24);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]); // BGR + padding
    fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp).unwrap();

    // 4-bit 5x2 with gray ramp palette
    let mut bmp = header(5, 2, 4);
    for i in 0..16u8 {
        let v = i * 0x11;
        bmp.extend_from_slice(&[v, v, v, 0]);
    }
    bmp.extend_from_slice(&[0x01, 0x23, 0x40, 0x00, 0xfe, 0xdc, 0xb0, 0x00]);
    fs::write(format!("{dir}/bmp4_5x2.bmp"), bmp).unwrap();

    // 1-bit 9x1 black/white
    let mut bmp = header(9, 1, 1);
    bmp.extend_from_slice(&[0, 0, 0, 0, 0xff, 0xff, 0xff, 0]);
    bmp.extend_from_slice(&[0b1010_1010, 0b1000_0000, 0, 0]);
    fs::write(format!("{dir}/bmp1_9x1.bmp"), bmp).unwrap();

    // 8-bit 2x2 with a 256-entry palette
    let mut bmp = header(2, 2, 8);
    for i in 0..=255u8 {
        bmp.extend_from_slice(&[i, 255 - i, i / 2, 0]);
    }
    bmp.extend_from_slice(&[0, 255, 0, 0, 128, 64, 0, 0]);
    fs::write(format!("{dir}/bmp8_2x2.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(4, 4, 24)).unwrap();
    fs::write(format!("{dir}/palette_cut.bin"), &header(4, 4, 8)[..]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
