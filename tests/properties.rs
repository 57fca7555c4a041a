//! Property tests over random matrices and rows.

use proptest::prelude::*;
use zenbmp::*;

fn depth() -> impl Strategy<Value = BitDepth> {
    prop_oneof![
        Just(BitDepth::Bit1),
        Just(BitDepth::Bit4),
        Just(BitDepth::Bit8),
        Just(BitDepth::Bit24),
    ]
}

fn matrix(depth: BitDepth) -> impl Strategy<Value = PixelMatrix> {
    (1usize..24, 1usize..24).prop_flat_map(move |(w, h)| {
        prop::collection::vec(0..=depth.max_value(), w * h)
            .prop_map(move |pixels| PixelMatrix::from_vec(pixels, w, h).unwrap())
    })
}

fn image() -> impl Strategy<Value = BitmapImage> {
    depth().prop_flat_map(|depth| {
        matrix(depth).prop_map(move |pixels| {
            if depth.is_indexed() {
                let entries = (0..depth.palette_len() as u32)
                    .map(|i| i.wrapping_mul(0x9E37_79B9) & 0xFF_FFFF)
                    .collect();
                let palette = PaletteTable::validate(entries, depth).unwrap();
                BitmapImage::from_indexed(pixels, palette).unwrap()
            } else {
                BitmapImage::from_rgb(pixels).unwrap()
            }
        })
    })
}

proptest! {
    #[test]
    fn pack_unpack_identity(
        (depth, row) in depth().prop_flat_map(|d| {
            (Just(d), prop::collection::vec(0..=d.max_value(), 0..70))
        })
    ) {
        let packed = pack_row(&row, depth).unwrap();
        prop_assert_eq!(packed.len(), row_stride(row.len(), depth).unwrap());
        prop_assert_eq!(packed.len() % 4, 0);
        prop_assert_eq!(unpack_row(&packed, depth, row.len()).unwrap(), row);
    }

    #[test]
    fn save_load_identity(image in image()) {
        let encoded = image.to_bytes().unwrap();
        prop_assert_eq!(encoded.len(), image.header().size as usize);
        let decoded = BitmapImage::load(&encoded).unwrap();
        prop_assert_eq!(decoded, image);
    }

    #[test]
    fn four_rotations_identity(image in image(), clockwise in any::<bool>()) {
        let direction = if clockwise {
            RotateDirection::Clockwise
        } else {
            RotateDirection::CounterClockwise
        };
        let mut turned = image.clone();
        for _ in 0..4 {
            turned = turned.rotate(direction).unwrap();
        }
        prop_assert_eq!(turned, image);
    }

    #[test]
    fn rotation_swaps_dimensions(image in image()) {
        let (w, h) = (image.width(), image.height());
        let rotated = image.rotate(RotateDirection::Clockwise).unwrap();
        prop_assert_eq!((rotated.width(), rotated.height()), (h, w));
        let decoded = BitmapImage::load(&rotated.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(decoded, rotated);
    }

    #[test]
    fn double_mirror_identity(image in image(), rows in any::<bool>()) {
        let axis = if rows { MirrorAxis::RowReverse } else { MirrorAxis::ColumnReverse };
        let back = image.clone().mirror(axis).mirror(axis);
        prop_assert_eq!(back, image);
    }

    #[test]
    fn load_never_panics(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let _ = BitmapImage::load(&data);
        let _ = ImageInfo::from_bytes(&data);
    }
}
