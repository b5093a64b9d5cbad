//! Decode a Radiance stream and turn it into a display raster.

use radiance_io::hdr;
use radiance_ops::{build_raster, build_raster_sized, reinhard};

/// 2x2 image: black, mid grey (1.0), bright red (255.0), dim blue (0.5).
fn sample() -> Vec<u8> {
    let mut bytes = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y 2 +X 2\n".to_vec();
    let rows: [[[u8; 4]; 2]; 2] = [
        [[0, 0, 0, 0], [128, 128, 128, 129]],
        [[255, 0, 0, 136], [0, 0, 128, 128]],
    ];
    for row in rows {
        bytes.extend_from_slice(&[2, 2, 0, 2]);
        for plane in 0..4 {
            bytes.push(2);
            bytes.extend(row.iter().map(|p| p[plane]));
        }
    }
    bytes
}

#[test]
fn decoded_image_tone_maps_per_channel() {
    let image = hdr::decode_from_memory(&sample()).unwrap();
    let raster = build_raster(&image).unwrap();

    assert_eq!(raster.channels(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(raster.channels(1, 0), Some([128, 128, 128, 255]));
    assert_eq!(raster.channels(0, 1), Some([reinhard(255.0), 0, 0, 255]));
    assert_eq!(raster.channels(1, 1), Some([0, 0, reinhard(0.5), 255]));
}

#[test]
fn thumbnail_point_samples_top_left() {
    let image = hdr::decode_from_memory(&sample()).unwrap();
    let full = build_raster(&image).unwrap();
    let thumb = build_raster_sized(&image, 1, 1).unwrap();
    assert_eq!(thumb.pixel(0, 0), full.pixel(0, 0));
}

#[test]
fn enlarged_raster_repeats_pixels() {
    let image = hdr::decode_from_memory(&sample()).unwrap();
    let full = build_raster(&image).unwrap();
    let big = build_raster_sized(&image, 4, 4).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(big.pixel(x, y), full.pixel(x / 2, y / 2));
        }
    }
    assert_eq!(big.to_rgba8().len(), 4 * 4 * 4);
}
