//! Reinhard tone mapping to 8-bit display values.
//!
//! Each channel is mapped independently with `v / (v + 1)`; there is no
//! global luminance adjustment.
//!
//! # Example
//!
//! ```rust
//! use radiance_ops::tonemap::reinhard;
//!
//! assert_eq!(reinhard(0.0), 0);
//! assert_eq!(reinhard(1.0), 128);
//! assert_eq!(reinhard(-3.0), 0);
//! ```

/// Maps one linear channel value to `[0, 255]`.
///
/// Computes `round(v / (v + 1) * 255)`. Negative and NaN input map to 0.
#[inline]
pub fn reinhard(v: f32) -> u8 {
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    let mapped = v / (v + 1.0) * 255.0;
    // infinity gives NaN above; saturate it
    if mapped.is_nan() {
        return 255;
    }
    mapped.round().clamp(0.0, 255.0) as u8
}

/// Maps an RGB triple channel by channel.
#[inline]
pub fn reinhard_rgb(rgb: [f32; 3]) -> [u8; 3] {
    [reinhard(rgb[0]), reinhard(rgb[1]), reinhard(rgb[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_points() {
        assert_eq!(reinhard(0.0), 0);
        assert_eq!(reinhard(1.0), 128);
        assert_eq!(reinhard(3.0), 191);
        assert_eq!(reinhard(255.0), 254);
        assert_eq!(reinhard(1.0e6), 255);
        assert_eq!(reinhard(f32::INFINITY), 255);
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        assert_eq!(reinhard(-0.5), 0);
        assert_eq!(reinhard(-2.0), 0);
        assert_eq!(reinhard(f32::NAN), 0);
    }

    #[test]
    fn monotonic_on_non_negative_input() {
        let mut prev = 0u8;
        let mut v = 0.0f32;
        while v < 2000.0 {
            let out = reinhard(v);
            assert!(out >= prev, "reinhard({v}) = {out} < {prev}");
            prev = out;
            v = v * 1.07 + 0.001;
        }
    }

    #[test]
    fn channels_are_independent() {
        assert_eq!(reinhard_rgb([0.0, 1.0, 3.0]), [0, 128, 191]);
    }
}
