//! Synthetic inputs shared by the radiance-rs benchmarks.

/// Encodes a `width` x `height` Radiance stream with a horizontal gradient.
///
/// Mantissas vary per pixel so the red and green planes are literal runs,
/// while blue and exponent planes collapse to repeat runs.
pub fn gradient_hdr(width: u16, height: u16) -> Vec<u8> {
    let mut bytes = format!("#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y {height} +X {width}\n")
        .into_bytes();
    let w = width as usize;
    for y in 0..height as usize {
        bytes.extend_from_slice(&[2, 2]);
        bytes.extend_from_slice(&width.to_be_bytes());

        let red: Vec<u8> = (0..w).map(|x| (x * 255 / w.max(1)) as u8).collect();
        let green: Vec<u8> = (0..w).map(|x| ((x + y) % 256) as u8).collect();
        push_literals(&mut bytes, &red);
        push_literals(&mut bytes, &green);
        push_repeat(&mut bytes, w, 64);
        push_repeat(&mut bytes, w, 130);
    }
    bytes
}

fn push_literals(out: &mut Vec<u8>, plane: &[u8]) {
    for chunk in plane.chunks(128) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
}

fn push_repeat(out: &mut Vec<u8>, mut len: usize, value: u8) {
    while len > 0 {
        let run = len.min(127);
        out.extend_from_slice(&[128 + run as u8, value]);
        len -= run;
    }
}
