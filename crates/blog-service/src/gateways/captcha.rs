//! Image captcha generation
//!
//! [`BitmapCaptcha`] draws the code with a built-in 5x7 pixel font, scales
//! each glyph up, jitters it vertically and sprinkles noise over the result.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use rand::Rng;

/// Characters a captcha may contain; look-alikes (0/O, 1/I) are left out
pub const CAPTCHA_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const CODE_LEN: usize = 4;
const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
const SCALE: u32 = 4;
const PADDING: u32 = 8;
const SPACING: u32 = 6;
const WIDTH: u32 = PADDING * 2 + CODE_LEN as u32 * (GLYPH_W * SCALE) + (CODE_LEN as u32 - 1) * SPACING;
const HEIGHT: u32 = 48;

/// A rendered captcha: the expected answer plus its picture
#[derive(Debug, Clone)]
pub struct Captcha {
    pub text: String,
    pub image: Vec<u8>,
    pub content_type: &'static str,
}

/// Captcha rendering errors
#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    #[error("Failed to encode captcha image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Produces a fresh captcha for every call
pub trait CaptchaRenderer: Send + Sync {
    fn generate(&self) -> Result<Captcha, CaptchaError>;
}

/// JPEG captcha drawn from an embedded bitmap font
#[derive(Debug, Clone, Default)]
pub struct BitmapCaptcha;

impl BitmapCaptcha {
    fn random_text(rng: &mut impl Rng) -> String {
        let alphabet = CAPTCHA_ALPHABET.as_bytes();
        (0..CODE_LEN)
            .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
            .collect()
    }

    fn render(text: &str, rng: &mut impl Rng) -> RgbImage {
        let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([240, 240, 235]));

        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = glyph(ch) else { continue };
            let color = Rgb([
                rng.gen_range(20..120),
                rng.gen_range(20..120),
                rng.gen_range(40..160),
            ]);
            let x0 = PADDING + i as u32 * (GLYPH_W * SCALE + SPACING);
            let y0 = rng.gen_range(2..HEIGHT - GLYPH_H * SCALE - 2);

            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    for dy in 0..SCALE {
                        for dx in 0..SCALE {
                            img.put_pixel(x0 + col * SCALE + dx, y0 + row as u32 * SCALE + dy, color);
                        }
                    }
                }
            }
        }

        // Noise: speckles plus a couple of random lines
        for _ in 0..(WIDTH * HEIGHT / 12) {
            let (x, y) = (rng.gen_range(0..WIDTH), rng.gen_range(0..HEIGHT));
            let shade = rng.gen_range(80..200);
            img.put_pixel(x, y, Rgb([shade, shade, shade]));
        }
        for _ in 0..3 {
            let (y_start, y_end) = (rng.gen_range(0..HEIGHT), rng.gen_range(0..HEIGHT));
            let color = Rgb([rng.gen_range(60..180), rng.gen_range(60..180), rng.gen_range(60..180)]);
            for x in 0..WIDTH {
                let y = y_start as i64 + (i64::from(y_end) - i64::from(y_start)) * i64::from(x) / i64::from(WIDTH);
                img.put_pixel(x, y.clamp(0, i64::from(HEIGHT) - 1) as u32, color);
            }
        }

        img
    }
}

impl CaptchaRenderer for BitmapCaptcha {
    fn generate(&self) -> Result<Captcha, CaptchaError> {
        let mut rng = rand::thread_rng();
        let text = Self::random_text(&mut rng);
        let img = Self::render(&text, &mut rng);

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;

        Ok(Captcha {
            text,
            image: bytes,
            content_type: "image/jpeg",
        })
    }
}

/// Row bitmaps (low five bits, MSB on the left) for every alphabet character
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        _ => return None,
    };
    Some(rows)
}
