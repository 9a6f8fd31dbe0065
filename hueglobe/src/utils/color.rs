use nalgebra::Vector3;
use snafu::{OptionExt, Snafu, ensure};
use std::fmt::{Display, Formatter};

/// Saturation used by the hue gradient material.
pub const HUE_SATURATION: f32 = 1.0;
/// Lightness used by the hue gradient material.
pub const HUE_LIGHTNESS: f32 = 0.5;

/// GLSL style `mod`, floored rather than truncated.
#[inline]
pub fn floored_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// Converts an HSL color to RGB. `h` spans the whole hue circle over `[0, 1]`.
///
/// This is the exact formula `hue_gradient.wgsl` runs per fragment. The sector is picked by the
/// first `h < k / 6` that holds, so a hue sitting exactly on `k / 6` lands in the sector that
/// starts there and anything at or past `5/6` lands in the last one.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vector3<f32> {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (floored_mod(h * 6.0, 2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let rgb = if h < 1.0 / 6.0 {
        Vector3::new(c, x, 0.0)
    } else if h < 2.0 / 6.0 {
        Vector3::new(x, c, 0.0)
    } else if h < 3.0 / 6.0 {
        Vector3::new(0.0, c, x)
    } else if h < 4.0 / 6.0 {
        Vector3::new(0.0, x, c)
    } else if h < 5.0 / 6.0 {
        Vector3::new(x, 0.0, c)
    } else {
        Vector3::new(c, 0.0, x)
    };

    rgb.add_scalar(m)
}

/// The color the hue gradient material produces for a horizontal texture coordinate.
#[inline]
pub fn hue_gradient(u: f32) -> Vector3<f32> {
    hsl_to_rgb(u, HUE_SATURATION, HUE_LIGHTNESS)
}

/// Quantizes a `[0, 1]` channel the way a unorm render target stores it.
#[inline]
pub fn unorm_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Formats a color as `#rrggbb`. Every channel is lowercase and zero padded to two digits.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[derive(Debug, Snafu)]
pub enum ParseColorError {
    #[snafu(display("Hex color {input:?} doesn't start with '#'"))]
    MissingHash { input: String },

    #[snafu(display("Hex color {input:?} must have exactly six hex digits"))]
    InvalidLength { input: String },

    #[snafu(display("Hex color {input:?} contains a non hex digit"))]
    InvalidDigit { input: String },
}

/// One RGB readback of the canvas center. Alpha is dropped.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Sample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Sample {
    pub const BLACK: Sample = Sample::new(0, 0, 0);
    pub const WHITE: Sample = Sample::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Sample { r, g, b }
    }

    #[inline]
    pub fn from_rgba(pixel: [u8; 4]) -> Self {
        Sample::new(pixel[0], pixel[1], pixel[2])
    }

    pub fn from_unorm(rgb: Vector3<f32>) -> Self {
        Sample::new(unorm_to_u8(rgb.x), unorm_to_u8(rgb.y), unorm_to_u8(rgb.z))
    }

    /// `0xRRGGBB`, the way hex colors are written in code.
    pub const fn from_u32(rgb: u32) -> Self {
        Sample::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn from_hex(input: &str) -> Result<Self, ParseColorError> {
        let digits = input
            .strip_prefix('#')
            .ok_or_else(|| MissingHashSnafu { input }.build())?;

        ensure!(
            digits.len() == 6 && digits.is_ascii(),
            InvalidLengthSnafu { input }
        );

        // from_str_radix alone would accept a leading '+'
        ensure!(
            digits.bytes().all(|b| b.is_ascii_hexdigit()),
            InvalidDigitSnafu { input }
        );

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .context(InvalidDigitSnafu { input })
        };

        Ok(Sample::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// CSS functional notation, `rgb(r, g, b)`.
    pub fn to_css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_unorm(&self) -> Vector3<f32> {
        Vector3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<Sample> for wgpu::Color {
    fn from(sample: Sample) -> Self {
        wgpu::Color {
            r: sample.r as f64 / 255.0,
            g: sample.g as f64 / 255.0,
            b: sample.b as f64 / 255.0,
            a: 1.0,
        }
    }
}
