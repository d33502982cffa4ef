use crate::Rgba;

/// 0..=255 channel value with standard rounding.
fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Rgba {
    /// `(a, r, g, b)` as 0..=255 integers.
    pub fn argb8(&self) -> (u8, u8, u8, u8) {
        (channel(self.a), channel(self.r), channel(self.g), channel(self.b))
    }

    /// `#AARRGGBB`, Android resource notation.
    pub fn to_argb_hex(&self) -> String {
        let (a, r, g, b) = self.argb8();
        format!("#{a:02X}{r:02X}{g:02X}{b:02X}")
    }

    /// `0xAARRGGBB`, a Kotlin `Long` literal for Compose `Color(...)`.
    pub fn to_argb_literal(&self) -> String {
        let (a, r, g, b) = self.argb8();
        format!("0x{a:02X}{r:02X}{g:02X}{b:02X}")
    }

    /// `#RRGGBB`, alpha dropped.
    pub fn to_rgb_hex(&self) -> String {
        let (_, r, g, b) = self.argb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    pub fn is_opaque(&self) -> bool {
        channel(self.a) == 255
    }
}

/// Round to `decimals` places.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (v * factor).round() / factor
}

/// Shortest decimal rendering: `32`, `38.4`, `-0.25`. Negative zero prints as `0`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Nine weight buckets, 100 through 900. Anything above 800 lands in 900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeightBucket {
    W100,
    W200,
    W300,
    W400,
    W500,
    W600,
    W700,
    W800,
    W900,
}

impl WeightBucket {
    pub fn from_weight(weight: u16) -> Self {
        match weight {
            0..=100 => Self::W100,
            101..=200 => Self::W200,
            201..=300 => Self::W300,
            301..=400 => Self::W400,
            401..=500 => Self::W500,
            501..=600 => Self::W600,
            601..=700 => Self::W700,
            701..=800 => Self::W800,
            _ => Self::W900,
        }
    }

    pub fn value(self) -> u16 {
        (self as u16 + 1) * 100
    }
}
