//! Hex color normalization and HSL helpers used to classify color roles and to
//! synthesize missing palette entries.

/// Lightness offset applied when a palette role has to be derived from the primary.
pub const SYNTHESIS_OFFSET: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Lightness, `[0, 1]`.
    pub l: f64,
}

/// Normalize a hex literal to lowercase `#rrggbb`.
///
/// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` (alpha dropped), with or without
/// the leading `#`. Returns `None` for anything else.
#[must_use]
pub fn normalize_hex(raw: &str) -> Option<String> {
    let digits = raw.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let lower = digits.to_ascii_lowercase();
    match lower.len() {
        3 => {
            let expanded: String = lower.chars().flat_map(|c| [c, c]).collect();
            Some(format!("#{expanded}"))
        }
        6 => Some(format!("#{lower}")),
        8 => Some(format!("#{}", &lower[..6])),
        _ => None,
    }
}

#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse a hex color into its RGB channels.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let normalized = normalize_hex(hex)?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&normalized[range], 16).ok();
    Some((channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

#[must_use]
pub fn to_hsl(hex: &str) -> Option<Hsl> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta.abs() < f64::EPSILON {
        return Some(Hsl { h: 0.0, s: 0.0, l });
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    #[allow(clippy::float_cmp)] // max is one of r, g, b exactly
    let h = if max == r {
        ((g - b) / delta) % 6.0
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let h = (h * 60.0).rem_euclid(360.0);

    Some(Hsl { h, s, l })
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0, 255]
pub fn from_hsl(hsl: Hsl) -> String {
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = hsl.h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h_prime {
        hp if hp < 1.0 => (c, x, 0.0),
        hp if hp < 2.0 => (x, c, 0.0),
        hp if hp < 3.0 => (0.0, c, x),
        hp if hp < 4.0 => (0.0, x, c),
        hp if hp < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    rgb_to_hex(to_byte(r1), to_byte(g1), to_byte(b1))
}

/// Raise lightness by `amount`; unparseable input is returned unchanged.
#[must_use]
pub fn lighten(hex: &str, amount: f64) -> String {
    adjust_lightness(hex, amount)
}

/// Lower lightness by `amount`; unparseable input is returned unchanged.
#[must_use]
pub fn darken(hex: &str, amount: f64) -> String {
    adjust_lightness(hex, -amount)
}

fn adjust_lightness(hex: &str, delta: f64) -> String {
    match to_hsl(hex) {
        Some(hsl) => from_hsl(Hsl {
            l: (hsl.l + delta).clamp(0.0, 1.0),
            ..hsl
        }),
        None => hex.to_string(),
    }
}
