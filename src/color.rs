use crate::Face;

/// An RGB colour as (r, g, b).
pub type Rgb = (u8, u8, u8);

/// Colours the die face and result message take on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueColors {
    /// While a roll is animating
    pub rolling: Rgb,
    /// Natural 20
    pub critical_hit: Rgb,
    /// Natural 1
    pub critical_miss: Rgb,
    /// Any other settled face
    pub normal: Rgb,
}

impl Default for ValueColors {
    fn default() -> Self {
        Self {
            rolling: (0x66, 0x66, 0x66),
            critical_hit: (0xFF, 0xD7, 0x00),
            critical_miss: (0xDC, 0x14, 0x3C),
            normal: (0x33, 0x33, 0x33),
        }
    }
}

impl ValueColors {
    /// Colour for `face`; rolling overrides the critical colours.
    pub fn color_for(&self, face: Face, is_rolling: bool) -> Rgb {
        if is_rolling {
            self.rolling
        } else if face.is_critical_hit() {
            self.critical_hit
        } else if face.is_critical_miss() {
            self.critical_miss
        } else {
            self.normal
        }
    }
}

/// Parse a colour string into an RGB tuple.
///
/// Accepts `#RGB`, `#RRGGBB` and a handful of names (black, white, gray/grey,
/// silver, gold, crimson, red, green, blue, orange, purple). Case-insensitive,
/// surrounding whitespace ignored.
pub fn parse_color(s: &str) -> Option<Rgb> {
    let s = s.trim();
    match s.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => parse_named(s),
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => Some((channel(0..1)? * 17, channel(1..2)? * 17, channel(2..3)? * 17)),
        6 => Some((channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => None,
    }
}

fn parse_named(s: &str) -> Option<Rgb> {
    match s.to_ascii_lowercase().as_str() {
        "black"         => Some((0, 0, 0)),
        "white"         => Some((255, 255, 255)),
        "gray" | "grey" => Some((128, 128, 128)),
        "silver"        => Some((192, 192, 192)),
        "gold"          => Some((255, 215, 0)),
        "crimson"       => Some((220, 20, 60)),
        "red"           => Some((255, 0, 0)),
        "green"         => Some((0, 128, 0)),
        "blue"          => Some((0, 0, 255)),
        "orange"        => Some((255, 165, 0)),
        "purple"        => Some((128, 0, 128)),
        _               => None,
    }
}

/// Format as `#rrggbb`.
pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
}
