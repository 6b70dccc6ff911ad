//! Color-string parsing.
//!
//! Specs carry colors as opaque strings (or packed integers) and hand them to
//! the renderer. [`Color::parse`] resolves them to a canonical RGBA value when
//! concrete pixels are needed, and [`Color::info`] derives the other common
//! notations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new RGBA color.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse any supported color notation:
    ///
    /// - hex `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (the `#` is optional)
    /// - `rgb()` / `rgba()` with comma, space or slash separators
    /// - `hsl()` / `hsla()` and `hsv()` / `hsva()`
    /// - CSS named colors
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        if is_hex(s) {
            return Self::from_hex(s);
        }

        if let Some(args) = function_args(s, &["rgba", "rgb"]) {
            return parse_rgb_args(args);
        }
        if let Some(args) = function_args(s, &["hsla", "hsl"]) {
            let (h, sat, light, a) = parse_hue_args(args, "hsl")?;
            let (r, g, b) = hls_to_rgb(h / 360.0, light, sat);
            return Ok(Self::from_unit(r, g, b, a));
        }
        if let Some(args) = function_args(s, &["hsva", "hsv"]) {
            let (h, sat, value, a) = parse_hue_args(args, "hsv")?;
            let (r, g, b) = hsv_to_rgb(h / 360.0, sat, value);
            return Ok(Self::from_unit(r, g, b, a));
        }

        named(s).ok_or_else(|| ColorError::Unsupported(s.to_string()))
    }

    /// Create a color from a hex string (e.g. "#FF0000", "#F00" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(ColorError::InvalidHex(hex.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        let a = if expanded.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Unpack an integer color: `0xRRGGBB` when it fits in 24 bits,
    /// `0xRRGGBBAA` otherwise.
    pub fn from_packed(value: u32) -> Self {
        if value <= 0xFF_FFFF {
            Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
        } else {
            Self::rgba(
                (value >> 24) as u8,
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            )
        }
    }

    /// Build from 3 or 4 numeric channels in `0..=255`, clamping each.
    pub fn from_channels(channels: &[f64]) -> Result<Self, ColorError> {
        match channels {
            [r, g, b] => Ok(Self::rgb(clamp_byte(*r), clamp_byte(*g), clamp_byte(*b))),
            [r, g, b, a] => Ok(Self::rgba(
                clamp_byte(*r),
                clamp_byte(*g),
                clamp_byte(*b),
                clamp_byte(*a),
            )),
            _ => Err(ColorError::WrongArity {
                notation: "channel list",
                found: channels.len(),
            }),
        }
    }

    fn from_unit(r: f64, g: f64, b: f64, a: u8) -> Self {
        Self::rgba(
            clamp_byte(r * 255.0),
            clamp_byte(g * 255.0),
            clamp_byte(b * 255.0),
            a,
        )
    }

    /// Convert to an RGBA u8 array.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `0xRRGGBB`.
    pub fn to_int(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// `0xRRGGBBAA`.
    pub fn to_int_rgba(&self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbbaa`.
    pub fn hexa(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Channels normalized to `0.0..=1.0`.
    pub fn normalized(&self) -> [f64; 4] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        ]
    }

    /// `(hue degrees, saturation %, lightness %)`.
    pub fn to_hsl(&self) -> [f64; 3] {
        let [r, g, b, _] = self.normalized();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;
        if range == 0.0 {
            return [0.0, 0.0, l * 100.0];
        }
        let s = if l <= 0.5 {
            range / sum
        } else {
            range / (2.0 - max - min)
        };
        [hue(r, g, b, max, range) * 360.0, s * 100.0, l * 100.0]
    }

    /// `(hue degrees, saturation %, value %)`.
    pub fn to_hsv(&self) -> [f64; 3] {
        let [r, g, b, _] = self.normalized();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let range = max - min;
        if range == 0.0 {
            return [0.0, 0.0, max * 100.0];
        }
        [hue(r, g, b, max, range) * 360.0, range / max * 100.0, max * 100.0]
    }

    /// CMYK percentages.
    pub fn to_cmyk(&self) -> [f64; 4] {
        let [r, g, b, _] = self.normalized();
        let k = 1.0 - r.max(g).max(b);
        if k == 1.0 {
            return [0.0, 0.0, 0.0, 100.0];
        }
        [
            (1.0 - r - k) / (1.0 - k) * 100.0,
            (1.0 - g - k) / (1.0 - k) * 100.0,
            (1.0 - b - k) / (1.0 - k) * 100.0,
            k * 100.0,
        ]
    }

    /// Every derived representation at once.
    pub fn info(&self) -> ColorInfo {
        let [rn, gn, bn, an] = self.normalized();
        let [hh, sh, lh] = self.to_hsl();
        let [hv, sv, vv] = self.to_hsv();
        ColorInfo {
            rgb: [self.r, self.g, self.b],
            rgba: self.to_rgba8(),
            hex: self.hex(),
            hexa: self.hexa(),
            int: self.to_int(),
            int_rgba: self.to_int_rgba(),
            rgb_norm: [rn, gn, bn],
            rgba_norm: [rn, gn, bn, an],
            hsl: [hh, sh, lh],
            hsla: [hh, sh, lh, an],
            hsv: [hv, sv, vv],
            hsva: [hv, sv, vv, an],
            cmyk: self.to_cmyk(),
        }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// A color as it appears in a scene document: a string in any notation
/// [`Color::parse`] understands, a packed integer, or a channel list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Packed(u32),
    Channels(Vec<f64>),
    Text(String),
}

impl ColorValue {
    pub fn resolve(&self) -> Result<Color, ColorError> {
        match self {
            ColorValue::Packed(v) => Ok(Color::from_packed(*v)),
            ColorValue::Channels(c) => Color::from_channels(c),
            ColorValue::Text(s) => Color::parse(s),
        }
    }

    /// Empty strings and empty channel lists do not count as content.
    pub fn is_empty(&self) -> bool {
        match self {
            ColorValue::Packed(_) => false,
            ColorValue::Channels(c) => c.is_empty(),
            ColorValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<&str> for ColorValue {
    fn from(s: &str) -> Self {
        ColorValue::Text(s.to_string())
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Packed(v) => write!(f, "{v:#x}"),
            ColorValue::Channels(c) => write!(f, "{c:?}"),
            ColorValue::Text(s) => f.write_str(s),
        }
    }
}

/// All derived notations of a color. Hues are degrees, saturation /
/// lightness / value / CMYK are percentages, alpha in `hsla`/`hsva` is `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub rgb: [u8; 3],
    pub rgba: [u8; 4],
    pub hex: String,
    pub hexa: String,
    pub int: u32,
    pub int_rgba: u32,
    pub rgb_norm: [f64; 3],
    pub rgba_norm: [f64; 4],
    pub hsl: [f64; 3],
    pub hsla: [f64; 4],
    pub hsv: [f64; 3],
    pub hsva: [f64; 4],
    pub cmyk: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string: {0}")]
    InvalidHex(String),
    #[error("invalid color component: {0}")]
    InvalidComponent(String),
    #[error("{notation} needs 3 or 4 components, found {found}")]
    WrongArity { notation: &'static str, found: usize },
    #[error("unsupported color format: {0:?}")]
    Unsupported(String),
}

fn clamp_byte(v: f64) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

fn is_hex(s: &str) -> bool {
    let digits = s.strip_prefix('#').unwrap_or(s);
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// The argument text of `name(...)` for the first matching name,
/// case-insensitively.
fn function_args<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    let open = s.find('(')?;
    let name = &s[..open];
    if !names.iter().any(|n| name.eq_ignore_ascii_case(n)) {
        return None;
    }
    s[open + 1..].strip_suffix(')')
}

/// Split on commas, whitespace or `/`.
fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

fn number(tok: &str) -> Result<f64, ColorError> {
    tok.trim()
        .parse::<f64>()
        .map_err(|_| ColorError::InvalidComponent(tok.to_string()))
}

fn parse_channel(tok: &str) -> Result<u8, ColorError> {
    match tok.strip_suffix('%') {
        Some(pct) => Ok(clamp_byte(number(pct)? * 255.0 / 100.0)),
        None => Ok(clamp_byte(number(tok)?)),
    }
}

/// Alpha as a percentage, a `0..=1` fraction, or a `0..=255` byte.
fn parse_alpha(tok: &str) -> Result<u8, ColorError> {
    if let Some(pct) = tok.strip_suffix('%') {
        return Ok(clamp_byte(number(pct)? * 255.0 / 100.0));
    }
    let v = number(tok)?;
    if v <= 1.0 {
        Ok(clamp_byte(v * 255.0))
    } else {
        Ok(clamp_byte(v))
    }
}

fn parse_rgb_args(args: &str) -> Result<Color, ColorError> {
    let parts = split_args(args);
    if !matches!(parts.len(), 3 | 4) {
        return Err(ColorError::WrongArity {
            notation: "rgb/rgba",
            found: parts.len(),
        });
    }
    let a = match parts.get(3) {
        Some(tok) => parse_alpha(tok)?,
        None => 255,
    };
    Ok(Color::rgba(
        parse_channel(parts[0])?,
        parse_channel(parts[1])?,
        parse_channel(parts[2])?,
        a,
    ))
}

/// `(hue degrees in 0..360, second fraction, third fraction, alpha byte)`.
fn parse_hue_args(args: &str, notation: &'static str) -> Result<(f64, f64, f64, u8), ColorError> {
    let parts = split_args(args);
    if !matches!(parts.len(), 3 | 4) {
        return Err(ColorError::WrongArity {
            notation,
            found: parts.len(),
        });
    }
    let hue_tok = parts[0].to_ascii_lowercase().replace("deg", "");
    let h = number(&hue_tok)?.rem_euclid(360.0);
    let second = number(parts[1].trim_end_matches('%'))? / 100.0;
    let third = number(parts[2].trim_end_matches('%'))? / 100.0;
    let a = match parts.get(3) {
        Some(tok) => parse_alpha(tok)?,
        None => 255,
    };
    Ok((h, second, third, a))
}

/// Hue as a `0..1` fraction for normalized channels.
fn hue(r: f64, g: f64, b: f64, max: f64, range: f64) -> f64 {
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (h / 6.0).rem_euclid(1.0)
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, h: f64) -> f64 {
    let h = h.rem_euclid(1.0);
    if h < 1.0 / 6.0 {
        m1 + (m2 - m1) * h * 6.0
    } else if h < 0.5 {
        m2
    } else if h < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
    } else {
        m1
    }
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

fn named(s: &str) -> Option<Color> {
    let lower = s.to_ascii_lowercase();
    if lower == "transparent" {
        return Some(Color::TRANSPARENT);
    }
    NAMED_COLORS
        .binary_search_by(|(name, _)| name.cmp(&lower.as_str()))
        .ok()
        .map(|i| {
            let [r, g, b] = NAMED_COLORS[i].1;
            Color::rgb(r, g, b)
        })
}

/// CSS named colors, sorted by name.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_rgb() {
        let c = Color::parse("#FF8800").unwrap();
        assert_eq!(c.to_rgba8(), [255, 136, 0, 255]);
    }

    #[test]
    fn test_color_from_hex_rgba() {
        let c = Color::parse("#FF880080").unwrap();
        assert_eq!(c.to_rgba8(), [255, 136, 0, 128]);
    }

    #[test]
    fn test_color_from_hex_short_forms() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::parse("#ffffff20").unwrap().to_rgba8(),
            [255, 255, 255, 32]
        );
        assert_eq!(Color::parse("f008").unwrap().to_rgba8(), [255, 0, 0, 136]);
        assert_eq!(Color::parse("00FF00").unwrap().to_rgba8(), [0, 255, 0, 255]);
    }

    #[test]
    fn test_color_rgb_functions() {
        assert_eq!(Color::parse("rgb(255, 0, 0)").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(
            Color::parse("rgba(0, 0, 255, 0.5)").unwrap().to_rgba8(),
            [0, 0, 255, 128]
        );
        assert_eq!(
            Color::parse("RGB(100% 0% 50% / 50%)").unwrap().to_rgba8(),
            [255, 0, 128, 128]
        );
        assert_eq!(
            Color::parse("rgba(10, 20, 30, 200)").unwrap().to_rgba8(),
            [10, 20, 30, 200]
        );
    }

    #[test]
    fn test_color_hsl_and_hsv() {
        assert_eq!(Color::parse("hsl(120, 100%, 50%)").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(
            Color::parse("hsla(240deg, 100%, 50%, 0.5)").unwrap().to_rgba8(),
            [0, 0, 255, 128]
        );
        assert_eq!(Color::parse("hsv(0, 100%, 100%)").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("hsv(0, 0%, 50%)").unwrap(), Color::rgb(128, 128, 128));
        assert_eq!(Color::parse("hsl(-240, 100%, 50%)").unwrap(), Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_color_named() {
        assert_eq!(Color::parse("white").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("RebeccaPurple").unwrap(), Color::rgb(102, 51, 153));
        assert_eq!(Color::parse("transparent").unwrap(), Color::TRANSPARENT);
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_color_packed() {
        assert_eq!(Color::from_packed(0x0b1629), Color::rgb(0x0b, 0x16, 0x29));
        assert_eq!(
            Color::from_packed(0x11223344).to_rgba8(),
            [0x11, 0x22, 0x33, 0x44]
        );
    }

    #[test]
    fn test_color_invalid() {
        assert!(Color::parse("invalid").is_err());
        assert!(Color::parse("#GG0000").is_err());
        assert!(Color::parse("rgb(1, 2)").is_err());
        assert!(Color::parse("hsl(a, 1%, 1%)").is_err());
    }

    #[test]
    fn test_color_info() {
        let info = Color::parse("#0b1629").unwrap().info();
        assert_eq!(info.hex, "#0b1629");
        assert_eq!(info.hexa, "#0b1629ff");
        assert_eq!(info.int, 0x0b1629);
        assert_eq!(info.int_rgba, 0x0b1629ff);

        let red = Color::rgb(255, 0, 0).info();
        assert_eq!(red.hsl, [0.0, 100.0, 50.0]);
        assert_eq!(red.hsv, [0.0, 100.0, 100.0]);
        assert_eq!(red.cmyk, [0.0, 100.0, 100.0, 0.0]);
        assert_eq!(Color::BLACK.to_cmyk(), [0.0, 0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_color_value_untagged() {
        let v: ColorValue = serde_json::from_str("\"#fff\"").unwrap();
        assert_eq!(v.resolve().unwrap(), Color::WHITE);
        let v: ColorValue = serde_json::from_str("16777215").unwrap();
        assert_eq!(v.resolve().unwrap(), Color::WHITE);
        let v: ColorValue = serde_json::from_str("[255, 255, 255, 0]").unwrap();
        assert_eq!(v.resolve().unwrap().a, 0);
        assert!(ColorValue::from("  ").is_empty());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(format!("{}", Color::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Color::rgba(255, 0, 0, 127)), "#FF00007F");
    }
}
