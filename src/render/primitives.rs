use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string (`#rrggbb` or `rgba(r, g, b, a)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(red as f64 / 255.0, green as f64 / 255.0, blue as f64 / 255.0)
    }

    #[must_use]
    pub const fn rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(red as f64 / 255.0, green as f64 / 255.0, blue as f64 / 255.0, alpha)
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)`. Surrounding whitespace is ignored.
    pub fn parse_css(input: &str) -> ChartResult<Self> {
        let text = input.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_color(input));
        }

        let lower = text.to_ascii_lowercase();
        let (body, expects_alpha) = if let Some(body) = lower.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = lower.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid_color(input));
        };
        let body = body.strip_suffix(')').ok_or_else(|| invalid_color(input))?;

        let parts = body
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid_color(input))?;
        let alpha = match (expects_alpha, parts.as_slice()) {
            (true, [_, _, _, alpha]) => *alpha,
            (false, [_, _, _]) => 1.0,
            _ => return Err(invalid_color(input)),
        };

        let color = Self::rgba(parts[0] / 255.0, parts[1] / 255.0, parts[2] / 255.0, alpha);
        color.validate()?;
        Ok(color)
    }

    /// Same color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn with_alpha_factor(self, factor: f64) -> Self {
        Self {
            alpha: (self.alpha * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn invalid_color(input: &str) -> ChartError {
    ChartError::InvalidData(format!("unsupported css color `{input}`"))
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    let short = |index: usize| channel(&hex[index..=index].repeat(2));
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => Some(Color::rgb8(short(0)?, short(1)?, short(2)?)),
        6 | 8 => {
            let base = Color::rgb8(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?);
            if hex.len() == 8 {
                Some(Color {
                    alpha: f64::from(channel(&hex[6..8])?) / 255.0,
                    ..base
                })
            } else {
                Some(base)
            }
        }
        _ => None,
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        Self::parse_css(input)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        Self::parse_css(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (red, green, blue) = (to_byte(self.red), to_byte(self.green), to_byte(self.blue));
        if self.alpha >= 1.0 {
            write!(f, "#{red:02x}{green:02x}{blue:02x}")
        } else {
            write!(f, "rgba({red}, {green}, {blue}, {})", self.alpha)
        }
    }
}

/// Axis-aligned fill in device pixels. All four edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub fill_color: Color,
}

impl RenderRect {
    #[must_use]
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64, fill_color: Color) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            fill_color,
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        self.right - self.left + 1
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        self.bottom - self.top + 1
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.is_degenerate() {
            return Err(ChartError::InvalidData(format!(
                "rect has negative extent: left={}, top={}, right={}, bottom={}",
                self.left, self.top, self.right, self.bottom
            )));
        }
        self.fill_color.validate()
    }
}

/// Font request passed to the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: f64,
    pub family: String,
}

impl FontSpec {
    #[must_use]
    pub fn new(size_px: f64, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }

    /// CSS shorthand, e.g. `11px Helvetica`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }
}

/// Text centered (both axes) on `(x, y)` in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font: FontSpec, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
