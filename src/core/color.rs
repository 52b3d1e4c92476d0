use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Parses `#RRGGBB` or the `#RGB` shorthand; the leading `#` is optional.
    pub fn from_hex_string(hex: &str) -> anyhow::Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color: {}", hex);
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => anyhow::bail!("Invalid hex color: {}", hex),
        };
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|e| anyhow::anyhow!("Invalid hex color {}: {}", hex, e))?;
        Ok(Color {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance in sRGB space, in `[0, 1]`.
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let s = channel as f64 / 255.0;
            if s <= 0.03928 {
                s / 12.92
            } else {
                ((s + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Black text on light backgrounds, white on dark ones.
    pub fn readable_text_color(self) -> TextTone {
        if self.relative_luminance() > 0.5 {
            TextTone::Black
        } else {
            TextTone::White
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthand_and_full_hex() {
        let short = Color::from_hex_string("#fff").unwrap();
        let full = Color::from_hex_string("FFFFFF").unwrap();
        assert_eq!(short, full);
        assert_eq!(Color::from_hex_string("#8B5CF6").unwrap().to_hex_string(), "#8B5CF6");
        assert!(Color::from_hex_string("#12345").is_err());
        assert!(Color::from_hex_string("#zzzzzz").is_err());
    }

    #[test]
    fn picks_text_tone_by_luminance() {
        assert_eq!(Color { r: 255, g: 255, b: 255 }.readable_text_color(), TextTone::Black);
        assert_eq!(Color { r: 0, g: 0, b: 0 }.readable_text_color(), TextTone::White);
    }

    #[test]
    fn clamps_alpha() {
        let c = Color::from_hex_string("#06B6D4").unwrap();
        assert_eq!(c.with_alpha(2.0).a, 1.0);
        assert_eq!(c.with_alpha(-1.0).a, 0.0);
        assert_eq!(c.with_alpha(0.25).to_string(), "rgba(6, 182, 212, 0.25)");
    }
}
