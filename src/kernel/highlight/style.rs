//! Kind -> style lookup and the highlight -> style span transform.

use super::kind::HighlightKind;
use crate::kernel::services::ports::{Highlight, SyntaxThemeSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_u32(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Accepts `#RRGGBB` or `RRGGBB`.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let digits = value.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_u32)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Rgb,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub const fn plain(fg: Rgb) -> Self {
        Self {
            fg,
            bold: false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleSpan {
    pub style: Style,
    pub start: usize,
    pub end: usize,
}

const DEFAULT_FG: u32 = 0xD4D4D4;

const DEFAULT_KIND_RGB_HEX: [u32; HighlightKind::COUNT] = [
    0x6A9955, // Comment
    0xCE9178, // String
    0x569CD6, // Keyword
    0x4EC9B0, // Type
    0xB5CEA8, // Number
    0x4EC9B0, // Attribute
    0x569CD6, // Lifetime
    0xDCDCAA, // Function
    0x569CD6, // Macro
    0x9CDCFE, // Variable
    0x4FC1FF, // Constant
    0x569CD6, // Tag
    0x9CDCFE, // Property
    0xD4D4D4, // Operator
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePalette {
    styles: [Style; HighlightKind::COUNT],
    default: Style,
}

impl StylePalette {
    pub fn from_theme(theme: &SyntaxThemeSettings) -> Self {
        let default = Style::plain(resolve_color(
            "default_fg",
            theme.default_fg.as_deref(),
            DEFAULT_FG,
        ));

        let styles = HighlightKind::ALL.map(|kind| {
            let fg = resolve_color(
                kind.name(),
                theme.override_for(kind),
                DEFAULT_KIND_RGB_HEX[kind as usize],
            );
            Style {
                fg,
                bold: matches!(kind, HighlightKind::Keyword),
                italic: matches!(kind, HighlightKind::Comment),
            }
        });

        Self { styles, default }
    }

    /// `NO_KIND` and tags outside the palette resolve to the default style.
    pub fn style_for(&self, kind: u16) -> Style {
        if kind == Highlight::NO_KIND {
            return self.default;
        }
        self.styles
            .get(kind as usize)
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for StylePalette {
    fn default() -> Self {
        Self::from_theme(&SyntaxThemeSettings::default())
    }
}

fn resolve_color(key: &str, value: Option<&str>, fallback: u32) -> Rgb {
    let Some(value) = value else {
        return Rgb::from_u32(fallback);
    };
    match Rgb::parse_hex(value) {
        Some(rgb) => rgb,
        None => {
            tracing::warn!(key, value, "invalid theme colour, using default");
            Rgb::from_u32(fallback)
        }
    }
}

/// Order-preserving 1:1 map from parser highlights to style spans.
pub fn to_style_spans(
    highlights: &[Highlight],
    style_for: impl Fn(u16) -> Style,
) -> Vec<StyleSpan> {
    highlights
        .iter()
        .map(|highlight| StyleSpan {
            style: style_for(highlight.kind),
            start: highlight.start,
            end: highlight.end,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/highlight/style.rs"]
mod tests;
