use crate::kernel::highlight::HighlightKind;
use crate::kernel::language::LanguageId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub highlight: HighlightSettings,
    #[serde(default)]
    pub theme: SyntaxThemeSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    /// Quiet window before a burst of scroll events restyles the viewport.
    pub scroll_debounce_ms: u64,
    pub default_language: LanguageId,
    /// Line height used by the monospace layout, in pixels.
    pub line_height: f32,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: 50,
            default_language: LanguageId::Rust,
            line_height: 16.0,
        }
    }
}

/// Optional `#RRGGBB` colour overrides, one per highlight kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(rename = "macro", skip_serializing_if = "Option::is_none")]
    pub macro_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl SyntaxThemeSettings {
    pub fn override_for(&self, kind: HighlightKind) -> Option<&str> {
        let value = match kind {
            HighlightKind::Comment => &self.comment,
            HighlightKind::String => &self.string,
            HighlightKind::Keyword => &self.keyword,
            HighlightKind::Type => &self.type_name,
            HighlightKind::Number => &self.number,
            HighlightKind::Attribute => &self.attribute,
            HighlightKind::Lifetime => &self.lifetime,
            HighlightKind::Function => &self.function,
            HighlightKind::Macro => &self.macro_name,
            HighlightKind::Variable => &self.variable,
            HighlightKind::Constant => &self.constant,
            HighlightKind::Tag => &self.tag,
            HighlightKind::Property => &self.property,
            HighlightKind::Operator => &self.operator,
        };
        value.as_deref()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
