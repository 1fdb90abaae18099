use std::path::Path;

/// Grammar selector. Switching it invalidates every published highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LanguageId {
    Rust,
    Go,
    Python,
    C,
    Cpp,
    Java,
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Json,
    Yaml,
    Html,
    Xml,
    Css,
    Toml,
    Sql,
    Bash,
}

impl LanguageId {
    pub const ALL: [Self; 18] = [
        Self::Rust,
        Self::Go,
        Self::Python,
        Self::C,
        Self::Cpp,
        Self::Java,
        Self::JavaScript,
        Self::Jsx,
        Self::TypeScript,
        Self::Tsx,
        Self::Json,
        Self::Yaml,
        Self::Html,
        Self::Xml,
        Self::Css,
        Self::Toml,
        Self::Sql,
        Self::Bash,
    ];

    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str())? {
            "rs" => Some(Self::Rust),
            "go" => Some(Self::Go),
            "py" | "pyi" => Some(Self::Python),
            "c" => Some(Self::C),
            "cc" | "cpp" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h++" | "h" => Some(Self::Cpp),
            "java" => Some(Self::Java),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::Jsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "html" | "htm" => Some(Self::Html),
            "xml" | "xsl" | "svg" => Some(Self::Xml),
            "css" => Some(Self::Css),
            "toml" => Some(Self::Toml),
            "sql" => Some(Self::Sql),
            "sh" | "bash" | "zsh" => Some(Self::Bash),
            _ => None,
        }
    }

    /// Case-insensitive lookup by display name or short alias (`rs`, `ts`, `c++`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "rs" => return Some(Self::Rust),
            "py" => return Some(Self::Python),
            "js" => return Some(Self::JavaScript),
            "ts" => return Some(Self::TypeScript),
            "yml" => return Some(Self::Yaml),
            "sh" | "shell" => return Some(Self::Bash),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|language| language.display_name().to_ascii_lowercase() == name)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Python => "Python",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
            Self::Jsx => "JSX",
            Self::TypeScript => "TypeScript",
            Self::Tsx => "TSX",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Html => "HTML",
            Self::Xml => "XML",
            Self::Css => "CSS",
            Self::Toml => "TOML",
            Self::Sql => "SQL",
            Self::Bash => "Bash",
        }
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::Rust
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
