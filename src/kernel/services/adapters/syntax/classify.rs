//! Node-kind -> `HighlightKind` classification.
//!
//! Named nodes are classified by kind and, for identifiers, by the field they
//! occupy in their parent. Anonymous nodes are grammar tokens: alphabetic ones
//! are keywords, symbolic ones made of operator characters are operators.

use crate::kernel::highlight::HighlightKind;
use crate::kernel::language::LanguageId;
use ropey::Rope;
use tree_sitter::Node;

pub(super) fn classify_node(
    language: LanguageId,
    node: Node<'_>,
    rope: &Rope,
) -> Option<HighlightKind> {
    if !node.is_named() {
        return classify_token(node.kind());
    }

    let kind = node.kind();
    if let Some(kind) = classify_by_context(language, node, rope) {
        return Some(kind);
    }
    if is_comment_kind(kind) {
        return Some(HighlightKind::Comment);
    }
    if is_string_kind(kind) {
        return Some(HighlightKind::String);
    }
    if kind.contains("integer") || kind.contains("float") || kind.contains("number") {
        return Some(HighlightKind::Number);
    }
    if kind.ends_with("_literal") && (kind.contains("int") || kind.contains("imaginary")) {
        return Some(HighlightKind::Number);
    }
    if is_type_kind(kind) {
        return Some(HighlightKind::Type);
    }
    if matches!(
        kind,
        "attribute_item" | "inner_attribute_item" | "decorator" | "annotation" | "marker_annotation"
    ) {
        return Some(HighlightKind::Attribute);
    }
    if kind == "lifetime" {
        return Some(HighlightKind::Lifetime);
    }
    if matches!(
        kind,
        "true" | "false" | "null" | "nil" | "none" | "self" | "this" | "super" | "crate"
    ) {
        return Some(HighlightKind::Keyword);
    }
    None
}

fn classify_token(kind: &str) -> Option<HighlightKind> {
    if kind.is_empty() {
        return None;
    }
    if kind.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return Some(HighlightKind::Keyword);
    }
    if kind.chars().all(|c| "+-*/%=!<>&|^~?".contains(c)) {
        return Some(HighlightKind::Operator);
    }
    None
}

/// Rules that depend on the language or on the node's position in its parent.
fn classify_by_context(
    language: LanguageId,
    node: Node<'_>,
    rope: &Rope,
) -> Option<HighlightKind> {
    match language {
        LanguageId::Rust => classify_rust(node, rope),
        LanguageId::Html | LanguageId::Xml => classify_markup(node),
        LanguageId::Css => classify_css(node),
        LanguageId::Bash => classify_bash(node),
        LanguageId::Json => classify_json(node),
        LanguageId::Toml => match node.kind() {
            "bare_key" | "quoted_key" | "dotted_key" => Some(HighlightKind::Property),
            _ => None,
        },
        LanguageId::C | LanguageId::Cpp => classify_c_family(node, rope),
        LanguageId::Jsx | LanguageId::Tsx => {
            classify_jsx(node).or_else(|| classify_identifier(node, rope))
        }
        _ => classify_identifier(node, rope),
    }
}

fn classify_rust(node: Node<'_>, rope: &Rope) -> Option<HighlightKind> {
    match node.kind() {
        "macro_invocation" => Some(HighlightKind::Macro),
        "field_identifier" => {
            let parent = node.parent()?;
            if parent.kind() == "field_expression" && is_callee(parent) {
                return Some(HighlightKind::Function);
            }
            Some(HighlightKind::Property)
        }
        "identifier" => {
            let parent = node.parent()?;
            match parent.kind() {
                "const_item" | "static_item" if node_is_field(parent, "name", node) => {
                    Some(HighlightKind::Constant)
                }
                "let_declaration" if node_is_field(parent, "pattern", node) => {
                    Some(HighlightKind::Variable)
                }
                "parameter" | "closure_parameters" => Some(HighlightKind::Variable),
                // `HashMap::new()`: only `new` is the function.
                "scoped_identifier" if node_is_field(parent, "name", node) && is_callee(parent) => {
                    Some(HighlightKind::Function)
                }
                _ => classify_identifier(node, rope),
            }
        }
        _ => None,
    }
}

fn classify_c_family(node: Node<'_>, rope: &Rope) -> Option<HighlightKind> {
    let kind = node.kind();
    if kind.starts_with("preproc_") && kind != "preproc_arg" {
        return Some(HighlightKind::Macro);
    }
    match kind {
        "field_identifier" => Some(HighlightKind::Property),
        "identifier" => {
            let parent = node.parent()?;
            if parent.kind() == "function_declarator" && node_is_field(parent, "declarator", node) {
                return Some(HighlightKind::Function);
            }
            classify_identifier(node, rope)
        }
        _ => None,
    }
}

fn classify_jsx(node: Node<'_>) -> Option<HighlightKind> {
    let parent = node.parent()?;
    match parent.kind() {
        "jsx_opening_element" | "jsx_closing_element" | "jsx_self_closing_element"
            if node_is_field(parent, "name", node) =>
        {
            Some(HighlightKind::Tag)
        }
        "jsx_attribute" if node.kind() == "property_identifier" => Some(HighlightKind::Property),
        _ => None,
    }
}

/// Identifier rules shared by most C-like and scripting grammars.
fn classify_identifier(node: Node<'_>, rope: &Rope) -> Option<HighlightKind> {
    let kind = node.kind();
    if matches!(
        kind,
        "property_identifier" | "shorthand_property_identifier" | "field_identifier"
    ) {
        let parent = node.parent()?;
        if parent.kind() == "member_expression" && is_callee(parent) {
            return Some(HighlightKind::Function);
        }
        return Some(HighlightKind::Property);
    }
    if kind != "identifier" {
        return None;
    }

    let parent = node.parent()?;
    match parent.kind() {
        "function_item"
        | "function_signature_item"
        | "function_declaration"
        | "function_definition"
        | "generator_function_declaration"
        | "method_declaration"
        | "method_definition"
            if node_is_field(parent, "name", node) =>
        {
            Some(HighlightKind::Function)
        }
        "call_expression" | "call" | "method_invocation"
            if node_is_field(parent, "function", node) || node_is_field(parent, "name", node) =>
        {
            Some(HighlightKind::Function)
        }
        "class_declaration" | "class_definition" | "class" if node_is_field(parent, "name", node) => {
            Some(HighlightKind::Type)
        }
        "variable_declarator" if node_is_field(parent, "name", node) => {
            Some(HighlightKind::Variable)
        }
        "formal_parameters" | "parameters" | "parameter_declaration" => {
            Some(HighlightKind::Variable)
        }
        _ if is_constant_name(node, rope) => Some(HighlightKind::Constant),
        _ => None,
    }
}

fn classify_markup(node: Node<'_>) -> Option<HighlightKind> {
    match node.kind() {
        "tag_name" => Some(HighlightKind::Tag),
        "attribute_name" => Some(HighlightKind::Property),
        "attribute_value" | "quoted_attribute_value" | "AttValue" | "PseudoAttValue" => {
            Some(HighlightKind::String)
        }
        "Name" => {
            let parent = node.parent()?;
            match parent.kind() {
                "STag" | "ETag" | "EmptyElemTag" => Some(HighlightKind::Tag),
                "Attribute" | "AttDef" | "PseudoAtt" => Some(HighlightKind::Property),
                _ => None,
            }
        }
        _ => None,
    }
}

fn classify_css(node: Node<'_>) -> Option<HighlightKind> {
    match node.kind() {
        "tag_name" => Some(HighlightKind::Tag),
        "class_name" | "id_name" | "pseudo_class_selector" | "pseudo_element_selector" => {
            Some(HighlightKind::Type)
        }
        "property_name" | "feature_name" => Some(HighlightKind::Property),
        "color_value" | "integer_value" | "float_value" => Some(HighlightKind::Number),
        "at_keyword" | "important" => Some(HighlightKind::Keyword),
        "function_name" => Some(HighlightKind::Function),
        _ => None,
    }
}

fn classify_bash(node: Node<'_>) -> Option<HighlightKind> {
    match node.kind() {
        "command_name" => Some(HighlightKind::Function),
        "variable_name" => Some(HighlightKind::Variable),
        "heredoc_body" => Some(HighlightKind::String),
        _ => None,
    }
}

fn classify_json(node: Node<'_>) -> Option<HighlightKind> {
    let parent = node.parent()?;
    if parent.kind() == "pair" && node_is_field(parent, "key", node) {
        return Some(HighlightKind::Property);
    }
    None
}

/// `node` is the `function` field of a call expression.
fn is_callee(node: Node<'_>) -> bool {
    node.parent().is_some_and(|grand| {
        grand.kind() == "call_expression" && node_is_field(grand, "function", node)
    })
}

/// `MAX_LEN`, `DEFAULT_PORT`: at least two characters, no lowercase letters.
fn is_constant_name(node: Node<'_>, rope: &Rope) -> bool {
    let (start, end) = (node.start_byte(), node.end_byte());
    if end > rope.len_bytes() || end.saturating_sub(start) < 2 {
        return false;
    }
    let text = rope.byte_slice(start..end);
    text.chars().any(|c| c.is_ascii_uppercase())
        && text
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn node_is_field(parent: Node<'_>, field_name: &str, node: Node<'_>) -> bool {
    parent
        .child_by_field_name(field_name)
        .is_some_and(|field| same_node(field, node))
}

fn same_node(left: Node<'_>, right: Node<'_>) -> bool {
    left.start_byte() == right.start_byte() && left.end_byte() == right.end_byte()
}

fn is_comment_kind(kind: &str) -> bool {
    kind.contains("comment")
}

fn is_string_kind(kind: &str) -> bool {
    kind.contains("string")
        || matches!(kind, "char_literal" | "byte_literal" | "character_literal")
}

fn is_type_kind(kind: &str) -> bool {
    matches!(
        kind,
        "type_identifier"
            | "primitive_type"
            | "predefined_type"
            | "builtin_type"
            | "integral_type"
            | "floating_point_type"
            | "boolean_type"
            | "void_type"
            | "sized_type_specifier"
    )
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/syntax/classify.rs"]
mod tests;
