use super::*;
use tree_sitter::Parser;

/// Kind assigned to the smallest named node starting at `needle`.
fn kind_at(
    language: tree_sitter::Language,
    id: LanguageId,
    src: &str,
    needle: &str,
) -> Option<HighlightKind> {
    let mut parser = Parser::new();
    parser.set_language(language).unwrap();
    let tree = parser.parse(src, None).unwrap();
    let rope = Rope::from_str(src);
    let start = src.find(needle).unwrap();
    let node = tree
        .root_node()
        .descendant_for_byte_range(start, start + needle.len())
        .unwrap();
    classify_node(id, node, &rope)
}

#[test]
fn tokens_split_into_keywords_and_operators() {
    assert_eq!(classify_token("fn"), Some(HighlightKind::Keyword));
    assert_eq!(classify_token("else_if"), Some(HighlightKind::Keyword));
    assert_eq!(classify_token("+="), Some(HighlightKind::Operator));
    assert_eq!(classify_token("=>"), Some(HighlightKind::Operator));
    assert_eq!(classify_token("("), None);
    assert_eq!(classify_token(";"), None);
    assert_eq!(classify_token(""), None);
}

#[test]
fn rust_identifiers_use_their_parent_field() {
    let rust = tree_sitter_rust::language();
    let src = "const MAX: u32 = 3;\nfn run(n: u32) { let v = Vec::new(); v.len(); }\n";

    assert_eq!(kind_at(rust, LanguageId::Rust, src, "MAX"), Some(HighlightKind::Constant));
    assert_eq!(kind_at(rust, LanguageId::Rust, src, "run"), Some(HighlightKind::Function));
    assert_eq!(kind_at(rust, LanguageId::Rust, src, "u32"), Some(HighlightKind::Type));
    assert_eq!(kind_at(rust, LanguageId::Rust, src, "new"), Some(HighlightKind::Function));
    assert_eq!(kind_at(rust, LanguageId::Rust, src, "len"), Some(HighlightKind::Function));
    assert_eq!(kind_at(rust, LanguageId::Rust, src, "v"), Some(HighlightKind::Variable));
}

#[test]
fn json_keys_are_properties() {
    let json = tree_sitter_json::language();
    let src = r#"{"name": "x", "n": 1, "ok": true}"#;

    assert_eq!(kind_at(json, LanguageId::Json, src, r#""name""#), Some(HighlightKind::Property));
    assert_eq!(kind_at(json, LanguageId::Json, src, r#""x""#), Some(HighlightKind::String));
    assert_eq!(kind_at(json, LanguageId::Json, src, "1"), Some(HighlightKind::Number));
    assert_eq!(kind_at(json, LanguageId::Json, src, "true"), Some(HighlightKind::Keyword));
}

#[test]
fn javascript_calls_and_members() {
    let js = tree_sitter_javascript::language();
    let src = "function go(a) { console.log(a.size); }";

    assert_eq!(kind_at(js, LanguageId::JavaScript, src, "go"), Some(HighlightKind::Function));
    assert_eq!(kind_at(js, LanguageId::JavaScript, src, "log"), Some(HighlightKind::Function));
    assert_eq!(kind_at(js, LanguageId::JavaScript, src, "size"), Some(HighlightKind::Property));
}
