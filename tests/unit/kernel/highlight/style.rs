use super::*;
use crate::kernel::highlight::HighlightKind;
use crate::kernel::services::ports::{Highlight, SyntaxThemeSettings};

#[test]
fn parse_hex_accepts_with_and_without_hash() {
    assert_eq!(Rgb::parse_hex("#FF8000"), Some(Rgb(0xFF, 0x80, 0x00)));
    assert_eq!(Rgb::parse_hex("0a0b0c"), Some(Rgb(0x0A, 0x0B, 0x0C)));
    assert_eq!(Rgb::parse_hex("#FFF"), None);
    assert_eq!(Rgb::parse_hex("#GG0000"), None);
    assert_eq!(Rgb(0x0A, 0xBC, 0xDE).to_string(), "#0ABCDE");
}

#[test]
fn no_kind_sentinel_maps_to_default_style() {
    let palette = StylePalette::default();
    assert_eq!(palette.style_for(Highlight::NO_KIND), palette.default);
    assert_eq!(palette.style_for(9_999), palette.default);
    assert_ne!(
        palette.style_for(HighlightKind::Keyword.tag()),
        palette.default
    );
}

#[test]
fn theme_overrides_replace_kind_colours() {
    let theme = SyntaxThemeSettings {
        comment: Some("#112233".to_string()),
        default_fg: Some("#010203".to_string()),
        keyword: Some("not-a-colour".to_string()),
        ..Default::default()
    };
    let palette = StylePalette::from_theme(&theme);
    let defaults = StylePalette::default();

    let comment = palette.style_for(HighlightKind::Comment.tag());
    assert_eq!(comment.fg, Rgb(0x11, 0x22, 0x33));
    assert!(comment.italic);
    assert_eq!(palette.default.fg, Rgb(1, 2, 3));
    assert_eq!(
        palette.style_for(HighlightKind::Keyword.tag()),
        defaults.style_for(HighlightKind::Keyword.tag())
    );
}

#[test]
fn to_style_spans_preserves_order_and_offsets() {
    let highlights = vec![
        Highlight::new(10, 20, HighlightKind::String.tag()),
        Highlight::new(0, 5, HighlightKind::Keyword.tag()),
        Highlight::new(5, 5, Highlight::NO_KIND),
    ];
    let palette = StylePalette::default();

    let spans = to_style_spans(&highlights, |kind| palette.style_for(kind));

    assert_eq!(spans.len(), 3);
    assert_eq!((spans[0].start, spans[0].end), (10, 20));
    assert_eq!((spans[1].start, spans[1].end), (0, 5));
    assert_eq!((spans[2].start, spans[2].end), (5, 5));
    assert_eq!(spans[0].style, palette.style_for(HighlightKind::String.tag()));
    assert_eq!(spans[2].style, palette.default);
}

#[test]
fn kind_tags_round_trip() {
    for kind in HighlightKind::ALL {
        assert_eq!(HighlightKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(HighlightKind::from_tag(Highlight::NO_KIND), None);
}
