use super::*;
use ropey::Rope;

fn diff(old: &str, new: &str) -> Option<DiffRange> {
    diff_range(&Rope::from_str(old), &Rope::from_str(new))
}

const PAIRS: &[(&str, &str)] = &[
    ("helloworld", "helloXXworld"),
    ("helloXXworld", "helloworld"),
    ("", "fn main() {}"),
    ("fn main() {}", ""),
    ("aaa", "aaaa"),
    ("aaaa", "aaa"),
    ("abcabc", "abc"),
    ("let x = 1;\n", "let y = 1;\n"),
    ("abc", "xyz"),
    ("abc", "abcdef"),
    ("def", "abcdef"),
    ("caf\u{e9}", "caf\u{e8}"),
    ("a\u{1F600}b", "a\u{1F601}b"),
    ("\u{4F60}\u{597D}", "\u{4F60}x\u{597D}"),
    ("fn a() {\n    b();\n}\n", "fn a() {\n    b();\n    c();\n}\n"),
];

#[test]
fn insertion_inside_word_is_located_exactly() {
    assert_eq!(
        diff("helloworld", "helloXXworld"),
        Some(DiffRange {
            start: 5,
            old_end: 5,
            new_end: 7,
        })
    );
}

#[test]
fn identical_snapshots_have_no_diff() {
    assert_eq!(diff("abc", "abc"), None);
    assert_eq!(diff("", ""), None);
    assert_eq!(diff("caf\u{e9}\n", "caf\u{e9}\n"), None);
}

#[test]
fn empty_transitions_start_at_zero() {
    let range = diff("", "xyz").unwrap();
    assert_eq!((range.start, range.old_end, range.new_end), (0, 0, 3));

    let range = diff("xyz", "").unwrap();
    assert_eq!((range.start, range.old_end, range.new_end), (0, 3, 0));
}

#[test]
fn deletion_reports_removed_region() {
    let range = diff("helloXXworld", "helloworld").unwrap();
    assert_eq!((range.start, range.old_end, range.new_end), (5, 7, 5));
    assert_eq!(range.removed_len(), 2);
    assert_eq!(range.inserted_len(), 0);
}

#[test]
fn suffix_trim_never_crosses_the_prefix() {
    // The shared prefix "aaa" already consumed the overlap.
    let range = diff("aaa", "aaaa").unwrap();
    assert_eq!((range.start, range.old_end, range.new_end), (3, 3, 4));

    let range = diff("abcabc", "abc").unwrap();
    assert_eq!((range.start, range.old_end, range.new_end), (3, 6, 3));
}

#[test]
fn multibyte_chars_keep_offsets_on_char_boundaries() {
    let old = "caf\u{e9}";
    let new = "caf\u{e8}";
    let range = diff(old, new).unwrap();
    assert_eq!(range.start, 3);
    assert_eq!(range.old_end, old.len());
    assert_eq!(range.new_end, new.len());
    assert!(old.is_char_boundary(range.start));
    assert_eq!(range.inserted_text(&Rope::from_str(new)), "\u{e8}");
}

#[test]
fn every_pair_yields_a_valid_edit_script() {
    for (old, new) in PAIRS {
        let Some(range) = diff(old, new) else {
            assert_eq!(old, new);
            continue;
        };

        assert!(range.start <= range.old_end && range.old_end <= old.len());
        assert!(range.start <= range.new_end && range.new_end <= new.len());

        let rebuilt = format!(
            "{}{}{}",
            &old[..range.start],
            &new[range.start..range.new_end],
            &old[range.old_end..]
        );
        assert_eq!(&rebuilt, new, "rebuilding {new:?} from {old:?}");

        let rebuilt_old = format!(
            "{}{}{}",
            &old[..range.start],
            &old[range.start..range.old_end],
            &old[range.old_end..]
        );
        assert_eq!(&rebuilt_old, old);

        assert_eq!(
            range.inserted_text(&Rope::from_str(new)),
            &new[range.start..range.new_end]
        );
    }
}

#[test]
fn every_pair_yields_a_minimal_region() {
    for (old, new) in PAIRS {
        let Some(range) = diff(old, new) else {
            continue;
        };

        // Prefix cannot grow: the next chars differ or one side ran out.
        let old_next = old[range.start..].chars().next();
        let new_next = new[range.start..].chars().next();
        assert!(
            old_next.is_none() || new_next.is_none() || old_next != new_next,
            "prefix of {old:?} -> {new:?} could be extended"
        );

        // Suffix cannot grow: the chars before the ends differ or one side hit `start`.
        if range.old_end > range.start && range.new_end > range.start {
            let old_prev = old[range.start..range.old_end].chars().next_back();
            let new_prev = new[range.start..range.new_end].chars().next_back();
            assert_ne!(
                old_prev, new_prev,
                "suffix of {old:?} -> {new:?} could be trimmed"
            );
        }
    }
}
