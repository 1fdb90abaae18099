//! Minimal edited region between two text snapshots.
//!
//! Offsets are UTF-8 byte offsets. The scan walks chars, so every offset lands
//! on a char boundary of its snapshot and the changed substring can always be
//! sliced out of the new text.

use ropey::Rope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffRange {
    /// First differing byte, shared by both snapshots.
    pub start: usize,
    /// End of the replaced region in the old snapshot.
    pub old_end: usize,
    /// End of the replacement in the new snapshot.
    pub new_end: usize,
}

impl DiffRange {
    pub fn removed_len(&self) -> usize {
        self.old_end.saturating_sub(self.start)
    }

    pub fn inserted_len(&self) -> usize {
        self.new_end.saturating_sub(self.start)
    }

    /// The slice `new[start..new_end]` handed to an incremental parse.
    pub fn inserted_text(&self, new: &Rope) -> String {
        let start = new.byte_to_char(self.start);
        let end = new.byte_to_char(self.new_end);
        new.slice(start..end).to_string()
    }
}

/// Returns `None` iff both snapshots hold identical text.
pub fn diff_range(old: &Rope, new: &Rope) -> Option<DiffRange> {
    let old_chars = old.len_chars();
    let new_chars = new.len_chars();

    let start = old
        .chars()
        .zip(new.chars())
        .take_while(|(a, b)| a == b)
        .count();

    if old_chars == new_chars && start == old_chars {
        return None;
    }

    // Suffix trim stops at `start` so it never overlaps the shared prefix.
    let mut old_end = old_chars;
    let mut new_end = new_chars;
    let mut old_rev = old.chars_at(old_chars);
    let mut new_rev = new.chars_at(new_chars);
    while old_end > start && new_end > start {
        match (old_rev.prev(), new_rev.prev()) {
            (Some(a), Some(b)) if a == b => {
                old_end -= 1;
                new_end -= 1;
            }
            _ => break,
        }
    }

    Some(DiffRange {
        start: old.char_to_byte(start),
        old_end: old.char_to_byte(old_end),
        new_end: new.char_to_byte(new_end),
    })
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/highlight/diff.rs"]
mod tests;
