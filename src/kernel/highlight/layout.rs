//! Line-boundary lookup used to turn a pixel window into a byte range.

use ropey::Rope;

/// Read-only view of a laid-out text, in the renderer's vertical units.
pub trait LineLayout: Send + Sync {
    fn line_count(&self) -> usize;

    /// Line under vertical position `y`, clamped to the laid-out lines.
    fn line_for_vertical_position(&self, y: f32) -> usize;

    /// Byte offset of the first char of `line`.
    fn line_start(&self, line: usize) -> usize;

    /// Byte offset one past the last char of `line`, including its line break.
    fn line_end(&self, line: usize) -> usize;
}

/// Fixed-height lines over a snapshot, for headless callers.
#[derive(Debug, Clone)]
pub struct MonospaceLayout {
    line_height: f32,
    line_starts: Vec<usize>,
    len_bytes: usize,
}

impl MonospaceLayout {
    pub fn new(rope: &Rope, line_height: f32) -> Self {
        let line_height = if line_height.is_finite() && line_height > 0.0 {
            line_height
        } else {
            1.0
        };
        let total_lines = rope.len_lines().max(1);
        let line_starts = (0..total_lines).map(|line| rope.line_to_byte(line)).collect();
        Self {
            line_height,
            line_starts,
            len_bytes: rope.len_bytes(),
        }
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn content_height(&self) -> f32 {
        self.line_starts.len() as f32 * self.line_height
    }
}

impl LineLayout for MonospaceLayout {
    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_for_vertical_position(&self, y: f32) -> usize {
        let last = self.line_starts.len().saturating_sub(1);
        if !(y > 0.0) {
            return 0;
        }
        let line = (y / self.line_height).floor();
        if line >= last as f32 {
            last
        } else {
            line as usize
        }
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.len_bytes)
    }

    fn line_end(&self, line: usize) -> usize {
        self.line_starts
            .get(line.saturating_add(1))
            .copied()
            .unwrap_or(self.len_bytes)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/highlight/layout.rs"]
mod tests;
