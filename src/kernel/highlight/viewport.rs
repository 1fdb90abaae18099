//! Visible subset of the published style spans.
//!
//! Span-set and layout changes restyle the viewport immediately; scroll
//! events are debounced so a burst produces one recomputation, always for the
//! last scroll position of the burst.

use super::layout::LineLayout;
use super::style::StyleSpan;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub type SharedLayout = Arc<dyn LineLayout>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportBounds {
    pub scroll_offset: f32,
    pub view_height: f32,
}

/// `[start of first visible line, end of last visible line)`.
pub fn visible_byte_range(bounds: ViewportBounds, layout: &dyn LineLayout) -> Range<usize> {
    let bottom = bounds.scroll_offset + bounds.view_height.max(0.0);
    let first_line = layout.line_for_vertical_position(bounds.scroll_offset);
    let last_line = layout
        .line_for_vertical_position(bottom)
        .max(first_line);

    let start = layout.line_start(first_line);
    let end = layout.line_end(last_line).max(start);
    start..end
}

/// Spans with `start < visible.end && end > visible.start`, in input order.
pub fn filter_visible(spans: &[StyleSpan], visible: Range<usize>) -> Vec<StyleSpan> {
    spans
        .iter()
        .filter(|span| span.start < visible.end && span.end > visible.start)
        .copied()
        .collect()
}

pub struct ViewportFilter {
    scroll_tx: watch::Sender<f32>,
    height_tx: watch::Sender<f32>,
    layout_tx: watch::Sender<Option<SharedLayout>>,
    visible_rx: watch::Receiver<Arc<[StyleSpan]>>,
    task: JoinHandle<()>,
}

impl ViewportFilter {
    /// Spawns the filter task on `handle`, reading full span sets from `spans`.
    pub fn spawn(
        handle: &tokio::runtime::Handle,
        spans: watch::Receiver<Arc<[StyleSpan]>>,
        scroll_debounce: Duration,
    ) -> Self {
        let (scroll_tx, scroll_rx) = watch::channel(0.0f32);
        let (height_tx, height_rx) = watch::channel(0.0f32);
        let (layout_tx, layout_rx) = watch::channel::<Option<SharedLayout>>(None);
        let empty: Arc<[StyleSpan]> = Arc::from(Vec::new());
        let (visible_tx, visible_rx) = watch::channel(empty);

        let task = FilterTask {
            spans,
            scroll: scroll_rx,
            height: height_rx,
            layout: layout_rx,
            visible: visible_tx,
            scroll_debounce,
        };
        let task = handle.spawn(task.run());

        Self {
            scroll_tx,
            height_tx,
            layout_tx,
            visible_rx,
            task,
        }
    }

    pub fn scroll_changed(&self, scroll_offset: f32) {
        self.scroll_tx.send_replace(scroll_offset);
    }

    pub fn view_resized(&self, view_height: f32) {
        self.height_tx.send_replace(view_height);
    }

    /// `None` marks the layout as unavailable; recomputation pauses until a new one arrives.
    pub fn layout_changed(&self, layout: Option<SharedLayout>) {
        self.layout_tx.send_replace(layout);
    }

    pub fn bounds(&self) -> ViewportBounds {
        ViewportBounds {
            scroll_offset: *self.scroll_tx.borrow(),
            view_height: *self.height_tx.borrow(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<[StyleSpan]>> {
        self.visible_rx.clone()
    }

    pub fn visible_spans(&self) -> Arc<[StyleSpan]> {
        self.visible_rx.borrow().clone()
    }
}

impl Drop for ViewportFilter {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct FilterTask {
    spans: watch::Receiver<Arc<[StyleSpan]>>,
    scroll: watch::Receiver<f32>,
    height: watch::Receiver<f32>,
    layout: watch::Receiver<Option<SharedLayout>>,
    visible: watch::Sender<Arc<[StyleSpan]>>,
    scroll_debounce: Duration,
}

impl FilterTask {
    async fn run(mut self) {
        let mut spans_open = true;
        let mut scroll_deadline: Option<Instant> = None;

        self.recompute("start");

        loop {
            tokio::select! {
                changed = self.spans.changed(), if spans_open => {
                    if changed.is_err() {
                        tracing::debug!("span source closed; viewport keeps the last set");
                        spans_open = false;
                        continue;
                    }
                    self.recompute("spans");
                }
                changed = self.layout.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.recompute("layout");
                }
                changed = self.height.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.recompute("resize");
                }
                changed = self.scroll.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    scroll_deadline = Some(Instant::now() + self.scroll_debounce);
                }
                _ = tokio::time::sleep_until(scroll_deadline.unwrap_or_else(Instant::now)),
                    if scroll_deadline.is_some() =>
                {
                    scroll_deadline = None;
                    self.recompute("scroll");
                }
            }
        }

        tracing::debug!("viewport filter stopped");
    }

    fn recompute(&mut self, reason: &'static str) {
        let Some(layout) = self.layout.borrow().clone() else {
            tracing::trace!(reason, "layout unavailable, skipping viewport restyle");
            return;
        };

        let bounds = ViewportBounds {
            scroll_offset: *self.scroll.borrow(),
            view_height: *self.height.borrow(),
        };
        let range = visible_byte_range(bounds, layout.as_ref());
        let spans = self.spans.borrow().clone();
        let visible: Arc<[StyleSpan]> = filter_visible(&spans, range.clone()).into();

        tracing::trace!(
            reason,
            start = range.start,
            end = range.end,
            total = spans.len(),
            visible = visible.len(),
            "viewport restyled"
        );
        self.visible.send_replace(visible);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/highlight/viewport.rs"]
mod tests;
