//! Text/language events -> full style-span set.
//!
//! Every notification bumps an epoch and carries it to a single worker task.
//! The worker drains its queue, coalesces what it drained into one cycle and
//! runs the parser on a blocking thread. A cycle publishes only while its
//! epoch is still the newest one, so a slow parse can never overwrite the
//! result of a later edit.

use super::diff::diff_range;
use super::style::{to_style_spans, StylePalette, StyleSpan};
use crate::kernel::language::LanguageId;
use crate::kernel::services::ports::{Highlight, HighlightParser, ParserError};
use ropey::Rope;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug)]
enum EventKind {
    Activate { text: Rope, language: LanguageId },
    Text(Rope),
    Language(LanguageId),
}

#[derive(Debug)]
struct PipelineEvent {
    epoch: u64,
    kind: EventKind,
}

/// Owner-side handle. Dropping it stops the worker once its current cycle ends.
pub struct HighlightPipeline {
    epoch: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<PipelineEvent>,
    spans_rx: watch::Receiver<Arc<[StyleSpan]>>,
    last_text: Rope,
    language: LanguageId,
    _worker: JoinHandle<()>,
}

impl HighlightPipeline {
    /// Starts the worker and queues the initial full parse of `text`.
    pub fn spawn<P: HighlightParser>(
        handle: &tokio::runtime::Handle,
        parser: P,
        palette: StylePalette,
        language: LanguageId,
        text: Rope,
    ) -> Self {
        let epoch = Arc::new(AtomicU64::new(0));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let empty: Arc<[StyleSpan]> = Arc::from(Vec::new());
        let (spans_tx, spans_rx) = watch::channel(empty);

        let worker = Worker {
            parser: Arc::new(Mutex::new(parser)),
            palette: Arc::new(palette),
            epoch: Arc::clone(&epoch),
            events: events_rx,
            spans_tx,
            current: Rope::new(),
            pending_language: None,
            synced: None,
            revision: 0,
            published_revision: 0,
        };
        let worker = handle.spawn(worker.run());

        let mut pipeline = Self {
            epoch,
            events: events_tx,
            spans_rx,
            last_text: text.clone(),
            language,
            _worker: worker,
        };
        pipeline.send(EventKind::Activate { text, language });
        pipeline
    }

    /// Returns `false` when `text` equals the last observed snapshot; no cycle is queued then.
    pub fn text_changed(&mut self, text: Rope) -> bool {
        if text == self.last_text {
            tracing::trace!("text unchanged, skipping highlight");
            return false;
        }
        self.last_text = text.clone();
        self.send(EventKind::Text(text));
        true
    }

    /// Always forces a full reparse, even for the current language.
    pub fn language_changed(&mut self, language: LanguageId) {
        self.language = language;
        self.send(EventKind::Language(language));
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<[StyleSpan]>> {
        self.spans_rx.clone()
    }

    pub fn style_spans(&self) -> Arc<[StyleSpan]> {
        self.spans_rx.borrow().clone()
    }

    fn send(&mut self, kind: EventKind) {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        if self.events.send(PipelineEvent { epoch, kind }).is_err() {
            tracing::error!(epoch, "highlight worker is gone, event dropped");
        }
    }
}

/// Text the parser last consumed, with the spans computed for it.
struct Synced {
    text: Rope,
    spans: Arc<[StyleSpan]>,
    revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseMode {
    Full,
    Incremental,
}

enum ParseOutcome {
    Unchanged,
    Parsed {
        highlights: Vec<Highlight>,
        mode: ParseMode,
    },
}

struct Worker<P> {
    parser: Arc<Mutex<P>>,
    palette: Arc<StylePalette>,
    epoch: Arc<AtomicU64>,
    events: mpsc::UnboundedReceiver<PipelineEvent>,
    spans_tx: watch::Sender<Arc<[StyleSpan]>>,
    current: Rope,
    pending_language: Option<LanguageId>,
    /// `None` forces the next cycle to reparse everything.
    synced: Option<Synced>,
    revision: u64,
    published_revision: u64,
}

impl<P: HighlightParser> Worker<P> {
    async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            let mut cycle_epoch = self.absorb(event);
            while let Ok(event) = self.events.try_recv() {
                cycle_epoch = self.absorb(event);
            }
            self.run_cycle(cycle_epoch).await;
        }
        tracing::debug!("highlight pipeline stopped");
    }

    fn absorb(&mut self, event: PipelineEvent) -> u64 {
        match event.kind {
            EventKind::Activate { text, language } => {
                self.current = text;
                self.pending_language = Some(language);
            }
            EventKind::Text(text) => self.current = text,
            EventKind::Language(language) => self.pending_language = Some(language),
        }
        event.epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::Acquire) == epoch
    }

    async fn run_cycle(&mut self, epoch: u64) {
        if !self.is_current(epoch) {
            tracing::trace!(epoch, "cycle superseded before parsing");
            return;
        }

        let language = self.pending_language;
        let text = self.current.clone();
        let previous = self.synced.as_ref().map(|synced| synced.text.clone());
        let parser = Arc::clone(&self.parser);

        let joined = tokio::task::spawn_blocking({
            let text = text.clone();
            move || parse_cycle(&parser, language, previous.as_ref(), &text)
        })
        .await;

        let outcome = match joined {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                tracing::warn!(epoch, error = %err, "highlight cycle failed, keeping last spans");
                if language.is_some() && matches!(err, ParserError::Language(_)) {
                    self.pending_language = None;
                }
                self.synced = None;
                return;
            }
            Err(err) => {
                tracing::error!(epoch, error = %err, "highlight cycle panicked, keeping last spans");
                self.synced = None;
                return;
            }
        };

        match outcome {
            ParseOutcome::Unchanged => {
                tracing::trace!(epoch, "no diff against parsed text");
            }
            ParseOutcome::Parsed { highlights, mode } => {
                if mode == ParseMode::Full {
                    self.pending_language = None;
                }
                let spans: Arc<[StyleSpan]> =
                    to_style_spans(&highlights, |kind| self.palette.style_for(kind)).into();
                self.revision += 1;
                tracing::debug!(
                    epoch,
                    mode = ?mode,
                    spans = spans.len(),
                    bytes = text.len_bytes(),
                    "highlight cycle parsed"
                );
                self.synced = Some(Synced {
                    text,
                    spans,
                    revision: self.revision,
                });
            }
        }

        self.publish(epoch);
    }

    fn publish(&mut self, epoch: u64) {
        let Some(synced) = self.synced.as_ref() else {
            return;
        };
        if synced.revision == self.published_revision {
            return;
        }
        if !self.is_current(epoch) {
            tracing::debug!(epoch, "discarding superseded highlight result");
            return;
        }
        self.spans_tx.send_replace(Arc::clone(&synced.spans));
        self.published_revision = synced.revision;
    }
}

fn parse_cycle<P: HighlightParser>(
    parser: &Mutex<P>,
    language: Option<LanguageId>,
    previous: Option<&Rope>,
    text: &Rope,
) -> Result<ParseOutcome, ParserError> {
    let mut parser = parser.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("parser lock poisoned by an earlier panic, reusing it");
        poisoned.into_inner()
    });

    if let Some(language) = language {
        parser.set_language(language)?;
        return parse_full(&mut *parser, text);
    }

    let Some(previous) = previous else {
        return parse_full(&mut *parser, text);
    };

    let Some(diff) = diff_range(previous, text) else {
        return Ok(ParseOutcome::Unchanged);
    };

    let changed = diff.inserted_text(text);
    let text_len = text.len_bytes();
    tracing::trace!(
        start = diff.start,
        removed = diff.removed_len(),
        inserted = diff.inserted_len(),
        "incremental parse"
    );
    match parser.parse_incremental(&changed, diff) {
        Ok(highlights) => {
            if let Some(bad) = highlights.iter().find(|h| !h.fits(text_len)) {
                tracing::warn!(
                    start = bad.start,
                    end = bad.end,
                    text_len,
                    "incremental parse returned out-of-range highlight, reparsing"
                );
                return parse_full(&mut *parser, text);
            }
            Ok(ParseOutcome::Parsed {
                highlights,
                mode: ParseMode::Incremental,
            })
        }
        Err(ParserError::InvalidDiffState(reason)) => {
            tracing::warn!(%reason, "incremental parse rejected the diff, reparsing");
            parse_full(&mut *parser, text)
        }
        Err(err) => Err(err),
    }
}

fn parse_full<P: HighlightParser + ?Sized>(
    parser: &mut P,
    text: &Rope,
) -> Result<ParseOutcome, ParserError> {
    let highlights = parser.parse_full(text)?;
    let text_len = text.len_bytes();
    if highlights.iter().any(|h| !h.fits(text_len)) {
        return Err(ParserError::InvalidDiffState(
            "full parse returned out-of-range highlight".to_string(),
        ));
    }
    Ok(ParseOutcome::Parsed {
        highlights,
        mode: ParseMode::Full,
    })
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/highlight/pipeline.rs"]
mod tests;
