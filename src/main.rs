use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use ropey::Rope;

use rehighlight::kernel::highlight::{
    HighlightPipeline, MonospaceLayout, StylePalette, StyleSpan, ViewportFilter,
};
use rehighlight::kernel::language::LanguageId;
use rehighlight::kernel::services::adapters::{
    build_runtime, ensure_settings_file, load_settings, TreeSitterParser,
};
use rehighlight::kernel::services::ports::{HighlightParser, Settings};

mod cli;
mod logging;

use cli::{parse_args, CliArgs, USAGE};

const FIRST_RESULT_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n{}", msg, USAGE);
            return ExitCode::from(1);
        }
    };

    let logging = logging::init();
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create default settings file");
    }
    let settings = load_settings().unwrap_or_default();

    let source = match std::fs::read_to_string(&args.path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("cannot read {}: {}", args.path.display(), e);
            return ExitCode::from(1);
        }
    };

    let language = args
        .language
        .or_else(|| LanguageId::from_path(&args.path))
        .unwrap_or(settings.highlight.default_language);
    tracing::info!(path = %args.path.display(), %language, bytes = source.len(), "highlighting file");

    let result = if args.list_kinds {
        list_kinds(language)
    } else {
        highlight_file(&args, &settings, language, &source)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "rehighlight failed");
            eprintln!("{}", e);
            if let Some(guard) = &logging {
                eprintln!("logs: {}", guard.log_dir().display());
            }
            ExitCode::FAILURE
        }
    }
}

fn list_kinds(language: LanguageId) -> Result<(), String> {
    let mut parser = TreeSitterParser::new();
    parser.set_language(language).map_err(|e| e.to_string())?;
    let kinds = parser.list_kinds().map_err(|e| e.to_string())?;

    let mut out = BufWriter::new(io::stdout().lock());
    for kind in kinds {
        writeln!(out, "{}", kind).map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}

fn highlight_file(
    args: &CliArgs,
    settings: &Settings,
    language: LanguageId,
    source: &str,
) -> Result<(), String> {
    let runtime = build_runtime().map_err(|e| format!("cannot start runtime: {}", e))?;
    let visible = runtime.block_on(visible_spans(args, settings, language, source))?;

    let mut out = BufWriter::new(io::stdout().lock());
    for span in visible.iter() {
        write_span(&mut out, span, source).map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}

async fn visible_spans(
    args: &CliArgs,
    settings: &Settings,
    language: LanguageId,
    source: &str,
) -> Result<Arc<[StyleSpan]>, String> {
    let handle = tokio::runtime::Handle::current();
    let text = Rope::from_str(source);

    let pipeline = HighlightPipeline::spawn(
        &handle,
        TreeSitterParser::new(),
        StylePalette::from_theme(&settings.theme),
        language,
        text.clone(),
    );
    let mut spans = pipeline.subscribe();
    tokio::time::timeout(FIRST_RESULT_TIMEOUT, spans.changed())
        .await
        .map_err(|_| format!("no highlight result for {}", language))?
        .map_err(|_| "highlight pipeline stopped".to_string())?;

    let layout = Arc::new(MonospaceLayout::new(&text, settings.highlight.line_height));
    let height = args.height.unwrap_or_else(|| layout.content_height());
    let filter = ViewportFilter::spawn(
        &handle,
        pipeline.subscribe(),
        Duration::from_millis(settings.highlight.scroll_debounce_ms),
    );
    let mut visible = filter.subscribe();
    filter.view_resized(height);
    filter.scroll_changed(args.scroll);
    filter.layout_changed(Some(layout));

    tokio::time::timeout(FIRST_RESULT_TIMEOUT, visible.changed())
        .await
        .map_err(|_| "viewport was never restyled".to_string())?
        .map_err(|_| "viewport filter stopped".to_string())?;

    let bounds = filter.bounds();
    let shown = filter.visible_spans();
    tracing::debug!(
        scroll = bounds.scroll_offset,
        height = bounds.view_height,
        visible = shown.len(),
        "viewport resolved"
    );
    Ok(shown)
}

fn write_span(out: &mut impl Write, span: &StyleSpan, source: &str) -> io::Result<()> {
    let snippet: String = source
        .get(span.start..span.end)
        .unwrap_or_default()
        .chars()
        .take(40)
        .collect();
    let mut flags = String::new();
    if span.style.bold {
        flags.push_str(" bold");
    }
    if span.style.italic {
        flags.push_str(" italic");
    }
    writeln!(
        out,
        "{}..{} {}{} {:?}",
        span.start, span.end, span.style.fg, flags, snippet
    )
}
