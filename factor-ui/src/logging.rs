//! Process-wide tracing setup.
//!
//! One registry with three pieces:
//!
//! 1. a reloadable global [`EnvFilter`], the ceiling for every layer;
//! 2. a console layer on stdout that can be muted while a full-screen UI
//!    owns the terminal;
//! 3. a file layer that discards records until [`enable_file_logging`]
//!    points it at a file.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

/// Filter used when neither `RUST_LOG` nor the configuration sets one.
pub const DEFAULT_DIRECTIVE: &str = "warn";

// --- Formatter ---

/// `<local time> <LEVEL> <file:line> <fields>`, colored on a terminal.
struct LocalFmt;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        let location = meta
            .file()
            .zip(meta.line())
            .map(|(file, line)| format!("{}:{line}", file.trim_start_matches("src/")));

        if writer.has_ansi_escapes() {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
            write!(writer, "{}{:>5}\x1b[0m ", level_color(*meta.level()), meta.level())?;
            if let Some(location) = location {
                write!(writer, "\x1b[36m{location}\x1b[0m ")?;
            }
        } else {
            write!(writer, "{timestamp} {:>5} ", meta.level())?;
            if let Some(location) = location {
                write!(writer, "{location} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

/// Writer target that starts empty and can be given a file later.
#[derive(Clone, Default)]
struct FileSlot(Arc<Mutex<Option<File>>>);

impl FileSlot {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(
        &self,
        file: File,
    ) {
        *self.lock() = Some(file);
    }
}

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.lock())
    }
}

// --- Handles ---

type SetFilterFn = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

static LEVEL_HANDLE: OnceLock<SetFilterFn> = OnceLock::new();
static CONSOLE_HANDLE: OnceLock<SetFilterFn> = OnceLock::new();
static FILE_SLOT: OnceLock<FileSlot> = OnceLock::new();

fn store_handle<S>(
    cell: &OnceLock<SetFilterFn>,
    handle: reload::Handle<EnvFilter, S>,
) where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = cell.set(Box::new(move |filter: EnvFilter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("filter reload failed: {e}"))
    }));
}

/// Parses a bare level (`"debug"`) or a full `EnvFilter` directive.
pub fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

// --- Public API ---

/// Installs the global subscriber. Later calls are no-ops.
///
/// The filter starts from `RUST_LOG`, or [`DEFAULT_DIRECTIVE`] when it is
/// unset or invalid. Use [`set_log_level`] to apply a configured level.
pub fn init_logging() {
    let slot = FileSlot::default();
    let _ = FILE_SLOT.set(slot.clone());

    let global =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let (level_filter, level_handle) = reload::Layer::new(global);
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(slot);

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_handle(&LEVEL_HANDLE, level_handle);
        store_handle(&CONSOLE_HANDLE, console_handle);
    }
}

/// Replaces the global filter at runtime.
pub fn set_log_level(directive: &str) -> Result<()> {
    let filter = parse_filter(directive)?;
    match LEVEL_HANDLE.get() {
        Some(set) => set(filter),
        None => bail!("logging not yet initialized"),
    }
}

/// Mutes or unmutes the console layer. File logging is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    let filter = EnvFilter::new(if enabled { "trace" } else { "off" });
    match CONSOLE_HANDLE.get() {
        Some(set) => set(filter),
        None => bail!("logging not yet initialized"),
    }
}

/// Appends log records to `path`, replacing any file already open.
///
/// The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    match FILE_SLOT.get() {
        Some(slot) => {
            slot.replace(file);
            Ok(())
        }
        None => bail!("logging not yet initialized"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_filter_accepts_levels_and_directives() {
        for directive in ["warn", "debug", "factor_core=trace,info"] {
            assert!(parse_filter(directive).is_ok(), "{directive}");
        }
    }

    #[test]
    fn file_slot_discards_until_a_file_is_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factor.log");
        let slot = FileSlot::default();

        slot.make_writer().write_all(b"dropped\n").unwrap();
        slot.replace(open_log_file(&path).unwrap());
        slot.make_writer().write_all(b"kept\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn open_log_file_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("factor.log");

        let error = open_log_file(&path).unwrap_err();

        assert!(error.to_string().starts_with("cannot open log file"));
    }
}
