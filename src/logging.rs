// Logging setup.
// Failures go to an append-only log file, stderr output is opt-in via RUST_LOG.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter, format::Writer},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Formats events as `<timestamp>: <message>`.
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{}: ", Local::now().to_rfc3339())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Opens the log file in append mode only when an event is written.
pub struct AppendOnWrite {
    path: PathBuf,
}

impl AppendOnWrite {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl<'a> MakeWriter<'a> for AppendOnWrite {
    type Writer = LazyFile<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LazyFile {
            path: &self.path,
            file: None,
        }
    }
}

/// Writer for a single event.
pub struct LazyFile<'a> {
    path: &'a Path,
    file: Option<File>,
}

impl io::Write for LazyFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(self.path)?,
        };
        self.file.insert(file).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Layer appending warnings and errors to `path`.
/// Write failures are dropped so logging never stops the pick.
pub fn file_layer<S>(path: &Path) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(AppendOnWrite::new(path))
        .event_format(LogLineFormat)
        .log_internal_errors(false)
        .with_filter(LevelFilter::WARN)
}

/// Install the global subscriber.
pub fn init(log_path: Option<&Path>) {
    let file_layer = log_path.map(|path| file_layer(path));

    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(stderr_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();
}
