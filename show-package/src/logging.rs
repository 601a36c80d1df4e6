use crate::config::LogLevel;
use crate::util::RunStamp;
use chrono::Local;
use std::fmt;
use std::fs::File;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// `[<timestamp> <target>.<span>(<LEVEL>)]: <message>`
pub struct RunLogFormat;

impl<S, N> FormatEvent<S, N> for RunLogFormat
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
        let meta = event.metadata();
        let method = ctx.lookup_current().map(|span| span.name()).unwrap_or("-");
        write!(
            writer,
            "[{} {}.{}({})]: ",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            meta.target(),
            method,
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Subscriber writing run log lines to `writer` only.
pub fn run_subscriber<W>(writer: W, level: LogLevel) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.directive()))
        .with_writer(writer)
        .with_ansi(false)
        .event_format(RunLogFormat)
        .finish()
}

pub fn log_file_path(staging_dir: &Path, stamp: &RunStamp) -> PathBuf {
    staging_dir.join(stamp.log_name())
}

/// Colour only for an interactive stderr, and never when `NO_COLOR` is set.
pub fn stderr_color(is_terminal: bool) -> bool {
    is_terminal && std::env::var_os("NO_COLOR").is_none()
}

/// Sends the process log to a file in the staging directory. A log file that
/// cannot be created only costs the file sink: the run continues logging to
/// stderr and `None` is returned.
pub fn configure(
    staging_dir: &Path,
    stamp: &RunStamp,
    level: LogLevel,
    debug_summary: &str,
) -> Option<PathBuf> {
    let path = log_file_path(staging_dir, stamp);
    eprintln!("Log file location: {}", path.display());
    let installed = match File::create(&path) {
        Ok(file) => {
            let ok = tracing::subscriber::set_global_default(run_subscriber(Mutex::new(file), level))
                .is_ok();
            ok.then(|| path)
        }
        Err(e) => {
            eprintln!("Failed to create log file '{}': {}", path.display(), e);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(level.directive()))
                .with_writer(std::io::stderr)
                .with_ansi(stderr_color(std::io::stderr().is_terminal()))
                .try_init();
            None
        }
    };
    debug!("The parameters that were received: {}", debug_summary);
    installed
}
