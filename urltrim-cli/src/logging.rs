//! Tracing setup for the CLI.
//!
//! Lines are written as `<timestamp> - <LEVEL> - <message>`, optionally with
//! the event target between level and message. Configuration comes from
//! [`LoggingConfig`]; nothing here runs until `main` asks for it.

use std::fmt;

use anyhow::Context;
use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use urltrim_core::{LoggingConfig, Rotation};

/// Crates whose events the configured level applies to.
const OWN_TARGETS: &[&str] = &["urltrim", "urltrim_core"];

/// `2024-05-01 13:37:00,042`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Event formatter producing `<timestamp> - <LEVEL> - [target - ]<message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat {
    show_target: bool,
}

impl LineFormat {
    pub fn new(show_target: bool) -> Self {
        Self { show_target }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
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
        write!(
            writer,
            "{} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            meta.level()
        )?;
        if self.show_target {
            write!(writer, "{} - ", meta.target())?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build the `EnvFilter`: RUST_LOG (if set) plus `level` for our own crates.
fn env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let level = level.to_ascii_lowercase();
    let mut filter = EnvFilter::from_default_env();
    for target in OWN_TARGETS {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }
    Ok(filter)
}

fn appender_rotation(rotation: Rotation) -> tracing_appender::rolling::Rotation {
    match rotation {
        Rotation::Daily => tracing_appender::rolling::Rotation::DAILY,
        Rotation::Hourly => tracing_appender::rolling::Rotation::HOURLY,
        Rotation::Never => tracing_appender::rolling::Rotation::NEVER,
    }
}

/// Initialize the global tracing subscriber.
///
/// When `config.file` is `Some`, creates a layered subscriber with both
/// stdout and rolling file output. When `None`, logs go to stdout only.
///
/// Returns the non-blocking writer guard that must be held for the process lifetime.
pub fn init_tracing(
    config: &LoggingConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let format = LineFormat::new(config.show_target);

    let Some(ref fc) = config.file else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(&config.level)?)
            .event_format(format)
            .init();
        return Ok(None);
    };

    if let Err(e) = std::fs::create_dir_all(&fc.directory) {
        eprintln!(
            "Warning: Failed to create log directory '{}': {}. Falling back to stdout-only.",
            fc.directory, e
        );
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(&config.level)?)
            .event_format(format)
            .init();
        return Ok(None);
    }

    let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(appender_rotation(fc.rotation))
        .filename_prefix("urltrim")
        .filename_suffix("log")
        .max_log_files(fc.max_files)
        .build(&fc.directory)
        .context("Failed to create rolling file appender")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = tracing_subscriber::fmt::layer().event_format(format);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(non_blocking)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(&config.level)?)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(Some(guard))
}
