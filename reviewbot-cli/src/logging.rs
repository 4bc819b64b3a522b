//! Tracing output in the workflow command format
//!
//! Debug lines become `::debug::` commands, which the runner only shows in
//! debug mode, and warnings become `::warning::` annotations. Info lines are
//! printed as plain text.

use std::fmt;

use reviewbot_core::runtime::escape_data;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter emitting workflow commands
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionsFormat;

impl<S, N> FormatEvent<S, N> for ActionsFormat
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
        let mut fields = String::new();
        ctx.format_fields(Writer::new(&mut fields), event)?;

        match *event.metadata().level() {
            Level::TRACE | Level::DEBUG => writeln!(writer, "::debug::{}", escape_data(&fields)),
            Level::WARN => writeln!(writer, "::warning::{}", escape_data(&fields)),
            Level::ERROR => writeln!(writer, "::error::{}", escape_data(&fields)),
            _ => writeln!(writer, "{}", fields),
        }
    }
}
