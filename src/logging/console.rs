//! Terminal rendering.
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::event::{Kind, message};

const RESET: &str = "\x1b[0m";

/// Formats events as stew's console lines, coloured when the writer
/// supports ANSI escapes.
#[derive(Debug)]
pub(super) struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let line = render(Kind::of(event), &message(event), writer.has_ansi_escapes());
        writeln!(writer, "{line}")
    }
}

/// One console line for `msg`.
pub(super) fn render(kind: Kind, msg: &str, ansi: bool) -> String {
    let paint = |code: &str, text: &str| {
        if ansi {
            format!("\x1b[{code}m{text}{RESET}")
        } else {
            text.to_string()
        }
    };
    match kind {
        Kind::Stage => format!("{} {}", paint("1;34", "==>"), paint("1", msg)),
        Kind::Ok => format!("  {} {msg}", paint("32", "ok")),
        Kind::DryRun => format!("  {} {msg}", paint("33", "[dry run]")),
        Kind::Info => format!("  {msg}"),
        Kind::Debug => format!("  {}", paint("2", msg)),
        Kind::Warn => format!("{} {msg}", paint("33", "warning:")),
        Kind::Error => format!("{} {msg}", paint("31", "error:")),
    }
}
