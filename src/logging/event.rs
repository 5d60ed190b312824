//! Sorting tracing events into the kinds of line stew prints.
use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level};

/// Target for section headers.
pub(super) const STAGE_TARGET: &str = "stew::stage";
/// Target for passed checks and finished steps.
pub(super) const OK_TARGET: &str = "stew::ok";
/// Target for actions held back by `--dry-run`.
pub(super) const DRY_RUN_TARGET: &str = "stew::dry_run";

/// What a line means, independent of where it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Kind {
    Stage,
    Ok,
    DryRun,
    Info,
    Debug,
    Warn,
    Error,
}

impl Kind {
    pub(super) fn of(event: &Event<'_>) -> Self {
        let meta = event.metadata();
        Self::from_parts(*meta.level(), meta.target())
    }

    pub(super) fn from_parts(level: Level, target: &str) -> Self {
        if level == Level::ERROR {
            Self::Error
        } else if level == Level::WARN {
            Self::Warn
        } else if level == Level::INFO {
            match target {
                STAGE_TARGET => Self::Stage,
                OK_TARGET => Self::Ok,
                DRY_RUN_TARGET => Self::DryRun,
                _ => Self::Info,
            }
        } else {
            Self::Debug
        }
    }

    /// Uncoloured tag written in front of the message in the log file.
    pub(super) const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "==>",
            Self::Ok => "ok",
            Self::DryRun => "dry-run",
            Self::Info => "",
            Self::Debug => "debug",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The formatted `message` field of `event`.
pub(super) fn message(event: &Event<'_>) -> String {
    struct Message(String);

    impl Visit for Message {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                value.clone_into(&mut self.0);
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    let mut visitor = Message(String::new());
    event.record(&mut visitor);
    visitor.0
}
