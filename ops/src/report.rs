use log::{info, warn};

/// The kind of progress line being reported.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mark {
    /// An action is about to be attempted.
    Start,
    /// A resource found by a listing.
    Item,
    /// The provider confirmed an action.
    Done,
    /// Nothing needed to be done.
    Skip,
    /// Something failed but the run continues.
    Warn,
}

/// Where operator-facing progress lines go. The operations only talk to this trait so that a
/// run can be observed in tests, or routed to the log instead of stdout.
pub trait Reporter: Send + Sync {
    fn report(&self, mark: Mark, message: &str);

    fn start(&self, message: &str) {
        self.report(Mark::Start, message)
    }

    fn item(&self, message: &str) {
        self.report(Mark::Item, message)
    }

    fn done(&self, message: &str) {
        self.report(Mark::Done, message)
    }

    fn skip(&self, message: &str) {
        self.report(Mark::Skip, message)
    }

    fn warn(&self, message: &str) {
        self.report(Mark::Warn, message)
    }
}

/// Prints progress lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Reporter for Console {
    fn report(&self, mark: Mark, message: &str) {
        match mark {
            Mark::Start => println!("{}", message),
            Mark::Item => println!("  -> {}", message),
            Mark::Done => println!("[ok] {}", message),
            Mark::Skip => println!("[skip] {}", message),
            Mark::Warn => println!("[warn] {}", message),
        }
    }
}

/// Sends progress lines to the log, leaving stdout for machine-readable output.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, mark: Mark, message: &str) {
        match mark {
            Mark::Warn => warn!("{}", message),
            _ => info!("{}", message),
        }
    }
}
