use clusterops::report::{Mark, Reporter};
use std::sync::Mutex;

/// Keeps every progress line so tests can check what the operator would have seen.
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    lines: Mutex<Vec<(Mark, String)>>,
}

impl RecordingReporter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lines(&self) -> Vec<(Mark, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn with_mark(&self, mark: Mark) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(recorded, _)| *recorded == mark)
            .map(|(_, message)| message)
            .collect()
    }

    pub(crate) fn contains(&self, mark: Mark, message: &str) -> bool {
        self.with_mark(mark).iter().any(|line| line == message)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, mark: Mark, message: &str) {
        self.lines.lock().unwrap().push((mark, message.to_string()));
    }
}
