//! Reporting sink handed to library code that emits user-facing diagnostics.
//!
//! Region loading and family reconciliation report through a `Reporter` passed in by the
//! caller instead of writing to a process-wide console object. The command-line front end
//! uses [`LogReporter`], which forwards to the `log` facade.

pub trait Reporter: Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn info(&self, message: &str) {
        log::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Keeps every message so tests can assert on what was reported.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub infos: std::sync::Mutex<Vec<String>>,
    pub warnings: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
