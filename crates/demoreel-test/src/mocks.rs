//! Demo test doubles.

use std::sync::{Arc, Mutex, PoisonError};

use demoreel_core::{Demo, DemoError, DemoResult, Viewport};

/// One recorded call on a demo, keyed by the demo's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `run` was called.
    Run(String),
    /// `stop` was called.
    Stop(String),
}

impl Call {
    /// A `run` on `demo`.
    #[must_use]
    pub fn run(demo: &str) -> Self {
        Self::Run(demo.to_owned())
    }

    /// A `stop` on `demo`.
    #[must_use]
    pub fn stop(demo: &str) -> Self {
        Self::Stop(demo.to_owned())
    }
}

#[derive(Debug, Default)]
struct Entries {
    calls: Vec<Call>,
    viewports: Vec<(String, Viewport)>,
}

/// Ordered log of calls shared by any number of test demos.
///
/// Uses `std::sync::Mutex` so it works from both sync and async tests.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    inner: Arc<Mutex<Entries>>,
}

impl CallLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of `run` calls on `demo`.
    #[must_use]
    pub fn runs_of(&self, demo: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Run(d) if d == demo))
            .count()
    }

    /// Number of `stop` calls on `demo`.
    #[must_use]
    pub fn stops_of(&self, demo: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Stop(d) if d == demo))
            .count()
    }

    /// Viewports `demo` was started with, in order.
    #[must_use]
    pub fn viewports_of(&self, demo: &str) -> Vec<Viewport> {
        self.lock()
            .viewports
            .iter()
            .filter(|(d, _)| d == demo)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.calls.clear();
        entries.viewports.clear();
    }

    fn record_run(&self, demo: &str, viewport: Viewport) {
        let mut entries = self.lock();
        entries.calls.push(Call::run(demo));
        entries.viewports.push((demo.to_owned(), viewport));
    }

    fn record_stop(&self, demo: &str) {
        self.lock().calls.push(Call::stop(demo));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Demo that records every call and always succeeds.
#[derive(Debug, Clone)]
pub struct RecordingDemo {
    label: String,
    log: CallLog,
}

impl RecordingDemo {
    /// Create a demo that records into `log` under `label`.
    #[must_use]
    pub fn new(label: &str, log: &CallLog) -> Self {
        Self {
            label: label.to_owned(),
            log: log.clone(),
        }
    }
}

impl Demo for RecordingDemo {
    fn run(&mut self, viewport: Viewport) -> DemoResult<()> {
        self.log.record_run(&self.label, viewport);
        Ok(())
    }

    fn stop(&mut self) -> DemoResult<()> {
        self.log.record_stop(&self.label);
        Ok(())
    }
}

/// Demo that records every call and fails `run`, `stop`, or both.
#[derive(Debug, Clone)]
pub struct FailingDemo {
    label: String,
    log: CallLog,
    fail_run: bool,
    fail_stop: bool,
}

impl FailingDemo {
    /// A demo whose `run` always fails.
    #[must_use]
    pub fn on_run(label: &str, log: &CallLog) -> Self {
        Self {
            label: label.to_owned(),
            log: log.clone(),
            fail_run: true,
            fail_stop: false,
        }
    }

    /// A demo whose `stop` always fails.
    #[must_use]
    pub fn on_stop(label: &str, log: &CallLog) -> Self {
        Self {
            label: label.to_owned(),
            log: log.clone(),
            fail_run: false,
            fail_stop: true,
        }
    }
}

impl Demo for FailingDemo {
    fn run(&mut self, viewport: Viewport) -> DemoResult<()> {
        self.log.record_run(&self.label, viewport);
        if self.fail_run {
            return Err(DemoError::StartFailed {
                demo: self.label.clone(),
                message: "injected run failure".to_owned(),
            });
        }
        Ok(())
    }

    fn stop(&mut self) -> DemoResult<()> {
        self.log.record_stop(&self.label);
        if self.fail_stop {
            return Err(DemoError::StopFailed {
                demo: self.label.clone(),
                message: "injected stop failure".to_owned(),
            });
        }
        Ok(())
    }
}
