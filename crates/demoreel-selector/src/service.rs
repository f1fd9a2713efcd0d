//! Selector service.
//!
//! A single task owns the [`DemoSelector`] and applies commands one at a
//! time, in the order they arrive. Frontends talk to it through a cloneable
//! [`SelectorHandle`]. When the last handle is dropped the task stops the
//! active demo and hands the selector back through its [`JoinHandle`].
//!
//! [`Demo`](demoreel_core::Demo) calls are synchronous and may block (a
//! process demo waits for its child to exit). On a multi-threaded runtime
//! they run under [`tokio::task::block_in_place`] so other tasks keep being
//! polled. On a current-thread runtime they block the runtime.

use serde::Serialize;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use demoreel_core::DemoName;

use crate::error::{SelectorError, SelectorResult};
use crate::selector::{DemoSelector, SelectOption, SelectorState, Transition};

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 16;

/// Point-in-time view of the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorSnapshot {
    /// Current state.
    pub state: SelectorState,
    /// Options in display order.
    pub options: Vec<SelectOption>,
}

impl SelectorSnapshot {
    /// The active demo, if any.
    #[must_use]
    pub fn active(&self) -> Option<&DemoName> {
        match &self.state {
            SelectorState::Active(name) => Some(name),
            SelectorState::Idle => None,
        }
    }
}

enum Command {
    Select {
        name: DemoName,
        reply: oneshot::Sender<SelectorResult<Transition>>,
    },
    Snapshot {
        reply: oneshot::Sender<SelectorSnapshot>,
    },
    Shutdown {
        reply: oneshot::Sender<SelectorResult<()>>,
    },
}

/// Handle for sending selection changes to the selector task.
#[derive(Debug, Clone)]
pub struct SelectorHandle {
    tx: mpsc::Sender<Command>,
}

impl SelectorHandle {
    /// Request a switch to `name` and wait for it to be applied.
    ///
    /// # Errors
    ///
    /// Returns the selector's error for this change, or
    /// [`SelectorError::ServiceClosed`] if the task is gone.
    pub async fn select(&self, name: DemoName) -> SelectorResult<Transition> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Select { name, reply }).await?;
        rx.await.map_err(|_| SelectorError::ServiceClosed)?
    }

    /// Current state and options.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::ServiceClosed`] if the task is gone.
    pub async fn snapshot(&self) -> SelectorResult<SelectorSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply }).await?;
        rx.await.map_err(|_| SelectorError::ServiceClosed)
    }

    /// The active demo, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::ServiceClosed`] if the task is gone.
    pub async fn active(&self) -> SelectorResult<Option<DemoName>> {
        Ok(self.snapshot().await?.active().cloned())
    }

    /// Stop the active demo. The task keeps running and accepts further
    /// selections.
    ///
    /// # Errors
    ///
    /// Returns the stop failure, or [`SelectorError::ServiceClosed`].
    pub async fn shutdown(&self) -> SelectorResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Shutdown { reply }).await?;
        rx.await.map_err(|_| SelectorError::ServiceClosed)?
    }

    async fn send(&self, command: Command) -> SelectorResult<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| SelectorError::ServiceClosed)
    }
}

/// Move `selector` onto its own task.
///
/// Must be called from within a Tokio runtime. Demo calls block the worker
/// they run on; see the module docs.
#[must_use]
pub fn spawn(selector: DemoSelector) -> (SelectorHandle, JoinHandle<DemoSelector>) {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(run_loop(selector, rx));
    (SelectorHandle { tx }, task)
}

async fn run_loop(mut selector: DemoSelector, mut rx: mpsc::Receiver<Command>) -> DemoSelector {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Select { name, reply } => {
                let result = blocking(|| selector.select(&name));
                if let Err(e) = &result {
                    debug!(demo = %name, error = %e, "Selection change failed");
                }
                let _ = reply.send(result);
            },
            Command::Snapshot { reply } => {
                let _ = reply.send(SelectorSnapshot {
                    state: selector.state().clone(),
                    options: selector.options().to_vec(),
                });
            },
            Command::Shutdown { reply } => {
                let _ = reply.send(blocking(|| selector.shutdown()));
            },
        }
    }

    if let Err(e) = blocking(|| selector.shutdown()) {
        warn!(error = %e, "Failed to stop active demo on selector exit");
    }
    selector
}

/// Run a blocking demo call without stalling the other workers.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current().map(|h| h.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(f),
        _ => f(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::OrderingPolicy;
    use crate::registry::DemoRegistry;
    use crate::selector::SelectorSettings;
    use demoreel_core::{Demo, DemoResult, Viewport};
    use demoreel_test::{Call, CallLog, RecordingDemo, name};
    use std::time::{Duration, Instant};

    fn selector(log: &CallLog) -> DemoSelector {
        let mut registry = DemoRegistry::new();
        for (n, cap) in [("_default", "cap0"), ("A", "cap1"), ("B", "cap2")] {
            registry
                .register(name(n), Box::new(RecordingDemo::new(cap, log)))
                .unwrap();
        }
        DemoSelector::initialize(
            registry,
            SelectorSettings::new(name("_default")).with_ordering(OrderingPolicy::Registration),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_select_through_handle() {
        let log = CallLog::new();
        let (handle, task) = spawn(selector(&log));

        handle.select(name("A")).await.unwrap();
        assert_eq!(handle.active().await.unwrap(), Some(name("A")));
        assert_eq!(
            handle.select(name("A")).await.unwrap(),
            Transition::Unchanged
        );

        drop(handle);
        let selector = task.await.unwrap();
        assert_eq!(selector.state(), &SelectorState::Idle);
        assert_eq!(
            log.calls(),
            [
                Call::run("cap0"),
                Call::stop("cap0"),
                Call::run("cap1"),
                Call::stop("cap1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_senders_are_serialized() {
        let log = CallLog::new();
        let (handle, task) = spawn(selector(&log));

        let mut joins = Vec::new();
        for i in 0..20_u32 {
            let h = handle.clone();
            let target = if i.is_multiple_of(2) { "A" } else { "B" };
            joins.push(tokio::spawn(async move { h.select(name(target)).await }));
        }
        for j in joins {
            j.await.unwrap().unwrap();
        }
        drop(handle);
        task.await.unwrap();

        // Every run is preceded by a stop of the previously running demo.
        let mut running: Option<String> = None;
        for call in log.calls() {
            match call {
                Call::Run(demo) => {
                    assert!(running.is_none(), "run {demo} while {running:?} active");
                    running = Some(demo);
                },
                Call::Stop(demo) => {
                    assert_eq!(running.as_deref(), Some(demo.as_str()));
                    running = None;
                },
            }
        }
        assert!(running.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_lists_options() {
        let log = CallLog::new();
        let (handle, _task) = spawn(selector(&log));
        let snapshot = handle.snapshot().await.unwrap();
        let labels: Vec<&str> = snapshot.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["default", "A", "B"]);
        assert_eq!(snapshot.active(), Some(&name("_default")));
    }

    #[tokio::test]
    async fn test_shutdown_keeps_service_alive() {
        let log = CallLog::new();
        let (handle, _task) = spawn(selector(&log));
        handle.shutdown().await.unwrap();
        assert_eq!(handle.active().await.unwrap(), None);

        handle.select(name("B")).await.unwrap();
        assert_eq!(handle.active().await.unwrap(), Some(name("B")));
        assert_eq!(log.stops_of("cap0"), 1);
    }

    #[tokio::test]
    async fn test_closed_service() {
        let log = CallLog::new();
        let (handle, task) = spawn(selector(&log));
        task.abort();
        let _ = task.await;
        let err = handle.select(name("A")).await.unwrap_err();
        assert!(matches!(err, SelectorError::ServiceClosed));
    }

    /// Takes a while to stop, like a process demo waiting on its child.
    struct SlowStop;

    impl Demo for SlowStop {
        fn run(&mut self, _: Viewport) -> DemoResult<()> {
            Ok(())
        }

        fn stop(&mut self) -> DemoResult<()> {
            std::thread::sleep(Duration::from_millis(200));
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_slow_stop_does_not_starve_runtime() {
        let log = CallLog::new();
        let mut registry = DemoRegistry::new();
        registry
            .register(name("_default"), Box::new(SlowStop))
            .unwrap();
        registry
            .register(name("B"), Box::new(RecordingDemo::new("cap2", &log)))
            .unwrap();
        let selector = DemoSelector::initialize(
            registry,
            SelectorSettings::new(name("_default")).with_ordering(OrderingPolicy::Registration),
        )
        .unwrap();
        let (handle, task) = spawn(selector);

        let ticker = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Instant::now()
        });
        handle.select(name("B")).await.unwrap();
        let switched = Instant::now();

        assert!(ticker.await.unwrap() < switched);
        assert_eq!(log.calls(), [Call::run("cap2")]);

        drop(handle);
        task.await.unwrap();
    }
}
