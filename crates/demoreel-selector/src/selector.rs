//! The single-active demo selector.

use serde::Serialize;
use tracing::{debug, info, warn};

use demoreel_core::{DemoName, Viewport};

use crate::error::{SelectorError, SelectorResult};
use crate::ordering::OrderingPolicy;
use crate::registry::DemoRegistry;

/// Which entry is started when the selector is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartPolicy {
    /// Start the default sentinel.
    #[default]
    Default,
    /// Start the last entry in option order.
    Last,
    /// Start a specific entry.
    Named(DemoName),
}

/// Settings the selector is initialized with.
#[derive(Debug, Clone)]
pub struct SelectorSettings {
    /// Sentinel entry shown first in the option list.
    pub default_name: DemoName,
    /// How the remaining registry names are ordered.
    pub ordering: OrderingPolicy,
    /// Which entry starts at initialization.
    pub start: StartPolicy,
    /// Surface size passed to every `run`.
    pub viewport: Viewport,
}

impl SelectorSettings {
    /// Settings with the given default sentinel and defaults elsewhere.
    #[must_use]
    pub fn new(default_name: DemoName) -> Self {
        Self {
            default_name,
            ordering: OrderingPolicy::default(),
            start: StartPolicy::default(),
            viewport: Viewport::default(),
        }
    }

    /// Set the ordering policy.
    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Set the start policy.
    #[must_use]
    pub fn with_start(mut self, start: StartPolicy) -> Self {
        self.start = start;
        self
    }

    /// Set the viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}

/// One entry of the selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// The demo name.
    pub value: DemoName,
    /// Text shown to the user.
    pub label: String,
}

impl From<DemoName> for SelectOption {
    fn from(value: DemoName) -> Self {
        let label = value.label().to_owned();
        Self { value, label }
    }
}

/// What the selector currently considers running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "demo", rename_all = "lowercase")]
pub enum SelectorState {
    /// Nothing is running.
    Idle,
    /// The named demo is running.
    Active(DemoName),
}

/// Outcome of a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The requested demo was already active; nothing was called.
    Unchanged,
    /// The previous demo (if any) was stopped and `to` was started.
    Switched {
        /// The demo that was stopped.
        from: Option<DemoName>,
        /// The demo that was started.
        to: DemoName,
    },
}

/// The option list [`DemoSelector::initialize`] would present for
/// `registry`, without starting anything.
///
/// Registry names are ordered by [`SelectorSettings::ordering`] and the
/// default sentinel is moved to the front.
///
/// # Errors
///
/// - [`SelectorError::EmptyRegistry`] if the registry has no demos.
/// - [`SelectorError::MissingDefault`] if the sentinel is not registered.
pub fn option_list(
    registry: &DemoRegistry,
    settings: &SelectorSettings,
) -> SelectorResult<Vec<SelectOption>> {
    if registry.is_empty() {
        return Err(SelectorError::EmptyRegistry);
    }
    if !registry.contains(&settings.default_name) {
        return Err(SelectorError::MissingDefault(settings.default_name.clone()));
    }

    let mut ordered = settings.ordering.order(registry.names());
    ordered.retain(|n| n != &settings.default_name);
    ordered.insert(0, settings.default_name.clone());
    Ok(ordered.into_iter().map(SelectOption::from).collect())
}

/// Keeps at most one demo of a registry running.
pub struct DemoSelector {
    registry: DemoRegistry,
    options: Vec<SelectOption>,
    viewport: Viewport,
    state: SelectorState,
}

impl DemoSelector {
    /// Build the option list (see [`option_list`]) and start the initial
    /// demo.
    ///
    /// # Errors
    ///
    /// - [`SelectorError::EmptyRegistry`] if the registry has no demos.
    /// - [`SelectorError::MissingDefault`] if the sentinel is not registered.
    /// - [`SelectorError::UnknownDemo`] if [`StartPolicy::Named`] names a
    ///   demo that is not an option.
    /// - [`SelectorError::StartFailed`] if the initial demo fails to run.
    pub fn initialize(registry: DemoRegistry, settings: SelectorSettings) -> SelectorResult<Self> {
        let options = option_list(&registry, &settings)?;

        let initial = match settings.start {
            StartPolicy::Default => settings.default_name,
            StartPolicy::Last => options
                .last()
                .map(|o| o.value.clone())
                .ok_or(SelectorError::EmptyRegistry)?,
            StartPolicy::Named(name) => {
                if !options.iter().any(|o| o.value == name) {
                    return Err(SelectorError::UnknownDemo(name));
                }
                name
            },
        };

        info!(
            options = options.len(),
            initial = %initial,
            "Initializing demo selector"
        );

        let mut selector = Self {
            registry,
            options,
            viewport: settings.viewport,
            state: SelectorState::Idle,
        };
        selector.start(&initial)?;
        Ok(selector)
    }

    /// Switch to `name`.
    ///
    /// Stops the active demo, then runs `name`. Selecting the active demo
    /// does nothing.
    ///
    /// If `stop` fails the previous demo stays active and `name` is not
    /// started. If `run` fails the selector is left idle.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UnknownDemo`] for names that are not options,
    /// or the stop/start failure.
    pub fn select(&mut self, name: &DemoName) -> SelectorResult<Transition> {
        if !self.is_option(name) {
            return Err(SelectorError::UnknownDemo(name.clone()));
        }

        let previous = match &self.state {
            SelectorState::Active(active) if active == name => {
                debug!(demo = %name, "Demo already active");
                return Ok(Transition::Unchanged);
            },
            SelectorState::Active(active) => Some(active.clone()),
            SelectorState::Idle => None,
        };

        if let Some(prev) = &previous {
            self.stop_demo(prev)?;
            self.state = SelectorState::Idle;
        }
        self.start(name)?;

        info!(
            from = previous.as_ref().map_or("<idle>", DemoName::as_str),
            to = %name,
            "Switched demo"
        );
        Ok(Transition::Switched {
            from: previous,
            to: name.clone(),
        })
    }

    /// Stop the active demo, if any, and go idle.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::StopFailed`] if the demo fails to stop; the
    /// demo stays active in that case.
    pub fn shutdown(&mut self) -> SelectorResult<()> {
        if let SelectorState::Active(active) = &self.state {
            let active = active.clone();
            self.stop_demo(&active)?;
            self.state = SelectorState::Idle;
            info!(demo = %active, "Selector shut down");
        }
        Ok(())
    }

    /// The active demo, if any.
    #[must_use]
    pub fn active(&self) -> Option<&DemoName> {
        match &self.state {
            SelectorState::Active(name) => Some(name),
            SelectorState::Idle => None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    /// Options in display order, default sentinel first.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Surface size passed to `run`.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Position of `name` in the option list.
    #[must_use]
    pub fn position(&self, name: &DemoName) -> Option<usize> {
        self.options.iter().position(|o| &o.value == name)
    }

    fn is_option(&self, name: &DemoName) -> bool {
        self.position(name).is_some()
    }

    fn start(&mut self, name: &DemoName) -> SelectorResult<()> {
        let viewport = self.viewport;
        let demo = self
            .registry
            .get_mut(name)
            .ok_or_else(|| SelectorError::NotRegistered(name.clone()))?;
        demo.run(viewport).map_err(|source| {
            warn!(demo = %name, error = %source, "Demo failed to start");
            SelectorError::StartFailed {
                demo: name.clone(),
                source,
            }
        })?;
        debug!(demo = %name, width = viewport.width, height = viewport.height, "Demo started");
        self.state = SelectorState::Active(name.clone());
        Ok(())
    }

    fn stop_demo(&mut self, name: &DemoName) -> SelectorResult<()> {
        let demo = self
            .registry
            .get_mut(name)
            .ok_or_else(|| SelectorError::NotRegistered(name.clone()))?;
        demo.stop().map_err(|source| {
            warn!(demo = %name, error = %source, "Demo failed to stop");
            SelectorError::StopFailed {
                demo: name.clone(),
                source,
            }
        })?;
        debug!(demo = %name, "Demo stopped");
        Ok(())
    }
}

impl std::fmt::Debug for DemoSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoSelector")
            .field("state", &self.state)
            .field("option_count", &self.options.len())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoreel_test::{Call, CallLog, FailingDemo, RecordingDemo, name};

    /// `{A: cap1, B: cap2}` with `_default` bound to cap1.
    fn scenario(log: &CallLog) -> DemoRegistry {
        let mut registry = DemoRegistry::new();
        registry
            .register(name("A"), Box::new(RecordingDemo::new("cap1", log)))
            .unwrap();
        registry
            .register(name("B"), Box::new(RecordingDemo::new("cap2", log)))
            .unwrap();
        registry.alias(name("_default"), &name("A")).unwrap();
        registry
    }

    fn settings() -> SelectorSettings {
        SelectorSettings::new(name("_default")).with_ordering(OrderingPolicy::Registration)
    }

    #[test]
    fn test_scenario_switching() {
        let log = CallLog::new();
        let mut selector = DemoSelector::initialize(scenario(&log), settings()).unwrap();
        assert_eq!(log.calls(), [Call::run("cap1")]);
        assert_eq!(selector.active(), Some(&name("_default")));

        log.clear();
        let t = selector.select(&name("B")).unwrap();
        assert_eq!(
            t,
            Transition::Switched {
                from: Some(name("_default")),
                to: name("B")
            }
        );
        assert_eq!(log.calls(), [Call::stop("cap1"), Call::run("cap2")]);

        log.clear();
        assert_eq!(selector.select(&name("B")).unwrap(), Transition::Unchanged);
        assert!(log.calls().is_empty());

        selector.select(&name("A")).unwrap();
        assert_eq!(log.calls(), [Call::stop("cap2"), Call::run("cap1")]);
        assert_eq!(selector.active(), Some(&name("A")));
    }

    #[test]
    fn test_options_default_first_with_labels() {
        let log = CallLog::new();
        let mut registry = DemoRegistry::new();
        for n in ["_ch5_10_alienrain", "_default", "_ch3_1_vertexattr", "_ch5_9_x"] {
            registry
                .register(name(n), Box::new(RecordingDemo::new(n, &log)))
                .unwrap();
        }
        let selector =
            DemoSelector::initialize(registry, SelectorSettings::new(name("_default"))).unwrap();

        let values: Vec<&str> = selector
            .options()
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(
            values,
            ["_default", "_ch3_1_vertexattr", "_ch5_9_x", "_ch5_10_alienrain"]
        );
        assert_eq!(selector.options()[0].label, "default");
        assert_eq!(selector.options()[3].label, "ch5_10_alienrain");
    }

    #[test]
    fn test_start_last_in_order() {
        let log = CallLog::new();
        let mut registry = DemoRegistry::new();
        for n in ["_default", "_c5_1", "_c3_2"] {
            registry
                .register(name(n), Box::new(RecordingDemo::new(n, &log)))
                .unwrap();
        }
        let selector = DemoSelector::initialize(
            registry,
            SelectorSettings::new(name("_default")).with_start(StartPolicy::Last),
        )
        .unwrap();

        assert_eq!(selector.active(), Some(&name("_c5_1")));
        assert_eq!(log.calls(), [Call::run("_c5_1")]);
    }

    #[test]
    fn test_start_named_must_be_option() {
        let log = CallLog::new();
        let err = DemoSelector::initialize(
            scenario(&log),
            settings().with_start(StartPolicy::Named(name("C"))),
        )
        .unwrap_err();
        assert!(matches!(err, SelectorError::UnknownDemo(_)));
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_empty_registry_fails_fast() {
        let err = DemoSelector::initialize(DemoRegistry::new(), settings()).unwrap_err();
        assert!(matches!(err, SelectorError::EmptyRegistry));
    }

    #[test]
    fn test_missing_default_fails_fast() {
        let log = CallLog::new();
        let mut registry = DemoRegistry::new();
        registry
            .register(name("A"), Box::new(RecordingDemo::new("cap1", &log)))
            .unwrap();
        let err = DemoSelector::initialize(registry, settings()).unwrap_err();
        assert!(matches!(err, SelectorError::MissingDefault(n) if n.as_str() == "_default"));
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_unknown_selection_makes_no_calls() {
        let log = CallLog::new();
        let mut selector = DemoSelector::initialize(scenario(&log), settings()).unwrap();
        log.clear();
        let err = selector.select(&name("Z")).unwrap_err();
        assert!(matches!(err, SelectorError::UnknownDemo(_)));
        assert!(log.calls().is_empty());
        assert_eq!(selector.active(), Some(&name("_default")));
    }

    #[test]
    fn test_filtered_name_is_not_selectable() {
        let log = CallLog::new();
        let mut registry = DemoRegistry::new();
        for n in ["_default", "_ch3_1_a", "helper"] {
            registry
                .register(name(n), Box::new(RecordingDemo::new(n, &log)))
                .unwrap();
        }
        let mut selector =
            DemoSelector::initialize(registry, SelectorSettings::new(name("_default"))).unwrap();
        assert!(selector.position(&name("helper")).is_none());
        assert!(matches!(
            selector.select(&name("helper")),
            Err(SelectorError::UnknownDemo(_))
        ));
    }

    #[test]
    fn test_run_failure_leaves_idle() {
        let log = CallLog::new();
        let mut registry = scenario(&log);
        registry
            .register(name("C"), Box::new(FailingDemo::on_run("broken", &log)))
            .unwrap();
        let mut selector = DemoSelector::initialize(registry, settings()).unwrap();
        log.clear();

        let err = selector.select(&name("C")).unwrap_err();
        assert!(matches!(err, SelectorError::StartFailed { .. }));
        assert_eq!(selector.state(), &SelectorState::Idle);
        assert_eq!(log.calls(), [Call::stop("cap1"), Call::run("broken")]);

        // From idle only `run` is called.
        log.clear();
        let t = selector.select(&name("B")).unwrap();
        assert_eq!(
            t,
            Transition::Switched {
                from: None,
                to: name("B")
            }
        );
        assert_eq!(log.calls(), [Call::run("cap2")]);
    }

    #[test]
    fn test_stop_failure_keeps_previous_active() {
        let log = CallLog::new();
        let mut registry = DemoRegistry::new();
        registry
            .register(name("_default"), Box::new(FailingDemo::on_stop("sticky", &log)))
            .unwrap();
        registry
            .register(name("B"), Box::new(RecordingDemo::new("cap2", &log)))
            .unwrap();
        let mut selector = DemoSelector::initialize(registry, settings()).unwrap();
        log.clear();

        let err = selector.select(&name("B")).unwrap_err();
        assert!(matches!(err, SelectorError::StopFailed { .. }));
        assert_eq!(selector.active(), Some(&name("_default")));
        assert_eq!(log.runs_of("cap2"), 0);
    }

    #[test]
    fn test_initial_run_failure() {
        let log = CallLog::new();
        let mut registry = DemoRegistry::new();
        registry
            .register(name("_default"), Box::new(FailingDemo::on_run("broken", &log)))
            .unwrap();
        let err = DemoSelector::initialize(registry, settings()).unwrap_err();
        assert!(matches!(err, SelectorError::StartFailed { demo, .. } if demo.as_str() == "_default"));
    }

    #[test]
    fn test_shutdown_stops_active_once() {
        let log = CallLog::new();
        let mut selector = DemoSelector::initialize(scenario(&log), settings()).unwrap();
        selector.shutdown().unwrap();
        selector.shutdown().unwrap();
        assert_eq!(log.stops_of("cap1"), 1);
        assert_eq!(selector.state(), &SelectorState::Idle);
    }

    #[test]
    fn test_viewport_passed_to_run() {
        let log = CallLog::new();
        let viewport = Viewport::new(640, 480);
        let _selector =
            DemoSelector::initialize(scenario(&log), settings().with_viewport(viewport)).unwrap();
        assert_eq!(log.viewports_of("cap1"), [viewport]);
    }

    #[test]
    fn test_option_list_runs_nothing() {
        let log = CallLog::new();
        let registry = scenario(&log);
        let options = option_list(&registry, &settings()).unwrap();
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["default", "A", "B"]);
        assert!(log.calls().is_empty());
    }
}
