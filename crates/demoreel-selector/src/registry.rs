//! Demo registry.
//!
//! Maps demo names to the capabilities that implement them. Several names may
//! be bound to the same capability (for example the default sentinel and the
//! demo it stands for).

use std::collections::HashMap;

use tracing::debug;

use demoreel_core::{Demo, DemoName};

use crate::error::{SelectorError, SelectorResult};

/// Registry of demos keyed by name, in registration order.
#[derive(Default)]
pub struct DemoRegistry {
    slots: Vec<Box<dyn Demo>>,
    entries: HashMap<DemoName, usize>,
    order: Vec<DemoName>,
}

impl DemoRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a demo under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::AlreadyRegistered`] if the name is taken.
    pub fn register(&mut self, name: DemoName, demo: Box<dyn Demo>) -> SelectorResult<()> {
        if self.entries.contains_key(&name) {
            return Err(SelectorError::AlreadyRegistered(name));
        }
        let slot = self.slots.len();
        self.slots.push(demo);
        debug!(demo = %name, slot, "Registered demo");
        self.entries.insert(name.clone(), slot);
        self.order.push(name);
        Ok(())
    }

    /// Bind `name` to the capability already registered as `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::AlreadyRegistered`] if `name` is taken, or
    /// [`SelectorError::NotRegistered`] if `target` is unknown.
    pub fn alias(&mut self, name: DemoName, target: &DemoName) -> SelectorResult<()> {
        if self.entries.contains_key(&name) {
            return Err(SelectorError::AlreadyRegistered(name));
        }
        let slot = *self
            .entries
            .get(target)
            .ok_or_else(|| SelectorError::NotRegistered(target.clone()))?;
        debug!(demo = %name, target = %target, "Registered demo alias");
        self.entries.insert(name.clone(), slot);
        self.order.push(name);
        Ok(())
    }

    /// Whether a demo is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &DemoName) -> bool {
        self.entries.contains_key(name)
    }

    /// Get a mutable reference to the demo registered under `name`.
    #[must_use]
    pub fn get_mut(&mut self, name: &DemoName) -> Option<&mut Box<dyn Demo>> {
        let slot = *self.entries.get(name)?;
        self.slots.get_mut(slot)
    }

    /// All registered names, in registration order.
    #[must_use]
    pub fn names(&self) -> &[DemoName] {
        &self.order
    }

    /// Number of registered names (aliases included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for DemoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoRegistry")
            .field("demo_count", &self.slots.len())
            .field("names", &self.order)
            .finish()
    }
}
