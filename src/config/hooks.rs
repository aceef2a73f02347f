//! Lifecycle hook and event listener registration
//!
//! The setup hook runs once during resolution. It may register listeners
//! for engine lifecycle events and adjust the draft configuration before it
//! is frozen.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::model::RunConfiguration;
use crate::common::{BoxError, Error, Result};

/// Engine lifecycle events a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    BeforeRun,
    AfterRun,
    BeforeSpec,
    AfterSpec,
    BeforeBrowserLaunch,
    AfterScreenshot,
    /// Named task invoked from a spec; payload carries the task name
    Task,
}

impl LifecycleEvent {
    pub const ALL: &'static [LifecycleEvent] = &[
        LifecycleEvent::BeforeRun,
        LifecycleEvent::AfterRun,
        LifecycleEvent::BeforeSpec,
        LifecycleEvent::AfterSpec,
        LifecycleEvent::BeforeBrowserLaunch,
        LifecycleEvent::AfterScreenshot,
        LifecycleEvent::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::BeforeRun => "before:run",
            LifecycleEvent::AfterRun => "after:run",
            LifecycleEvent::BeforeSpec => "before:spec",
            LifecycleEvent::AfterSpec => "after:spec",
            LifecycleEvent::BeforeBrowserLaunch => "before:browser:launch",
            LifecycleEvent::AfterScreenshot => "after:screenshot",
            LifecycleEvent::Task => "task",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LifecycleEvent::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| Error::validation("event", format!("unknown lifecycle event '{}'", s)))
    }
}

/// Listener invoked by the engine with an event payload
pub type Listener =
    Box<dyn Fn(&Value) -> std::result::Result<Option<Value>, BoxError> + Send + Sync>;

/// Setup hook run once during resolution
pub type SetupHook =
    Box<dyn FnOnce(&mut EventRegistry, &mut RunConfiguration) -> std::result::Result<(), BoxError>>;

/// Listeners registered by the setup hook, in registration order
#[derive(Default)]
pub struct EventRegistry {
    listeners: Vec<(LifecycleEvent, Listener)>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event
    pub fn on<F>(&mut self, event: LifecycleEvent, listener: F)
    where
        F: Fn(&Value) -> std::result::Result<Option<Value>, BoxError> + Send + Sync + 'static,
    {
        tracing::debug!("Registered listener for {}", event);
        self.listeners.push((event, Box::new(listener)));
    }

    /// Register a listener by event name, e.g. `"before:run"`
    pub fn on_named<F>(&mut self, event: &str, listener: F) -> Result<()>
    where
        F: Fn(&Value) -> std::result::Result<Option<Value>, BoxError> + Send + Sync + 'static,
    {
        let event = event.parse()?;
        self.on(event, listener);
        Ok(())
    }

    /// Listeners registered for `event`
    pub fn listeners_for(&self, event: LifecycleEvent) -> impl Iterator<Item = &Listener> {
        self.listeners
            .iter()
            .filter(move |(e, _)| *e == event)
            .map(|(_, l)| l)
    }

    /// Invoke every listener for `event` in registration order
    ///
    /// Returns the values listeners produced. The first failure stops the
    /// dispatch and surfaces as a hook error.
    pub fn emit(&self, event: LifecycleEvent, payload: &Value) -> Result<Vec<Value>> {
        let mut results = Vec::new();
        for listener in self.listeners_for(event) {
            if let Some(value) = listener(payload).map_err(Error::Hook)? {
                results.push(value);
            }
        }
        Ok(results)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|(e, _)| e.as_str()))
            .finish()
    }
}
