//! Raw, unvalidated configuration sources
//!
//! Every source (file, object literal, environment) becomes a [`RawSource`]:
//! a JSON-style mapping where any field may be missing or mistyped. Nothing
//! here checks types; that happens in the resolver.

use serde_json::{Map, Value};

use crate::common::{Error, Result};

/// Keys the resolver understands, after alias normalization
pub const RECOGNIZED_KEYS: &[&str] = &[
    "specPattern",
    "resultsFolder",
    "videosFolder",
    "screenshotsFolder",
    "fixturesFolder",
    "supportFile",
    "reporterName",
    "reporterOptions",
    "profile",
];

/// Testing-type section whose keys are lifted over the top level
pub const TESTING_TYPE_SECTION: &str = "e2e";

/// Alias accepted for `reporterName`
const REPORTER_ALIAS: &str = "reporter";

/// An unvalidated configuration mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSource(Map<String, Value>);

impl RawSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a structured value; the root must be a mapping
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map).normalized()),
            // An empty document parses to null
            Value::Null => Ok(Self::new()),
            other => Err(Error::wrong_type("<root>", "a mapping", &other)),
        }
    }

    /// Look up a field; `null` counts as absent
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
        let normalized = std::mem::take(self).normalized();
        *self = normalized;
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys present in this source that the resolver does not recognize
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| !RECOGNIZED_KEYS.contains(k))
    }

    /// Layer `over` on top of this source
    ///
    /// `reporterOptions` mappings merge key by key; every other key from
    /// `over` replaces the one here. `null` in `over` means omitted and never
    /// replaces a value, at either level.
    pub fn overlay(mut self, over: RawSource) -> RawSource {
        for (key, value) in over.0 {
            if value.is_null() {
                continue;
            }
            if key == "reporterOptions" {
                if let (Some(Value::Object(base)), Value::Object(top)) =
                    (self.0.get_mut(&key), &value)
                {
                    for (k, v) in top.iter().filter(|(_, v)| !v.is_null()) {
                        base.insert(k.clone(), v.clone());
                    }
                    continue;
                }
            }
            self.0.insert(key, value);
        }
        self
    }

    /// Lift the keys of a testing-type section over the top-level keys
    pub fn flatten_section(mut self, section: &str) -> Result<RawSource> {
        match self.0.remove(section) {
            None | Some(Value::Null) => Ok(self),
            Some(Value::Object(map)) => Ok(self.overlay(RawSource(map).normalized())),
            Some(other) => Err(Error::wrong_type(section, "a mapping", &other)),
        }
    }

    /// Rename the `reporter` alias to `reporterName`
    ///
    /// Within one mapping an explicit `reporterName` wins over the alias.
    fn normalized(mut self) -> Self {
        if let Some(alias) = self.0.remove(REPORTER_ALIAS) {
            self.0.entry("reporterName").or_insert(alias);
        }
        self
    }
}

impl From<Map<String, Value>> for RawSource {
    fn from(map: Map<String, Value>) -> Self {
        Self(map).normalized()
    }
}
