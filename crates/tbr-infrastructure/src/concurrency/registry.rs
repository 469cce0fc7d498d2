//! Named gate registry
//!
//! Gates are built once from the `[gates]` configuration table and handed out
//! by name, so every caller of the same upstream shares the same limit.

use super::gate::ConcurrencyGate;
use std::collections::BTreeMap;
use tbr_domain::error::Result;
use tracing::info;

/// Gates keyed by upstream name
#[derive(Debug, Clone, Default)]
pub struct GateRegistry {
    gates: BTreeMap<String, ConcurrencyGate>,
}

impl GateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one gate per `(name, capacity)` entry
    pub fn from_capacities<'a, I>(capacities: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a usize)>,
    {
        let mut registry = Self::new();
        for (name, capacity) in capacities {
            registry.register(ConcurrencyGate::new(name.clone(), *capacity)?);
        }
        info!(gates = ?registry.names().collect::<Vec<_>>(), "Gate registry ready");
        Ok(registry)
    }

    /// Add a gate, replacing any gate with the same name
    pub fn register(&mut self, gate: ConcurrencyGate) {
        self.gates.insert(gate.name().to_string(), gate);
    }

    /// Shared handle to the gate named `name`
    pub fn get(&self, name: &str) -> Option<ConcurrencyGate> {
        self.gates.get(name).cloned()
    }

    /// Registered gate names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gates.keys().map(String::as_str)
    }

    /// Number of registered gates
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether no gate is registered
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
