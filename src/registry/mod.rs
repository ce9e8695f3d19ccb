//! # Congestion Control Registry
//!
//! Resolves congestion-control algorithm names found in spec files
//! (`main_cc_algo`, `background_cc_algo`) to opaque handles.
//!
//! The parser never consults a process-wide table. Instead the caller
//! injects anything implementing [`CcAlgorithmLookup`]:
//!
//! - [`CcRegistry`]: a name-keyed table, pre-populated with the default
//!   algorithm set and extendable from the runner configuration
//! - any closure `Fn(&str) -> Option<CcAlgorithm>`, handy in tests
//!
//! ## Default algorithms
//!
//! ```text
//! newreno, cubic, dcubic, fast, bbr, prague, bbr1
//! ```
//!
//! ## Example
//!
//! ```
//! use simspec::registry::{CcAlgorithmLookup, CcRegistry};
//!
//! let registry = CcRegistry::with_defaults();
//! assert_eq!(registry.lookup("cubic").map(|a| a.name().to_string()), Some("cubic".to_string()));
//! assert!(registry.lookup("CUBIC").is_none());
//! ```

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Algorithms registered by [`CcRegistry::with_defaults`]
pub const DEFAULT_ALGORITHMS: &[&str] = &[
    "newreno", "cubic", "dcubic", "fast", "bbr", "prague", "bbr1",
];

/// Opaque handle to a registered congestion control algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcAlgorithm {
    id: u32,
    name: String,
}

impl CcAlgorithm {
    /// Registry-assigned identifier
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Name the algorithm was registered under
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Serialize for CcAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// Name resolution capability handed to the spec parser
pub trait CcAlgorithmLookup {
    /// Returns the handle registered under `name`, or `None` if unknown
    fn lookup(&self, name: &str) -> Option<CcAlgorithm>;
}

impl<F> CcAlgorithmLookup for F
where
    F: Fn(&str) -> Option<CcAlgorithm>,
{
    fn lookup(&self, name: &str) -> Option<CcAlgorithm> {
        self(name)
    }
}

/// Name-keyed table of congestion control algorithms
#[derive(Debug, Clone, Default)]
pub struct CcRegistry {
    algorithms: BTreeMap<String, CcAlgorithm>,
}

impl CcRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding [`DEFAULT_ALGORITHMS`]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for name in DEFAULT_ALGORITHMS {
            registry.register(name);
        }
        registry
    }

    /// Register `name`, returning its handle.
    ///
    /// Registering an existing name returns the existing handle.
    pub fn register(&mut self, name: &str) -> CcAlgorithm {
        let next_id = self.algorithms.len() as u32;
        self.algorithms
            .entry(name.to_string())
            .or_insert_with(|| CcAlgorithm {
                id: next_id,
                name: name.to_string(),
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Registered names in lexical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.algorithms.keys().map(String::as_str)
    }
}

impl CcAlgorithmLookup for CcRegistry {
    fn lookup(&self, name: &str) -> Option<CcAlgorithm> {
        self.algorithms.get(name).cloned()
    }
}
