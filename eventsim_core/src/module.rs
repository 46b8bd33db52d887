//! Module Registry
//! ================
//!
//! A module is a named, deterministic computation step. It receives the seed
//! of the event being simulated and returns a short result string.
//!
//! Modules are plain function pointers looked up by name in a closed table.
//! They hold no state between calls: any randomness is drawn from a fresh
//! generator seeded with the value passed in, so concurrent invocations never
//! share a generator and never need a lock.

use eventsim_env::ModuleError;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Signature every module implements: `(module name, event seed) -> output`.
pub type ModuleFn = fn(&str, u64) -> Result<String, ModuleError>;

/// Names of the modules available in every registry built by
/// [`ModuleRegistry::builtin`].
pub const BUILTIN_MODULES: [&str; 5] = ["Module1", "Module2", "Module3", "Module4", "Module5"];

/// A resolved module, ready to run against event seeds.
#[derive(Clone)]
pub struct Module {
    name: Arc<str>,
    run: ModuleFn,
}

impl Module {
    /// Creates a module from a name and its function.
    pub fn new(name: &str, run: ModuleFn) -> Self {
        Self {
            name: Arc::from(name),
            run,
        }
    }

    /// Returns the module's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the module against an event seed.
    pub fn run(&self, seed: u64) -> Result<String, ModuleError> {
        (self.run)(&self.name, seed)
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module").field("name", &self.name).finish()
    }
}

/// Draws two values from a generator seeded with `seed` and formats them as
/// `<name>_<n1>_<n2>`.
///
/// Shared by all built-in modules.
pub fn two_draws(name: &str, seed: u64) -> Result<String, ModuleError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n1 = rng.next_u32();
    let n2 = rng.next_u32();
    Ok(format!("{}_{}_{}", name, n1, n2))
}

/// Name → implementation table.
///
/// Adding a module means adding one entry with [`ModuleRegistry::register`].
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    entries: BTreeMap<String, ModuleFn>,
}

impl ModuleRegistry {
    /// Creates a registry with no modules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding `Module1` through `Module5`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for name in BUILTIN_MODULES {
            registry.register(name, two_draws);
        }
        registry
    }

    /// Registers (or replaces) a module under `name`.
    pub fn register(&mut self, name: impl Into<String>, run: ModuleFn) -> &mut Self {
        self.entries.insert(name.into(), run);
        self
    }

    /// Resolves a module by exact name.
    pub fn resolve(&self, name: &str) -> Option<Module> {
        self.entries.get(name).map(|run| Module::new(name, *run))
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
