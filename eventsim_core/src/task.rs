//! Task - one event bound to the module chain.

use crate::module::Module;
use eventsim_env::{Event, TaskError};
use std::sync::Arc;

/// The unit of work submitted to the pool.
///
/// Owns its event by value and shares the (immutable) module chain with every
/// other task of the run.
#[derive(Debug, Clone)]
pub struct Task {
    event: Event,
    chain: Arc<[Module]>,
}

impl Task {
    /// Binds an event to the module chain.
    pub fn new(event: Event, chain: Arc<[Module]>) -> Self {
        Self { event, chain }
    }

    /// Returns the event this task simulates.
    pub fn event(&self) -> Event {
        self.event
    }

    /// Runs every module in chain order and concatenates their outputs.
    ///
    /// Each module receives the event seed. The first failing module stops
    /// the chain.
    pub fn execute(self) -> Result<String, TaskError> {
        let seed = self.event.seed();
        let mut output = String::new();

        for module in self.chain.iter() {
            let part = module.run(seed).map_err(|e| TaskError::Module {
                module: module.name().to_string(),
                reason: e.to_string(),
            })?;
            output.push_str(&part);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleRegistry;
    use eventsim_env::ModuleError;

    fn chain(registry: &ModuleRegistry, names: &[&str]) -> Arc<[Module]> {
        names
            .iter()
            .map(|n| registry.resolve(n).unwrap())
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_chain_outputs_concatenated_in_order() {
        let registry = ModuleRegistry::builtin();
        let event = Event::new(1, 777);

        let a = registry.resolve("Module1").unwrap().run(777).unwrap();
        let b = registry.resolve("Module2").unwrap().run(777).unwrap();

        let output = Task::new(event, chain(&registry, &["Module1", "Module2"]))
            .execute()
            .unwrap();
        assert_eq!(output, format!("{}{}", a, b));

        let swapped = Task::new(event, chain(&registry, &["Module2", "Module1"]))
            .execute()
            .unwrap();
        assert_eq!(swapped, format!("{}{}", b, a));
    }

    #[test]
    fn test_empty_chain_yields_empty_output() {
        let task = Task::new(Event::new(1, 1), Vec::new().into());
        assert_eq!(task.execute().unwrap(), "");
    }

    #[test]
    fn test_failing_module_stops_chain() {
        fn fail(_: &str, _: u64) -> Result<String, ModuleError> {
            Err(ModuleError::new("sensor offline"))
        }

        let mut registry = ModuleRegistry::builtin();
        registry.register("Broken", fail);

        let task = Task::new(Event::new(4, 9), chain(&registry, &["Module1", "Broken", "Module2"]));
        assert_eq!(task.event().sequence(), 4);

        let err = task.execute().unwrap_err();
        assert_eq!(
            err,
            TaskError::Module {
                module: "Broken".to_string(),
                reason: "sensor offline".to_string(),
            }
        );
    }
}
