//! Property tests: output is a pure function of (seed, event count, chain).

use eventsim_core::module::BUILTIN_MODULES;
use eventsim_core::{ModuleRegistry, SeedStream, Simulation, SimulationConfig};
use proptest::prelude::*;

fn outputs(seed: u64, events: u64, workers: usize, modules: &[String]) -> Vec<String> {
    let config = SimulationConfig {
        event_count: events,
        seed: Some(seed),
        workers,
        modules: modules.to_vec(),
    };
    let mut simulation = Simulation::new(config, ModuleRegistry::builtin());
    simulation.init().expect("builtin modules resolve");
    simulation.run().expect("initialized simulation runs").outputs()
}

fn module_chain() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(BUILTIN_MODULES.to_vec()), 1..4)
        .prop_map(|names| names.into_iter().map(String::from).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn worker_count_never_changes_output(
        seed in any::<u64>(),
        events in 0u64..40,
        workers in 1usize..9,
        modules in module_chain(),
    ) {
        let inline = outputs(seed, events, 0, &modules);
        let threaded = outputs(seed, events, workers, &modules);

        prop_assert_eq!(inline.len() as u64, events);
        prop_assert_eq!(threaded, inline);
    }

    #[test]
    fn each_line_is_the_chain_in_order(
        seed in any::<u64>(),
        modules in module_chain(),
    ) {
        let registry = ModuleRegistry::builtin();
        let mut seeds = SeedStream::new(seed);

        for line in outputs(seed, 5, 3, &modules) {
            let event_seed = seeds.next_seed();
            let expected: String = modules
                .iter()
                .map(|name| registry.resolve(name).unwrap().run(event_seed).unwrap())
                .collect();
            prop_assert_eq!(line, expected);
        }
    }
}
