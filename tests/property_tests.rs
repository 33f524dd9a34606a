//! Property-based tests for the hierarchical core.
//!
//! These tests use proptest to verify the resolution and planning
//! invariants hold across many randomly generated well-formed trees, not
//! just the handful of shapes the unit tests pin down.

use hfsm::core::resolve::resolve;
use hfsm::emit::generate_java;
use hfsm::machine::CompiledMachine;
use hfsm::model::{MachineDef, ModelDef, StateDef, TransitionDef};
use heck::{ToLowerCamelCase, ToShoutySnakeCase};
use proptest::prelude::*;

/// Even-indexed siblings nest a sub-machine until the depth runs out, so
/// generated trees mix leaf and composite siblings at every level.
fn nests(depth: usize, i: usize) -> bool {
    depth > 1 && i % 2 == 0
}

/// Qualified names of every state the shape functions below will produce,
/// with siblings named `S0..S{b}` at every level.
fn collect_names(depth: usize, branching: usize, prefix: &str, out: &mut Vec<String>) {
    for i in 0..branching {
        let name = if prefix.is_empty() {
            format!("S{i}")
        } else {
            format!("{prefix}.S{i}")
        };
        if nests(depth, i) {
            collect_names(depth - 1, branching, &name, out);
        }
        out.push(name);
    }
}

fn build_machine(
    depth: usize,
    branching: usize,
    machine_index: &mut usize,
    wiring: &[(usize, usize, bool)],
    names: &[String],
) -> MachineDef {
    let index = *machine_index;
    *machine_index += 1;

    let mut def = MachineDef::new();
    for i in 0..branching {
        let mut state = StateDef::new(format!("S{i}"));
        if i == 0 {
            state = state.initial();
        }
        if nests(depth, i) {
            state = state.machine(build_machine(depth - 1, branching, machine_index, wiring, names));
        }
        def = def.state(state);
    }

    let (event_count, target_seed, with_action) = wiring[index % wiring.len()];
    for k in 0..event_count {
        let target = names[(target_seed + index * 7 + k) % names.len()].as_str();
        let mut transition = TransitionDef::new(format!("e{k}"), target);
        if with_action {
            transition = transition.action(format!("act{k}"));
        }
        def = def.transition(transition);
    }

    def
}

/// A well-formed tree by construction: one initial per machine, unique
/// sibling names, unique events per level, resolvable targets. The only
/// diagnostics such a tree can produce are unreachable-transition warnings.
fn build_tree(depth: usize, branching: usize, wiring: &[(usize, usize, bool)]) -> ModelDef {
    let mut names = Vec::new();
    collect_names(depth, branching, "", &mut names);

    let mut machine_index = 0;
    ModelDef::with_root(build_machine(
        depth,
        branching,
        &mut machine_index,
        wiring,
        &names,
    ))
}

prop_compose! {
    fn arbitrary_tree()(
        depth in 1usize..=3,
        branching in 1usize..=3,
        wiring in prop::collection::vec((0usize..=2, 0usize..=20, any::<bool>()), 1..=8),
    ) -> ModelDef {
        build_tree(depth, branching, &wiring)
    }
}

prop_compose! {
    fn arbitrary_events()(events in prop::collection::vec(0usize..=2, 0..=12)) -> Vec<String> {
        events.into_iter().map(|k| format!("e{k}")).collect()
    }
}

proptest! {
    #[test]
    fn generated_trees_always_build(def in arbitrary_tree()) {
        prop_assert!(CompiledMachine::build(&def).is_ok());
    }

    #[test]
    fn initial_plan_terminates_at_a_leaf(def in arbitrary_tree()) {
        let compiled = CompiledMachine::build(&def).unwrap();
        let plan = compiled.initial_plan().unwrap();

        prop_assert!(compiled.model().is_leaf(plan.destination));
        prop_assert!(plan.exit.is_empty());
        prop_assert!(plan.action.is_none());

        // The enter sequence is exactly the destination's ancestor chain,
        // outermost first.
        let mut chain = compiled.model().ancestors(plan.destination);
        chain.reverse();
        prop_assert_eq!(plan.enter, chain);
    }

    #[test]
    fn resolution_picks_the_innermost_declaring_level(
        def in arbitrary_tree(),
        event_k in 0usize..=2,
    ) {
        let compiled = CompiledMachine::build(&def).unwrap();
        let model = compiled.model();
        let event = format!("e{event_k}");

        for &leaf in compiled.leaves() {
            // Oracle: enumerate the scope chain from the inside out and
            // find the first level declaring the event at all.
            let mut scopes = vec![model.state(leaf).parent];
            let mut machine = model.state(leaf).parent;
            while let Some(owner) = model.machine(machine).owner {
                machine = model.state(owner).parent;
                scopes.push(machine);
            }
            let innermost = scopes.iter().copied().find(|&m| {
                model
                    .machine(m)
                    .transitions
                    .iter()
                    .any(|&t| model.transition(t).event == event)
            });

            match (resolve(model, leaf, &event), innermost) {
                (Some(t), Some(m)) => prop_assert_eq!(model.transition(t).owner, m),
                (None, None) => {}
                (resolved, declared) => prop_assert!(
                    false,
                    "resolver ({resolved:?}) and scope oracle ({declared:?}) disagree"
                ),
            }
        }
    }

    #[test]
    fn plans_partition_both_ancestor_chains(
        def in arbitrary_tree(),
        event_k in 0usize..=2,
    ) {
        let compiled = CompiledMachine::build(&def).unwrap();
        let model = compiled.model();
        let event = format!("e{event_k}");

        for &leaf in compiled.leaves() {
            let Some(plan) = compiled.resolve_and_plan(leaf, &event) else {
                continue;
            };

            let current_chain = model.ancestors(leaf);
            let dest_chain = model.ancestors(plan.destination);

            // Exit is a prefix of the current chain (innermost→outermost);
            // enter, reversed, is a prefix of the destination chain.
            prop_assert_eq!(&current_chain[..plan.exit.len()], &plan.exit[..]);
            let mut enter_rev = plan.enter.clone();
            enter_rev.reverse();
            prop_assert_eq!(&dest_chain[..enter_rev.len()], &enter_rev[..]);

            // What remains above the exit and enter prefixes is the shared
            // LCA-and-up part — identical on both sides, no gaps, no
            // repeats.
            prop_assert_eq!(
                &current_chain[plan.exit.len()..],
                &dest_chain[enter_rev.len()..]
            );
            prop_assert!(plan.exit.iter().all(|s| !plan.enter.contains(s)));
        }
    }

    #[test]
    fn instance_always_occupies_a_leaf(
        def in arbitrary_tree(),
        events in arbitrary_events(),
    ) {
        let compiled = CompiledMachine::build(&def).unwrap();
        let mut instance = compiled.start().unwrap();

        for event in &events {
            instance.handle(event);
            prop_assert!(compiled.model().is_leaf(instance.current()));
        }
    }

    #[test]
    fn replaying_a_sequence_is_deterministic(
        def in arbitrary_tree(),
        events in arbitrary_events(),
    ) {
        let compiled = CompiledMachine::build(&def).unwrap();

        let mut first = compiled.start().unwrap();
        let mut second = compiled.start().unwrap();
        for event in &events {
            first.handle(event);
        }
        for event in &events {
            second.handle(event);
        }

        prop_assert_eq!(first.current(), second.current());
        prop_assert_eq!(first.trace().path(), second.trace().path());
        prop_assert_eq!(first.trace().actions(), second.trace().actions());
    }

    #[test]
    fn emitted_tables_agree_with_the_resolver(def in arbitrary_tree()) {
        let compiled = CompiledMachine::build(&def).unwrap();
        let source = generate_java(&compiled, "machine");

        for &leaf in compiled.leaves() {
            let instance = format!(
                "{}State",
                compiled.qualified_name(leaf).replace('.', "_").to_lower_camel_case()
            );

            for event in ["e0", "e1", "e2"] {
                let constant = event.to_shouty_snake_case();
                match compiled.resolve_and_plan(leaf, event) {
                    Some(plan) => {
                        let target = format!(
                            "{}State",
                            compiled
                                .qualified_name(plan.destination)
                                .replace('.', "_")
                                .to_lower_camel_case()
                        );
                        let line = format!(
                            "transitions.get({instance}).put(Event.{constant}, {target});"
                        );
                        prop_assert!(
                            source.contains(&line),
                            "generated source is missing: {line}"
                        );
                    }
                    None => {
                        let line =
                            format!("transitions.get({instance}).put(Event.{constant},");
                        prop_assert!(
                            !source.contains(&line),
                            "generated source has a table entry the resolver never picked: {line}"
                        );
                    }
                }
            }
        }
    }
}
