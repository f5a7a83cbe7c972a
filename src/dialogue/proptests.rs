//! Property-based tests for whole conversations
//!
//! Conversations are driven through the engine against in-memory
//! collaborators on a single-threaded runtime.

use super::*;
use crate::services::testing::*;
use crate::services::Operation;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

type TestEngine =
    DialogueEngine<Arc<MockProjectDirectory>, Arc<MockSpecService>, Arc<RecordingFinalizer>>;

const CHANNEL: &str = "room";

fn run<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn engine(
    directory: &Arc<MockProjectDirectory>,
    specs: &Arc<MockSpecService>,
    finalizer: &Arc<RecordingFinalizer>,
) -> TestEngine {
    DialogueEngine::new(
        directory.clone(),
        specs.clone(),
        finalizer.clone(),
        Arc::new(ChannelContextStore::new()),
    )
}

async fn say(engine: &TestEngine, message: &str, intent: &str) -> StepOutcome {
    engine
        .handle(CHANNEL, Dialect::Chat, message, &Intent::from(intent))
        .await
}

// ============================================================================
// Generators
// ============================================================================

#[derive(Debug, Clone)]
struct Scenario {
    project_count: usize,
    project_choice: usize,
    microservice_count: usize,
    microservice_choice: usize,
    operations: Vec<Operation>,
    operation_choice: usize,
    values: Vec<String>,
}

fn arb_method() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("get"), Just("post"), Just("put"), Just("delete")]
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    (arb_method(), "[a-z]{1,6}", 0usize..4).prop_map(|(method, resource, params)| {
        let names: Vec<String> = (0..params).map(|i| format!("p{i}")).collect();
        let path: String = std::iter::once(format!("/{resource}"))
            .chain(names.iter().map(|name| format!("/{{{name}}}")))
            .collect();
        Operation {
            method: method.to_string(),
            path,
            path_parameter_names: names,
        }
    })
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (
        1usize..4,
        1usize..4,
        proptest::collection::vec(arb_operation(), 1..5),
    )
        .prop_flat_map(|(project_count, microservice_count, operations)| {
            let operation_count = operations.len();
            (
                Just(project_count),
                1..=project_count,
                Just(microservice_count),
                1..=microservice_count,
                Just(operations),
                1..=operation_count,
                proptest::collection::vec("[a-z0-9]{1,6}", 3),
            )
        })
        .prop_map(
            |(
                project_count,
                project_choice,
                microservice_count,
                microservice_choice,
                operations,
                operation_choice,
                values,
            )| Scenario {
                project_count,
                project_choice,
                microservice_count,
                microservice_choice,
                operations,
                operation_choice,
                values,
            },
        )
}

/// Component id of microservice `m` (1-based) in project `p` (1-based)
fn component_id(p: usize, m: usize) -> i64 {
    i64::try_from(p * 100 + m).unwrap()
}

fn setup(scenario: &Scenario) -> (Arc<MockProjectDirectory>, Arc<MockSpecService>) {
    let directory = Arc::new(MockProjectDirectory::new());
    let specs = Arc::new(MockSpecService::new());
    for p in 1..=scenario.project_count {
        let components = (1..=scenario.microservice_count)
            .map(|m| microservice(component_id(p, m), &format!("service-{p}-{m}")))
            .collect();
        let id = i64::try_from(p).unwrap();
        directory.link(CHANNEL, project(id, &format!("project-{p}"), components));
        for m in 1..=scenario.microservice_count {
            for operation in &scenario.operations {
                specs.offer(component_id(p, m), operation.clone());
            }
        }
    }
    (directory, specs)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chosen_request_is_exported_exactly(scenario in arb_scenario()) {
        let (directory, specs) = setup(&scenario);
        let finalizer = Arc::new(RecordingFinalizer::new());
        let engine = engine(&directory, &specs, &finalizer);

        let chosen = scenario.operations[scenario.operation_choice - 1].clone();
        let closed = run(async {
            say(&engine, "model a test", "modeltest").await;
            if scenario.project_count > 1 {
                say(&engine, &scenario.project_choice.to_string(), "none").await;
            }
            if scenario.microservice_count > 1 {
                say(&engine, &scenario.microservice_choice.to_string(), "none").await;
            }
            say(&engine, "generated", "none").await;
            say(&engine, &scenario.operation_choice.to_string(), "none").await;
            for value in scenario.values.iter().take(chosen.path_parameter_names.len()) {
                say(&engine, value, "none").await;
            }
            say(&engine, "no", "no").await;
            say(&engine, "no", "no").await.closed
        });
        prop_assert!(closed);

        let suggestions = finalizer.suggestions();
        prop_assert_eq!(suggestions.len(), 1);
        let project_choice = if scenario.project_count > 1 { scenario.project_choice } else { 1 };
        let microservice_choice =
            if scenario.microservice_count > 1 { scenario.microservice_choice } else { 1 };
        prop_assert_eq!(
            suggestions[0].component_id,
            component_id(project_choice, microservice_choice)
        );

        let request = &suggestions[0].test_model.test_cases[0].requests[0];
        prop_assert_eq!(&request.method, &chosen.method.to_uppercase());
        prop_assert_eq!(&request.path, &chosen.path);

        let expected: BTreeMap<String, String> = chosen
            .path_parameter_names
            .iter()
            .cloned()
            .zip(scenario.values.iter().cloned())
            .collect();
        prop_assert_eq!(&request.path_params, &expected);
        let unresolved = request.url().contains('{');
        prop_assert!(!unresolved);
    }

    #[test]
    fn out_of_range_choice_never_moves(
        (count, answer) in (2usize..5).prop_flat_map(|count| {
            let max = i64::try_from(count).unwrap();
            (Just(count), prop_oneof![(max + 1)..1000, -1000i64..1])
        }),
        repeats in 1usize..5,
    ) {
        let scenario = Scenario {
            project_count: count,
            project_choice: 1,
            microservice_count: 1,
            microservice_choice: 1,
            operations: Vec::new(),
            operation_choice: 1,
            values: Vec::new(),
        };
        let (directory, specs) = setup(&scenario);
        let finalizer = Arc::new(RecordingFinalizer::new());
        let engine = engine(&directory, &specs, &finalizer);

        let (replies, state) = run(async {
            say(&engine, "model a test", "modeltest").await;
            let mut replies = Vec::new();
            for _ in 0..repeats {
                replies.push(say(&engine, &answer.to_string(), "none").await);
            }
            let state = engine.store().checkout(CHANNEL, Dialect::Chat).await.state();
            (replies, state)
        });

        prop_assert_eq!(state, DialogueState::SelectProject);
        let expected = format!(":warning:Please enter a number between 1 and {count}!:warning:");
        for reply in &replies {
            prop_assert_eq!(&reply.text, &expected);
            prop_assert!(!reply.closed);
        }
        prop_assert_eq!(directory.call_count(), 1);
    }
}
