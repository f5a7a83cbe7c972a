//! Property-based tests for the operator model

use super::operator::OperatorKind;
use super::*;
use proptest::prelude::*;

fn arb_expected_type() -> impl Strategy<Value = ExpectedType> {
    prop_oneof![
        Just(ExpectedType::JsonObject),
        Just(ExpectedType::JsonArray),
        Just(ExpectedType::String),
        Just(ExpectedType::Number),
        Just(ExpectedType::Boolean),
    ]
}

fn arb_leaf() -> impl Strategy<Value = BodyAssertionOperator> {
    prop_oneof![
        arb_expected_type().prop_map(BodyAssertionOperator::type_check),
        "[a-z]{1,8}".prop_map(BodyAssertionOperator::has_field),
    ]
}

fn arb_node() -> impl Strategy<Value = BodyAssertionOperator> {
    arb_leaf().prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(BodyAssertionOperator::any_list_entry),
            inner.prop_map(BodyAssertionOperator::all_list_entries),
        ]
    })
}

fn count_nodes(op: &BodyAssertionOperator) -> u32 {
    let own = match op.kind() {
        OperatorKind::AnyListEntry { operand } | OperatorKind::AllListEntries { operand } => {
            1 + count_nodes(operand)
        }
        OperatorKind::TypeCheck { .. } | OperatorKind::HasField { .. } => 1,
    };
    own + op.followed_by().map_or(0, count_nodes)
}

proptest! {
    #[test]
    fn linking_in_order_matches_nested_linking(nodes in proptest::collection::vec(arb_node(), 1..6)) {
        let mut appended = nodes[0].clone();
        for node in &nodes[1..] {
            appended.link(node.clone());
        }

        let mut linked: Option<BodyAssertionOperator> = None;
        for node in nodes.iter().rev() {
            linked = Some(match linked {
                None => node.clone(),
                Some(rest) => node.clone().then(rest),
            });
        }
        let linked = linked.unwrap();

        prop_assert_eq!(appended.chain_len(), nodes.len());
        prop_assert_eq!(appended.to_string(), linked.to_string());
        prop_assert_eq!(appended, linked);
    }

    #[test]
    fn ids_cover_every_node_once(nodes in proptest::collection::vec(arb_node(), 1..6)) {
        let mut chain = nodes[0].clone();
        for node in &nodes[1..] {
            chain.link(node.clone());
        }
        let before = chain.to_string();

        let mut next_id = 0;
        chain.assign_ids(&mut next_id);

        prop_assert_eq!(next_id, count_nodes(&chain));
        prop_assert_eq!(chain.id(), Some(0));
        // Numbering never leaks into the rendered text
        prop_assert_eq!(chain.to_string(), before);
    }

    #[test]
    fn tail_never_has_successor(nodes in proptest::collection::vec(arb_node(), 1..6)) {
        let mut chain = nodes[0].clone();
        for node in &nodes[1..] {
            chain.link(node.clone());
        }
        prop_assert!(chain.tail().followed_by().is_none());
        prop_assert_eq!(chain.tail().to_string(), nodes[nodes.len() - 1].to_string());
    }
}
