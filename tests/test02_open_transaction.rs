#![cfg(feature = "test-utils")]

use cypher_middleware::prelude::*;
use cypher_middleware::test_utils::{MemoryGraph, codes};

#[test]
fn opens_transaction() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph);

    let tx = client
        .open_transaction(&["RETURN [1, 2, 3] AS x"])
        .expect("open should succeed");

    assert_eq!(
        tx.result_data(),
        &[ResultData::from_rows(
            vec!["x".to_owned()],
            vec![vec![CypherValue::List(vec![
                CypherValue::Int(1),
                CypherValue::Int(2),
                CypherValue::Int(3),
            ])]],
        )]
    );
}

#[test]
fn executes_in_open_transaction() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph);

    let mut tx = client.open_transaction(&[]).expect("open should succeed");
    client
        .execute(&mut tx, &["RETURN [4, 5, 6] AS x"])
        .expect("execute should succeed");

    assert_eq!(
        tx.result_data(),
        &[ResultData::from_rows(
            vec!["x".to_owned()],
            vec![vec![CypherValue::List(vec![
                CypherValue::Int(4),
                CypherValue::Int(5),
                CypherValue::Int(6),
            ])]],
        )]
    );
}

#[test]
fn failed_statement_leaves_the_transaction_open() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph.clone());

    let mut tx = client
        .open_transaction(&["CREATE (n:Keep {seq: 1})"])
        .expect("open should succeed");
    let errors = client
        .execute(&mut tx, &["THIS IS NOT CYPHER"])
        .expect_err("the statement is invalid");
    assert_eq!(errors[0].code, codes::SYNTAX_ERROR);

    // The handle stays usable and the earlier write is still pending.
    client
        .execute(&mut tx, &["CREATE (n:Keep {seq: 2})"])
        .expect("the transaction should still accept statements");
    let closed = client.commit(tx, &[]).expect("commit should succeed");
    assert!(!closed.is_rolled_back());
    assert_eq!(graph.node_count_with_label("Keep"), 2);
}

#[test]
fn failed_open_leaves_no_transaction_behind() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph.clone());

    let errors = client
        .open_transaction(&["CREATE (n:Gone {seq: 1})", "BOGUS"])
        .expect_err("the second statement is invalid");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        graph.node_count(),
        0,
        "a failed open must not leave uncommitted writes behind"
    );
}
