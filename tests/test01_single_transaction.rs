#![cfg(feature = "test-utils")]

use cypher_middleware::prelude::*;
use cypher_middleware::test_utils::{MemoryGraph, codes};

fn single_column(column: &str, value: CypherValue) -> ResultData {
    ResultData::from_rows(vec![column.to_owned()], vec![vec![value]])
}

#[test]
fn executes_statements_in_single_transaction() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph.clone());

    let result = client.run_single_transaction(&[
        "MATCH (n) RETURN COUNT(n)",
        "CREATE (n:Bolt {name: 'Usain'}) RETURN n.name",
    ]);

    let data = result.expect("both statements should succeed");
    assert_eq!(
        data,
        vec![
            single_column("COUNT(n)", CypherValue::Int(0)),
            single_column("n.name", CypherValue::Text("Usain".into())),
        ]
    );
    assert_eq!(graph.node_count(), 1, "the creation must be committed");
}

#[test]
fn returns_errors_from_invalid_statements() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph);

    let result = client.run_single_transaction(&[
        "MATCH (n) RETURN COUNT(n)",
        "JEU, SET et MATCH -- oops not a valid query",
    ]);

    let errors = result.expect_err("the second statement is not valid");
    assert_eq!(
        errors,
        vec![ResultError::new(
            codes::SYNTAX_ERROR,
            "Invalid input 'J': expected CREATE, MATCH or RETURN (line 1, column 1 \
             (offset: 0))\n\"JEU, SET et MATCH -- oops not a valid query\"\n ^",
        )]
    );
}

#[test]
fn rolls_back_the_whole_batch_on_failure() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph.clone());

    let result = client
        .run_single_transaction(&["CREATE (n:Bolt {name: 'Usain'})", "not cypher at all"]);

    assert!(result.is_err());
    assert_eq!(
        graph.node_count(),
        0,
        "no write from the failed batch may persist"
    );
}

#[test]
fn results_come_back_in_input_order() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph);

    let data = client
        .run_single_transaction(&[
            "RETURN 1 AS first",
            "CREATE (n:Seq {pos: 2}) RETURN n.pos",
            "MATCH (n:Seq) RETURN COUNT(n)",
            "RETURN 'last' AS tail",
        ])
        .expect("all statements should succeed");

    assert_eq!(
        data,
        vec![
            single_column("first", CypherValue::Int(1)),
            single_column("n.pos", CypherValue::Int(2)),
            single_column("COUNT(n)", CypherValue::Int(1)),
            single_column("tail", CypherValue::Text("last".into())),
        ]
    );
}

#[test]
fn statements_without_a_return_produce_empty_result_sets() {
    let graph = MemoryGraph::new();
    let client = EmbeddedClient::new(graph);

    let data = client
        .run_single_transaction(&["CREATE (n:Quiet)"])
        .expect("the statement should succeed");

    assert_eq!(data.len(), 1);
    assert!(data[0].columns.is_empty());
    assert!(data[0].is_empty());
}
