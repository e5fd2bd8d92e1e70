use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::engine::{EngineCursor, EngineError, EngineTransaction, GraphEngine};
use crate::types::CypherValue;

use super::codes;
use super::parser::{self, Expr, NodePattern, Projection, Statement};

/// A node stored by [`MemoryGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    /// Engine-assigned id, unique for the lifetime of the graph
    pub id: u64,
    /// Labels in pattern order
    pub labels: Vec<String>,
    /// Property map
    pub properties: BTreeMap<String, CypherValue>,
}

#[derive(Debug, Default)]
struct Store {
    nodes: Vec<MemoryNode>,
}

/// In-memory property graph engine.
///
/// Cloning returns another handle to the same graph, so a test can keep a
/// handle for verification while the client owns its own. Reads outside a
/// transaction (the `node_count` family) see committed state only.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    store: Arc<RwLock<Store>>,
    ids: Arc<AtomicU64>,
}

impl MemoryGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.read().nodes.len()
    }

    /// Number of committed nodes carrying the given label.
    #[must_use]
    pub fn node_count_with_label(&self, label: &str) -> usize {
        self.read()
            .nodes
            .iter()
            .filter(|node| node.labels.iter().any(|l| l == label))
            .count()
    }

    /// Snapshot of every committed node.
    #[must_use]
    pub fn nodes(&self) -> Vec<MemoryNode> {
        self.read().nodes.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GraphEngine for MemoryGraph {
    type Tx = MemoryTransaction;

    fn begin(&self) -> Result<MemoryTransaction, EngineError> {
        Ok(MemoryTransaction {
            store: Arc::clone(&self.store),
            ids: Arc::clone(&self.ids),
            staged: Vec::new(),
        })
    }
}

/// Transaction over [`MemoryGraph`].
///
/// Creations stage locally and publish on commit; dropping the transaction
/// discards them, so an abandoned handle behaves like a rollback. Reads see
/// committed state plus this transaction's own staged writes.
#[derive(Debug)]
pub struct MemoryTransaction {
    store: Arc<RwLock<Store>>,
    ids: Arc<AtomicU64>,
    staged: Vec<MemoryNode>,
}

impl EngineTransaction for MemoryTransaction {
    fn run(&mut self, statement: &str) -> Result<EngineCursor, EngineError> {
        match parser::parse(statement)? {
            Statement::Create {
                pattern,
                projections,
            } => self.eval_create(pattern, &projections),
            Statement::Match {
                pattern,
                projections,
            } => self.eval_match(&pattern, &projections),
            Statement::Bare { projections } => eval_bare(&projections),
        }
    }

    fn commit(mut self) -> Result<(), EngineError> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.nodes.append(&mut self.staged);
        Ok(())
    }

    fn rollback(self) -> Result<(), EngineError> {
        // Staged nodes are dropped with the transaction.
        Ok(())
    }
}

impl MemoryTransaction {
    fn eval_create(
        &mut self,
        pattern: NodePattern,
        projections: &[Projection],
    ) -> Result<EngineCursor, EngineError> {
        // Validate projections before staging: a failed statement must not
        // leave staged writes behind.
        for projection in projections {
            match &projection.expr {
                Expr::Count { .. } => {
                    return Err(semantic_error(
                        "aggregation is not allowed in a CREATE projection",
                    ));
                }
                Expr::Property { variable, .. } if *variable != pattern.variable => {
                    return Err(undefined_variable(variable));
                }
                _ => {}
            }
        }
        let node = MemoryNode {
            id: self.ids.fetch_add(1, Ordering::Relaxed),
            labels: pattern.labels,
            properties: pattern.properties.into_iter().collect(),
        };
        let cursor = if projections.is_empty() {
            EngineCursor::empty()
        } else {
            let values = projections
                .iter()
                .map(|projection| match &projection.expr {
                    Expr::Property { key, .. } => property_or_null(&node, key),
                    Expr::Literal(value) => value.clone(),
                    Expr::Count { .. } => unreachable!("rejected above"),
                })
                .collect();
            EngineCursor::new(columns_of(projections), vec![values])
        };
        self.staged.push(node);
        Ok(cursor)
    }

    fn eval_match(
        &self,
        pattern: &NodePattern,
        projections: &[Projection],
    ) -> Result<EngineCursor, EngineError> {
        for projection in projections {
            match &projection.expr {
                Expr::Count { variable } | Expr::Property { variable, .. }
                    if *variable != pattern.variable =>
                {
                    return Err(undefined_variable(variable));
                }
                _ => {}
            }
        }
        let has_count = projections
            .iter()
            .any(|p| matches!(p.expr, Expr::Count { .. }));
        if has_count
            && projections
                .iter()
                .any(|p| matches!(p.expr, Expr::Property { .. }))
        {
            return Err(semantic_error(
                "cannot mix COUNT with per-node projections",
            ));
        }

        let matched: Vec<MemoryNode> = {
            let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
            store
                .nodes
                .iter()
                .chain(self.staged.iter())
                .filter(|node| node_matches(node, pattern))
                .cloned()
                .collect()
        };

        let rows = if has_count {
            let count = i64::try_from(matched.len()).unwrap_or(i64::MAX);
            vec![
                projections
                    .iter()
                    .map(|projection| match &projection.expr {
                        Expr::Count { .. } => CypherValue::Int(count),
                        Expr::Literal(value) => value.clone(),
                        Expr::Property { .. } => unreachable!("rejected above"),
                    })
                    .collect(),
            ]
        } else {
            matched
                .iter()
                .map(|node| {
                    projections
                        .iter()
                        .map(|projection| match &projection.expr {
                            Expr::Property { key, .. } => property_or_null(node, key),
                            Expr::Literal(value) => value.clone(),
                            Expr::Count { .. } => unreachable!("rejected above"),
                        })
                        .collect()
                })
                .collect()
        };
        Ok(EngineCursor::new(columns_of(projections), rows))
    }
}

fn eval_bare(projections: &[Projection]) -> Result<EngineCursor, EngineError> {
    for projection in projections {
        if let Expr::Count { variable } | Expr::Property { variable, .. } = &projection.expr {
            return Err(undefined_variable(variable));
        }
    }
    let values = projections
        .iter()
        .map(|projection| match &projection.expr {
            Expr::Literal(value) => value.clone(),
            _ => unreachable!("rejected above"),
        })
        .collect();
    Ok(EngineCursor::new(columns_of(projections), vec![values]))
}

fn columns_of(projections: &[Projection]) -> Vec<String> {
    projections.iter().map(|p| p.column.clone()).collect()
}

fn property_or_null(node: &MemoryNode, key: &str) -> CypherValue {
    node.properties
        .get(key)
        .cloned()
        .unwrap_or(CypherValue::Null)
}

fn node_matches(node: &MemoryNode, pattern: &NodePattern) -> bool {
    pattern
        .labels
        .iter()
        .all(|label| node.labels.iter().any(|l| l == label))
        && pattern
            .properties
            .iter()
            .all(|(key, value)| node.properties.get(key) == Some(value))
}

fn semantic_error(message: impl Into<String>) -> EngineError {
    EngineError::new(codes::SEMANTIC_ERROR, message)
}

fn undefined_variable(variable: &str) -> EngineError {
    EngineError::new(
        codes::SYNTAX_ERROR,
        format!("Variable `{variable}` not defined"),
    )
}
