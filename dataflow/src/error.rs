use thiserror::Error;

use crate::graph::EdgeKind;
use crate::node::Label;

/// Violations of the input contract of the solver. These are caller bugs,
/// the solver refuses to run instead of computing garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedGraph {
    #[error("node {node} has an edge to {target}, which is not part of the graph")]
    DanglingEdge { node: Label, target: Label },
    #[error("label {label} is not present in both the id list and the node map")]
    DomainMismatch { label: Label },
    #[error("node stored under key {key} reports label {label}")]
    LabelMismatch { key: Label, label: Label },
    #[error("entry label {label} is not part of the graph")]
    UnknownEntry { label: Label },
    #[error("{kind:?} edge {from} -> {to} is not listed on both ends")]
    AsymmetricEdge {
        from: Label,
        to: Label,
        kind: EdgeKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("malformed graph: {0}")]
    Malformed(#[from] MalformedGraph),
    #[error("the analysis did not converge after {evaluations} node evaluations")]
    Diverged { evaluations: usize },
}
