use crate::graph::{EdgeKind, Graph, InsensitiveBlock, SensitiveBlock};
use crate::node::Label;

pub fn init_logger() {
    let _ = env_logger::Builder::from_env("DATAFLOW_TRACE")
        .format_timestamp(None)
        .is_test(true)
        .try_init();
}

pub type TestCfg = Graph<InsensitiveBlock<()>>;
pub type TestBranchCfg = Graph<SensitiveBlock<()>>;

/// Create a path-insensitive graph with `size` nodes labeled from 0.
pub fn test_cfg(size: usize) -> TestCfg {
    let mut cfg = TestCfg::new();
    for _ in 0..size {
        cfg.add_node(());
    }
    cfg
}

/// Create a path-sensitive graph with `size` nodes labeled from 0.
pub fn test_branch_cfg(size: usize) -> TestBranchCfg {
    let mut cfg = TestBranchCfg::new();
    for _ in 0..size {
        cfg.add_node(());
    }
    cfg
}

///     0
///    / \
///   1   2
///   |   |
///   |   3
///    \ /
///     4
pub fn diamond() -> TestCfg {
    let mut cfg = test_cfg(5);
    cfg.add_edge(0, 1)
        .add_edge(0, 2)
        .add_edge(1, 4)
        .add_edge(2, 3)
        .add_edge(3, 4);
    cfg
}

/// The same shape as [`diamond`], with every edge classified as not-taken.
pub fn branch_diamond() -> TestBranchCfg {
    let mut cfg = test_branch_cfg(5);
    for (from, to) in [(0, 1), (0, 2), (1, 4), (2, 3), (3, 4)] {
        cfg.add_edge(from, to, EdgeKind::NotTaken);
    }
    cfg
}

///     0 <---
///     |    |
///     1    |
///    / \   |
///   2   3--|
///   |
///   4
pub fn looping() -> TestCfg {
    let mut cfg = test_cfg(5);
    cfg.add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(1, 3)
        .add_edge(3, 0)
        .add_edge(2, 4);
    cfg
}

/// A transfer function for "which nodes might have been visited" analyses
/// over sorted label vectors.
pub fn visited_flow(fact: &[Label], label: Label) -> Vec<Label> {
    let mut result = fact.to_vec();
    if let Err(pos) = result.binary_search(&label) {
        result.insert(pos, label);
    }
    result
}

pub fn union(a: &[Label], b: &[Label]) -> Vec<Label> {
    let mut result = a.to_vec();
    for &label in b {
        if let Err(pos) = result.binary_search(&label) {
            result.insert(pos, label);
        }
    }
    result
}
