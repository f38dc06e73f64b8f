//! This crate contains a generic engine for
//! [monotone data-flow analyses](https://en.wikipedia.org/wiki/Data-flow_analysis).
//! Given a control flow graph, a merge operator and a per-node flow
//! function, the engine computes the facts holding before and after every
//! node by iterating a worklist until a fixpoint is reached.
//!
//! There is a single fixpoint loop ([`solver::Solver::run_forward`]) that
//! works on path-sensitive nodes, i.e., nodes that distinguish the "taken"
//! and the "not-taken" outcome of a branch. Path-insensitive and backward
//! analyses are implemented by wrapping the graph in views that collapse or
//! reverse the edges (see [`adapters`]), so the same loop serves:
//! * forward, path-sensitive analyses ([`solver::Solver::run_forward`]),
//! * forward, path-insensitive analyses ([`solver::Solver::run_forward_pi`]),
//! * backward, path-insensitive analyses ([`solver::Solver::run_backward_pi`]).
//!
//! Backward path-sensitive analyses are not supported. It is not yet clear
//! what a branch should mean when the graph is traversed backwards.
//!
//! The engine does not check that the merge and flow functions are monotone
//! or that the lattice has a finite height. Those are the responsibility of
//! the caller, otherwise the solver might never terminate. Use
//! [`solver::Solver::node_limit`] to put an upper bound on the work.
//!
//! Some resources to learn more about data-flow analysis:
//! * [Static Program Analysis, Anders Møller and Michael I. Schwartzbach](https://cs.au.dk/~amoeller/spa/)
//! * [Data Flow Analysis: Theory and Practice](https://www.amazon.com/Data-Flow-Analysis-Theory-Practice/dp/0849328802)
//! * [Data flow analysis: an informal introduction](https://clang.llvm.org/docs/DataFlowAnalysisIntro.html)

/// The contract every analysis fact has to satisfy and a helper to merge
/// several facts at once.
pub mod facts;

/// Traits describing the nodes of a control flow graph as seen by the
/// solver.
pub mod node;

/// Views over nodes that reverse the direction of the edges or collapse
/// path-sensitive edges into a single class.
pub mod adapters;

/// A simple owned graph that implements the node traits, together with
/// validation and printing utilities.
pub mod graph;

/// A set based worklist with a configurable visiting order.
pub mod worklist;

/// The fixpoint iteration itself.
pub mod solver;

/// Errors reported for malformed inputs.
pub mod error;

/// Lattice traits and a couple of generic lattices that can be used to
/// build facts.
pub mod domains;

pub use error::{MalformedGraph, SolverError};
pub use facts::{Fact, merge_all};
pub use node::{InsensitiveNode, Label, SensitiveNode};
pub use solver::{Flows, ForwardFlows, Solver};

#[cfg(test)]
mod test_utils;


#[cfg(test)]
mod adapters_tests;





#[cfg(test)]
mod domains_tests;
