use std::collections::{BTreeMap, BTreeSet};

use crate::adapters::{Reversed, Sensitized};
use crate::error::SolverError;
use crate::facts::{Fact, merge_all};
use crate::graph::validate;
use crate::node::{InsensitiveNode, Label, SensitiveNode};
use crate::worklist::{VisitOrder, Worklist};

/// The result of a path-sensitive analysis. Every map is defined for every
/// label of the analyzed graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardFlows<F> {
    /// The merged fact flowing into each node.
    pub in_facts: BTreeMap<Label, F>,
    /// The fact leaving each node along its not-taken edges.
    pub out_not_taken: BTreeMap<Label, F>,
    /// The fact leaving each node along its taken edges.
    pub out_taken: BTreeMap<Label, F>,
}

impl<F: Fact> ForwardFlows<F> {
    /// Every slot starts out as `initial_flow`, except for the incoming
    /// facts of the entries, which start out as `entry_flow`.
    pub fn seeded(entry_ids: &[Label], ids: &[Label], initial_flow: &F, entry_flow: &F) -> Self {
        let initial: BTreeMap<Label, F> = ids.iter().map(|&id| (id, initial_flow.clone())).collect();
        let mut in_facts = initial.clone();
        for &id in entry_ids {
            in_facts.insert(id, entry_flow.clone());
        }
        Self {
            in_facts,
            out_not_taken: initial.clone(),
            out_taken: initial,
        }
    }
}

/// The result of a path-insensitive analysis. For backward analyses the
/// incoming facts are the ones holding right before the node in program
/// order, the outgoing facts are the ones holding right after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flows<F> {
    pub in_facts: BTreeMap<Label, F>,
    pub out_facts: BTreeMap<Label, F>,
}

/// A worklist based solver for monotone data-flow problems.
///
/// Requirements:
/// * `merge` is commutative, associative and idempotent.
/// * `merge` and `flow` are monotone and the lattice has a finite height,
///   otherwise the solver might never terminate. This is not checked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Solver {
    /// Set the approximate number of evaluations permitted per node. If
    /// the limit is reached the solver gives up with
    /// [`SolverError::Diverged`]. Zero means there is no limit.
    pub node_limit: usize,
    /// The order in which queued nodes are evaluated.
    pub order: VisitOrder,
}

impl Solver {
    /// Compute a path-sensitive forward analysis.
    ///
    /// # Arguments
    ///
    /// * `entry_ids` - Nodes where `entry_flow` is merged into the incoming facts.
    /// * `ids` - All the nodes of the graph, the same set as the keys of `id_to_node`.
    /// * `merge` - Combines the facts of the predecessors.
    /// * `flow` - Computes the not-taken and the taken outgoing facts of a node
    ///   from its incoming fact. Returning `None` means nothing flows along
    ///   that class of edges.
    /// * `initial_flow` - The starting value of every fact, and the result of
    ///   merging no facts at all.
    /// * `entry_flow` - The boundary condition at the entries.
    #[allow(clippy::too_many_arguments)]
    pub fn run_forward<N, F, M, T>(
        &self,
        entry_ids: &[Label],
        ids: &[Label],
        id_to_node: &BTreeMap<Label, N>,
        merge: M,
        flow: T,
        initial_flow: F,
        entry_flow: F,
    ) -> Result<ForwardFlows<F>, SolverError>
    where
        N: SensitiveNode,
        F: Fact,
        M: FnMut(&F, &F) -> F,
        T: FnMut(&F, &N) -> (Option<F>, Option<F>),
    {
        let mut flows = ForwardFlows::seeded(entry_ids, ids, &initial_flow, &entry_flow);
        self.solve_in_place(
            entry_ids,
            ids,
            id_to_node,
            merge,
            flow,
            &initial_flow,
            &entry_flow,
            &mut flows,
        )?;
        Ok(flows)
    }

    /// Same as [`Solver::run_forward`], but the facts start out from the
    /// values in `flows` instead of `initial_flow`. Missing slots are filled
    /// in the same way [`ForwardFlows::seeded`] would, slots of labels
    /// outside `ids` are removed. Returns the number of node evaluations.
    #[allow(clippy::too_many_arguments)]
    pub fn solve_in_place<N, F, M, T>(
        &self,
        entry_ids: &[Label],
        ids: &[Label],
        id_to_node: &BTreeMap<Label, N>,
        mut merge: M,
        mut flow: T,
        initial_flow: &F,
        entry_flow: &F,
        flows: &mut ForwardFlows<F>,
    ) -> Result<usize, SolverError>
    where
        N: SensitiveNode,
        F: Fact,
        M: FnMut(&F, &F) -> F,
        T: FnMut(&F, &N) -> (Option<F>, Option<F>),
    {
        validate(entry_ids, ids, id_to_node)?;
        log::debug!(
            target: "dataflow",
            "solving over {} nodes with {} entries",
            id_to_node.len(),
            entry_ids.len()
        );

        let entries: BTreeSet<Label> = entry_ids.iter().copied().collect();
        complete(flows, &entries, id_to_node, initial_flow, entry_flow);

        let mut worklist = Worklist::new(self.order, entry_ids, ids, id_to_node);
        worklist.extend(ids);

        let limit = self.node_limit.saturating_mul(id_to_node.len());
        let mut evaluations = 0_usize;
        while let Some(current) = worklist.pop() {
            if limit > 0 && evaluations >= limit {
                log::warn!(
                    target: "dataflow",
                    "giving up after {evaluations} evaluations, {} nodes are still queued",
                    worklist.len() + 1
                );
                return Err(SolverError::Diverged { evaluations });
            }
            evaluations += 1;

            let node = &id_to_node[&current];
            let incoming = node
                .preds_not_taken()
                .iter()
                .map(|pred| &flows.out_not_taken[pred])
                .chain(node.preds_taken().iter().map(|pred| &flows.out_taken[pred]))
                .chain(entries.contains(&current).then_some(entry_flow));
            let in_fact = merge_all(&mut merge, incoming, initial_flow);
            log::trace!(target: "dataflow", "node {current}: in = {in_fact:?}");

            let (not_taken, taken) = flow(&in_fact, node);
            flows.in_facts.insert(current, in_fact);

            if let Some(fact) = not_taken {
                if flows.out_not_taken.get(&current) != Some(&fact) {
                    log::trace!(target: "dataflow", "node {current}: not-taken out = {fact:?}");
                    flows.out_not_taken.insert(current, fact);
                    worklist.extend(node.succs_not_taken());
                }
            }

            if let Some(fact) = taken {
                if flows.out_taken.get(&current) != Some(&fact) {
                    log::trace!(target: "dataflow", "node {current}: taken out = {fact:?}");
                    flows.out_taken.insert(current, fact);
                    worklist.extend(node.succs_taken());
                }
            }
        }

        log::debug!(target: "dataflow", "fixpoint reached after {evaluations} evaluations");
        Ok(evaluations)
    }

    /// Compute a path-insensitive forward analysis. The nodes are presented
    /// to the solver as path-sensitive nodes without taken edges.
    #[allow(clippy::too_many_arguments)]
    pub fn run_forward_pi<N, F, M, T>(
        &self,
        entry_ids: &[Label],
        ids: &[Label],
        id_to_node: &BTreeMap<Label, N>,
        merge: M,
        mut flow: T,
        initial_flow: F,
        entry_flow: F,
    ) -> Result<Flows<F>, SolverError>
    where
        N: InsensitiveNode,
        F: Fact,
        M: FnMut(&F, &F) -> F,
        T: FnMut(&F, &N) -> F,
    {
        let sensitized: BTreeMap<Label, Sensitized<&N>> = id_to_node
            .iter()
            .map(|(&label, node)| (label, Sensitized(node)))
            .collect();

        // Nothing flows along taken edges, there are none.
        let flows = self.run_forward(
            entry_ids,
            ids,
            &sensitized,
            merge,
            |fact, node| (Some(flow(fact, node.0)), None),
            initial_flow,
            entry_flow,
        )?;

        Ok(Flows {
            in_facts: flows.in_facts,
            out_facts: flows.out_not_taken,
        })
    }

    /// Compute a path-insensitive backward analysis. The solver runs forward
    /// over the reversed graph, the facts flowing out of a reversed node are
    /// the facts flowing into the original node and vice versa. There is no
    /// separate boundary condition, every node starts out from
    /// `initial_flow`.
    pub fn run_backward_pi<N, F, M, T>(
        &self,
        ids: &[Label],
        id_to_node: &BTreeMap<Label, N>,
        merge: M,
        flow: T,
        initial_flow: F,
    ) -> Result<Flows<F>, SolverError>
    where
        N: InsensitiveNode,
        F: Fact,
        M: FnMut(&F, &F) -> F,
        T: FnMut(&F, &N) -> F,
    {
        let exit_flow = initial_flow.clone();
        self.run_backward_pi_with_exits(&[], ids, id_to_node, merge, flow, initial_flow, exit_flow)
    }

    /// Same as [`Solver::run_backward_pi`], but `exit_flow` is merged into
    /// the facts flowing out of the nodes in `exit_ids`. This is the
    /// backward counterpart of the entries of a forward analysis.
    #[allow(clippy::too_many_arguments)]
    pub fn run_backward_pi_with_exits<N, F, M, T>(
        &self,
        exit_ids: &[Label],
        ids: &[Label],
        id_to_node: &BTreeMap<Label, N>,
        merge: M,
        mut flow: T,
        initial_flow: F,
        exit_flow: F,
    ) -> Result<Flows<F>, SolverError>
    where
        N: InsensitiveNode,
        F: Fact,
        M: FnMut(&F, &F) -> F,
        T: FnMut(&F, &N) -> F,
    {
        let reversed: BTreeMap<Label, Reversed<Sensitized<&N>>> = id_to_node
            .iter()
            .map(|(&label, node)| (label, Reversed(Sensitized(node))))
            .collect();

        let flows = self.run_forward(
            exit_ids,
            ids,
            &reversed,
            merge,
            |fact, node| (Some(flow(fact, node.0.0)), None),
            initial_flow,
            exit_flow,
        )?;

        Ok(Flows {
            in_facts: flows.out_not_taken,
            out_facts: flows.in_facts,
        })
    }
}

/// Make sure every label of the graph has all three slots, and nothing else
/// does.
fn complete<N, F: Fact>(
    flows: &mut ForwardFlows<F>,
    entries: &BTreeSet<Label>,
    id_to_node: &BTreeMap<Label, N>,
    initial_flow: &F,
    entry_flow: &F,
) {
    for map in [
        &mut flows.in_facts,
        &mut flows.out_not_taken,
        &mut flows.out_taken,
    ] {
        map.retain(|label, _| id_to_node.contains_key(label));
    }
    for &label in id_to_node.keys() {
        flows.in_facts.entry(label).or_insert_with(|| {
            if entries.contains(&label) {
                entry_flow.clone()
            } else {
                initial_flow.clone()
            }
        });
        flows.out_not_taken.entry(label).or_insert_with(|| initial_flow.clone());
        flows.out_taken.entry(label).or_insert_with(|| initial_flow.clone());
    }
}
