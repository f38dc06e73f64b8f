use core::cmp::Reverse;
use std::collections::BTreeMap;

use fixedbitset::FixedBitSet;
use priority_queue::PriorityQueue;

use crate::node::{Label, SensitiveNode};

/// The order in which the queued nodes are visited. The order has no
/// effect on the computed fixpoint as long as the analysis is monotone,
/// it only changes how many times the nodes are re-evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisitOrder {
    /// Visit the node with the smallest label first.
    Label,
    /// Visit the nodes in reverse post-order, so a node is usually visited
    /// after its predecessors.
    #[default]
    ReversePostOrder,
}

/// A worklist behaves like a set, a node that is already queued is not
/// queued again. The next node to visit is the queued node with the
/// smallest rank.
#[derive(Clone, Debug)]
pub struct Worklist {
    queue: PriorityQueue<Label, Reverse<usize>>,
    rank: BTreeMap<Label, usize>,
}

impl Worklist {
    /// Create an empty worklist for the nodes in `ids`. The ranks are
    /// computed eagerly, labels outside `ids` cannot be queued.
    pub fn new<N: SensitiveNode>(
        order: VisitOrder,
        entry_ids: &[Label],
        ids: &[Label],
        id_to_node: &BTreeMap<Label, N>,
    ) -> Self {
        let order = match order {
            VisitOrder::Label => sorted_labels(ids),
            VisitOrder::ReversePostOrder => reverse_post_order(entry_ids, ids, id_to_node),
        };
        let rank = order.into_iter().enumerate().map(|(pos, id)| (id, pos)).collect();
        Self {
            queue: PriorityQueue::with_capacity(ids.len()),
            rank,
        }
    }

    pub fn push(&mut self, label: Label) {
        self.queue.push(label, Reverse(self.rank[&label]));
    }

    pub fn extend(&mut self, labels: &[Label]) {
        for &label in labels {
            self.push(label);
        }
    }

    pub fn pop(&mut self) -> Option<Label> {
        self.queue.pop().map(|(label, _)| label)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.queue.get(&label).is_some()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The position of the node in the visiting order.
    pub fn rank(&self, label: Label) -> usize {
        self.rank[&label]
    }
}

/// Depth first traversal following both edge classes. Not-taken successors
/// come before taken ones in the resulting order, and among successors of
/// the same class the first listed comes first. The traversal starts from
/// the entries, then from the nodes without predecessors, and finally from
/// whatever is left unvisited, so every node in `ids` gets a position. The
/// trees of the traversal are ordered the same way.
pub fn reverse_post_order<N: SensitiveNode>(
    entry_ids: &[Label],
    ids: &[Label],
    id_to_node: &BTreeMap<Label, N>,
) -> Vec<Label> {
    let sorted_ids = sorted_labels(ids);
    // Labels can be sparse, the visited set is indexed by position.
    let position: BTreeMap<Label, usize> =
        sorted_ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
    let mut visited = FixedBitSet::with_capacity(sorted_ids.len());
    let mut order = Vec::with_capacity(sorted_ids.len());
    let mut post_order = Vec::new();

    let is_root = |id: &Label| {
        let node = &id_to_node[id];
        node.preds_not_taken().is_empty() && node.preds_taken().is_empty()
    };
    let roots = entry_ids
        .iter()
        .copied()
        .chain(sorted_ids.iter().copied().filter(is_root))
        .chain(sorted_ids.iter().copied());

    for root in roots {
        if visited.put(position[&root]) {
            continue;
        }
        let mut stack = vec![(root, 0_usize)];
        while let Some(top) = stack.last_mut() {
            let (label, cursor) = *top;
            let node = &id_to_node[&label];
            let not_taken = node.succs_not_taken();
            let taken = node.succs_taken();
            if cursor < not_taken.len() + taken.len() {
                top.1 += 1;
                // Visit the successors backwards, so the first listed
                // successor ends up first in the reverse post-order.
                let idx = not_taken.len() + taken.len() - 1 - cursor;
                let succ = if idx < not_taken.len() {
                    not_taken[idx]
                } else {
                    taken[idx - not_taken.len()]
                };
                if !visited.put(position[&succ]) {
                    stack.push((succ, 0));
                }
            } else {
                post_order.push(label);
                stack.pop();
            }
        }
        order.extend(post_order.drain(..).rev());
    }

    order
}

fn sorted_labels(ids: &[Label]) -> Vec<Label> {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}
