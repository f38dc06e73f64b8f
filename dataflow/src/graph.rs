use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::error::MalformedGraph;
use crate::node::{InsensitiveNode, Label, SensitiveNode};

/// The two classes of edges in a path-sensitive graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    NotTaken,
    Taken,
}

/// A node of a path-sensitive [`Graph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensitiveBlock<S> {
    label: Label,
    preds_not_taken: Vec<Label>,
    preds_taken: Vec<Label>,
    succs_not_taken: Vec<Label>,
    succs_taken: Vec<Label>,
    stmt: S,
}

impl<S> SensitiveBlock<S> {
    pub fn new(label: Label, stmt: S) -> Self {
        Self {
            label,
            preds_not_taken: Vec::new(),
            preds_taken: Vec::new(),
            succs_not_taken: Vec::new(),
            succs_taken: Vec::new(),
            stmt,
        }
    }
}

impl<S> SensitiveNode for SensitiveBlock<S> {
    type Stmt = S;

    fn label(&self) -> Label {
        self.label
    }

    fn preds_not_taken(&self) -> &[Label] {
        &self.preds_not_taken
    }

    fn preds_taken(&self) -> &[Label] {
        &self.preds_taken
    }

    fn succs_not_taken(&self) -> &[Label] {
        &self.succs_not_taken
    }

    fn succs_taken(&self) -> &[Label] {
        &self.succs_taken
    }

    fn stmt(&self) -> &S {
        &self.stmt
    }
}

/// A node of a path-insensitive [`Graph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsensitiveBlock<S> {
    label: Label,
    preds: Vec<Label>,
    succs: Vec<Label>,
    stmt: S,
}

impl<S> InsensitiveBlock<S> {
    pub fn new(label: Label, stmt: S) -> Self {
        Self {
            label,
            preds: Vec::new(),
            succs: Vec::new(),
            stmt,
        }
    }
}

impl<S> InsensitiveNode for InsensitiveBlock<S> {
    type Stmt = S;

    fn label(&self) -> Label {
        self.label
    }

    fn preds(&self) -> &[Label] {
        &self.preds
    }

    fn succs(&self) -> &[Label] {
        &self.succs
    }

    fn stmt(&self) -> &S {
        &self.stmt
    }
}

/// An owning control flow graph. The edges are stored as labels on both
/// ends, adding an edge always updates the successor list of the source
/// and the predecessor list of the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<N> {
    nodes: BTreeMap<Label, N>,
    next_label: Label,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_label: 0,
        }
    }
}

impl<N> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// All the labels in ascending order.
    pub fn ids(&self) -> Vec<Label> {
        self.nodes.keys().copied().collect()
    }

    pub fn nodes(&self) -> &BTreeMap<Label, N> {
        &self.nodes
    }

    pub fn node(&self, label: Label) -> Option<&N> {
        self.nodes.get(&label)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, label: Label, node: N) -> Label {
        self.nodes.insert(label, node);
        self.next_label = self.next_label.max(label.saturating_add(1));
        label
    }

    fn node_mut(&mut self, label: Label) -> &mut N {
        self.nodes
            .get_mut(&label)
            .unwrap_or_else(|| panic!("label {label} is not part of the graph"))
    }
}

impl<S> Graph<SensitiveBlock<S>> {
    /// Add a node with the next unused label.
    pub fn add_node(&mut self, stmt: S) -> Label {
        self.insert_node(self.next_label, stmt)
    }

    /// Add (or replace) a node with an explicit label. Replacing a node
    /// drops its edges, on both ends.
    pub fn insert_node(&mut self, label: Label, stmt: S) -> Label {
        if let Some(old) = self.nodes.remove(&label) {
            let links = [
                (old.succs_not_taken, EdgeKind::NotTaken, true),
                (old.succs_taken, EdgeKind::Taken, true),
                (old.preds_not_taken, EdgeKind::NotTaken, false),
                (old.preds_taken, EdgeKind::Taken, false),
            ];
            for (neighbours, kind, outgoing) in links {
                for neighbour in neighbours {
                    let Some(node) = self.nodes.get_mut(&neighbour) else {
                        continue;
                    };
                    let list = match (kind, outgoing) {
                        (EdgeKind::NotTaken, true) => &mut node.preds_not_taken,
                        (EdgeKind::Taken, true) => &mut node.preds_taken,
                        (EdgeKind::NotTaken, false) => &mut node.succs_not_taken,
                        (EdgeKind::Taken, false) => &mut node.succs_taken,
                    };
                    list.retain(|&other| other != label);
                }
            }
        }
        self.insert(label, SensitiveBlock::new(label, stmt))
    }

    /// # Panics
    ///
    /// Panics if any of the endpoints is not in the graph.
    pub fn add_edge(&mut self, from: Label, to: Label, kind: EdgeKind) -> &mut Self {
        assert!(self.nodes.contains_key(&to), "label {to} is not part of the graph");
        let source = self.node_mut(from);
        match kind {
            EdgeKind::NotTaken => source.succs_not_taken.push(to),
            EdgeKind::Taken => source.succs_taken.push(to),
        }
        let target = self.node_mut(to);
        match kind {
            EdgeKind::NotTaken => target.preds_not_taken.push(from),
            EdgeKind::Taken => target.preds_taken.push(from),
        }
        self
    }
}

impl<S> Graph<InsensitiveBlock<S>> {
    /// Add a node with the next unused label.
    pub fn add_node(&mut self, stmt: S) -> Label {
        self.insert_node(self.next_label, stmt)
    }

    /// Add (or replace) a node with an explicit label. Replacing a node
    /// drops its edges, on both ends.
    pub fn insert_node(&mut self, label: Label, stmt: S) -> Label {
        if let Some(old) = self.nodes.remove(&label) {
            for succ in old.succs {
                if let Some(node) = self.nodes.get_mut(&succ) {
                    node.preds.retain(|&other| other != label);
                }
            }
            for pred in old.preds {
                if let Some(node) = self.nodes.get_mut(&pred) {
                    node.succs.retain(|&other| other != label);
                }
            }
        }
        self.insert(label, InsensitiveBlock::new(label, stmt))
    }

    /// # Panics
    ///
    /// Panics if any of the endpoints is not in the graph.
    pub fn add_edge(&mut self, from: Label, to: Label) -> &mut Self {
        assert!(self.nodes.contains_key(&to), "label {to} is not part of the graph");
        self.node_mut(from).succs.push(to);
        self.node_mut(to).preds.push(from);
        self
    }

    /// Create a new graph where every edge points in the opposite direction.
    pub fn reverse(&self) -> Self
    where
        S: Clone,
    {
        let nodes = self
            .nodes
            .iter()
            .map(|(&label, block)| {
                let reversed = InsensitiveBlock {
                    label,
                    preds: block.succs.clone(),
                    succs: block.preds.clone(),
                    stmt: block.stmt.clone(),
                };
                (label, reversed)
            })
            .collect();
        Self {
            nodes,
            next_label: self.next_label,
        }
    }
}

/// Check the input contract of the solver:
/// * `ids` and the keys of `id_to_node` are the same set,
/// * every node is stored under its own label,
/// * every entry is part of the graph,
/// * no edge points outside of the graph,
/// * every edge is listed on both of its ends with the same class.
pub fn validate<N: SensitiveNode>(
    entry_ids: &[Label],
    ids: &[Label],
    id_to_node: &BTreeMap<Label, N>,
) -> Result<(), MalformedGraph> {
    let domain: BTreeSet<Label> = ids.iter().copied().collect();
    let keys: BTreeSet<Label> = id_to_node.keys().copied().collect();
    if let Some(&label) = domain.symmetric_difference(&keys).next() {
        return Err(MalformedGraph::DomainMismatch { label });
    }

    for (&key, node) in id_to_node {
        if node.label() != key {
            return Err(MalformedGraph::LabelMismatch {
                key,
                label: node.label(),
            });
        }
    }

    if let Some(&label) = entry_ids.iter().find(|&id| !domain.contains(id)) {
        return Err(MalformedGraph::UnknownEntry { label });
    }

    for (&label, node) in id_to_node {
        let edges = [
            node.preds_not_taken(),
            node.preds_taken(),
            node.succs_not_taken(),
            node.succs_taken(),
        ];
        let mut targets = edges.iter().flat_map(|list| list.iter());
        if let Some(&target) = targets.find(|&target| !domain.contains(target)) {
            return Err(MalformedGraph::DanglingEdge {
                node: label,
                target,
            });
        }
    }

    for (&label, node) in id_to_node {
        for kind in [EdgeKind::NotTaken, EdgeKind::Taken] {
            for &succ in successors(node, kind) {
                if !predecessors(&id_to_node[&succ], kind).contains(&label) {
                    return Err(MalformedGraph::AsymmetricEdge {
                        from: label,
                        to: succ,
                        kind,
                    });
                }
            }
            for &pred in predecessors(node, kind) {
                if !successors(&id_to_node[&pred], kind).contains(&label) {
                    return Err(MalformedGraph::AsymmetricEdge {
                        from: pred,
                        to: label,
                        kind,
                    });
                }
            }
        }
    }

    Ok(())
}

fn successors<N: SensitiveNode>(node: &N, kind: EdgeKind) -> &[Label] {
    match kind {
        EdgeKind::NotTaken => node.succs_not_taken(),
        EdgeKind::Taken => node.succs_taken(),
    }
}

fn predecessors<N: SensitiveNode>(node: &N, kind: EdgeKind) -> &[Label] {
    match kind {
        EdgeKind::NotTaken => node.preds_not_taken(),
        EdgeKind::Taken => node.preds_taken(),
    }
}

/// Render the graph in graphviz format. Taken edges are labeled with `T`.
pub fn print<N, StmtPrinter>(id_to_node: &BTreeMap<Label, N>, printer: StmtPrinter) -> String
where
    N: SensitiveNode,
    StmtPrinter: Fn(&N::Stmt) -> String,
{
    let mut output = "digraph CFG {\n".to_owned();
    for (label, node) in id_to_node {
        writeln!(output, "  Node_{}[label=\"{}\"]", label, printer(node.stmt())).unwrap();
    }
    output.push('\n');
    for (label, node) in id_to_node {
        for next in node.succs_not_taken() {
            writeln!(output, "  Node_{} -> Node_{}", label, next).unwrap();
        }
        for next in node.succs_taken() {
            writeln!(output, "  Node_{} -> Node_{}[label=\"T\"]", label, next).unwrap();
        }
    }
    output.push_str("}\n");
    output
}
