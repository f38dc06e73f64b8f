/// Nodes are identified by small non-negative integers. A label is unique
/// within a single run of the solver.
pub type Label = usize;

/// A node of a path-sensitive control flow graph. Every edge belongs to one
/// of two classes: "taken" edges are followed when a branch condition
/// holds, "not-taken" edges are the fall-through edges. A node without
/// taken successors is a non-branching statement.
///
/// The edge classes must be symmetric, if `a` lists `b` in
/// [`SensitiveNode::succs_taken`], `b` must list `a` in
/// [`SensitiveNode::preds_taken`], and likewise for not-taken edges.
pub trait SensitiveNode {
    /// The statement stored in the node. The solver never looks at it.
    type Stmt;

    fn label(&self) -> Label;
    fn preds_not_taken(&self) -> &[Label];
    fn preds_taken(&self) -> &[Label];
    fn succs_not_taken(&self) -> &[Label];
    fn succs_taken(&self) -> &[Label];
    fn stmt(&self) -> &Self::Stmt;
}

/// A node of a control flow graph that does not distinguish the outcomes
/// of branches.
pub trait InsensitiveNode {
    /// The statement stored in the node. The solver never looks at it.
    type Stmt;

    fn label(&self) -> Label;
    fn preds(&self) -> &[Label];
    fn succs(&self) -> &[Label];
    fn stmt(&self) -> &Self::Stmt;
}

impl<N: SensitiveNode + ?Sized> SensitiveNode for &N {
    type Stmt = N::Stmt;

    fn label(&self) -> Label {
        (**self).label()
    }

    fn preds_not_taken(&self) -> &[Label] {
        (**self).preds_not_taken()
    }

    fn preds_taken(&self) -> &[Label] {
        (**self).preds_taken()
    }

    fn succs_not_taken(&self) -> &[Label] {
        (**self).succs_not_taken()
    }

    fn succs_taken(&self) -> &[Label] {
        (**self).succs_taken()
    }

    fn stmt(&self) -> &Self::Stmt {
        (**self).stmt()
    }
}

impl<N: InsensitiveNode + ?Sized> InsensitiveNode for &N {
    type Stmt = N::Stmt;

    fn label(&self) -> Label {
        (**self).label()
    }

    fn preds(&self) -> &[Label] {
        (**self).preds()
    }

    fn succs(&self) -> &[Label] {
        (**self).succs()
    }

    fn stmt(&self) -> &Self::Stmt {
        (**self).stmt()
    }
}
