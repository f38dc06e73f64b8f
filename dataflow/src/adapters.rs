use crate::node::{InsensitiveNode, Label, SensitiveNode};

/// Presents a path-insensitive node as a path-sensitive one. All the edges
/// are classified as "not-taken", so the "taken" edge lists are always
/// empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sensitized<N>(pub N);

impl<N> Sensitized<N> {
    pub fn inner(&self) -> &N {
        &self.0
    }

    pub fn into_inner(self) -> N {
        self.0
    }
}

impl<N: InsensitiveNode> SensitiveNode for Sensitized<N> {
    type Stmt = N::Stmt;

    fn label(&self) -> Label {
        self.0.label()
    }

    fn preds_not_taken(&self) -> &[Label] {
        self.0.preds()
    }

    fn preds_taken(&self) -> &[Label] {
        &[]
    }

    fn succs_not_taken(&self) -> &[Label] {
        self.0.succs()
    }

    fn succs_taken(&self) -> &[Label] {
        &[]
    }

    fn stmt(&self) -> &Self::Stmt {
        self.0.stmt()
    }
}

/// Presents a path-sensitive node with the roles of predecessors and
/// successors swapped. The edge classes are kept, i.e., not-taken
/// predecessors become not-taken successors.
///
/// Running a forward analysis over reversed nodes computes a backward
/// analysis. The facts flowing into a reversed node are the facts flowing
/// out of the original one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reversed<N>(pub N);

impl<N> Reversed<N> {
    pub fn inner(&self) -> &N {
        &self.0
    }

    pub fn into_inner(self) -> N {
        self.0
    }
}

impl<N: SensitiveNode> SensitiveNode for Reversed<N> {
    type Stmt = N::Stmt;

    fn label(&self) -> Label {
        self.0.label()
    }

    fn preds_not_taken(&self) -> &[Label] {
        self.0.succs_not_taken()
    }

    fn preds_taken(&self) -> &[Label] {
        self.0.succs_taken()
    }

    fn succs_not_taken(&self) -> &[Label] {
        self.0.preds_not_taken()
    }

    fn succs_taken(&self) -> &[Label] {
        self.0.preds_taken()
    }

    fn stmt(&self) -> &Self::Stmt {
        self.0.stmt()
    }
}
