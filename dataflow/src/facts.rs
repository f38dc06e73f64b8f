use core::fmt::Debug;

/// A data-flow fact is an element of the lattice the analysis is computing
/// over. The solver only needs to compare facts to detect convergence, and
/// to render them for diagnostics.
///
/// Requirements:
/// * Equality is consistent with merging: once `merge(a, b) == a` holds
///   for a node, the solver stops propagating from it.
pub trait Fact: Clone + PartialEq + Debug {}

impl<T: Clone + PartialEq + Debug> Fact for T {}

/// Fold a list of facts left-to-right using a binary merge operator.
/// An empty list results in `initial`, otherwise the fold starts from the
/// first fact.
///
/// The solver collects the incoming facts in no particular order, so the
/// result is only meaningful if `merge` is commutative and associative.
pub fn merge_all<'a, F, M>(merge: &mut M, facts: impl IntoIterator<Item = &'a F>, initial: &F) -> F
where
    F: Fact + 'a,
    M: FnMut(&F, &F) -> F,
{
    let mut facts = facts.into_iter();
    let Some(first) = facts.next() else {
        return initial.clone();
    };
    facts.fold(first.clone(), |acc, fact| merge(&acc, fact))
}
