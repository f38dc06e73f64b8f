use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{Deref, DerefMut};
use std::collections::{BTreeMap, HashSet};

use crate::facts::merge_all;

/////////////////////////
// Traits for domains. //
/////////////////////////

/// A join semi-lattice is a partially ordered set where the least upper
/// bound exists for every subset. The ordering relation can be viewed as
/// "safe approximation". Top represents the biggest element (largest
/// approximation), Bottom represents the smallest one.
///
/// Any join semi-lattice gives a merge operator for the solver:
/// `|a, b| a.join(b)`.
pub trait JoinSemiLattice: Eq + PartialOrd + Clone + Debug {
    /// A type to hold some information about the lattice on the side.
    ///
    /// For some lattices, like the power set lattice, we need to
    /// store somewhere the top or the bottom value. When we need
    /// no such values, set this to unit.
    type LatticeContext;

    /// The unit element of the join operation. In case a domain lacks a
    /// bottom element consider using [Option] to introduce one. Bottom
    /// values in the analysis result often stand for dead code.
    ///
    /// Required to be the smallest element according to the ordering.
    fn bottom(ctx: &Self::LatticeContext) -> Self;

    /// The least upper bound of the arguments.
    ///
    /// Requirements:
    /// * Reflexive: a.join(a) == a
    /// * Commutative: a.join(b) == b.join(a)
    /// * Bottom is unit: bottom.join(b) == b
    /// * Upper bound: a.join(b) >= a and a.join(b) >= b
    /// * Ordering is respected: a <= b => a.join(b) == b
    fn join(&self, other: &Self) -> Self;

    /// The least upper bound of a set of elements, bottom for the empty set.
    fn join_all<'a>(elements: impl IntoIterator<Item = &'a Self>, ctx: &Self::LatticeContext) -> Self
    where
        Self: 'a,
    {
        merge_all(&mut |a: &Self, b: &Self| a.join(b), elements, &Self::bottom(ctx))
    }
}

/// A lattice is a join semi-lattice that is also a meet semi-lattice, i.e.,
/// the greatest lower bound (meet) also exists for all subsets.
pub trait Lattice: JoinSemiLattice {
    /// The unit element of the meet operation, the largest element of the
    /// lattice.
    fn top(ctx: &Self::LatticeContext) -> Self;

    /// The greatest lower bound of the arguments. Must-analyses, where a
    /// fact only holds if it holds on all paths, use this as the merge
    /// operator.
    ///
    /// * Reflexive: a.meet(a) == a
    /// * Commutative: a.meet(b) == b.meet(a)
    /// * Top is unit: top.meet(b) == b
    /// * Lower bound: a.meet(b) <= a and a.meet(b) <= b
    /// * Ordering is respected: a <= b => a.meet(b) == a
    fn meet(&self, other: &Self) -> Self;

    /// The greatest lower bound of a set of elements, top for the empty set.
    fn meet_all<'a>(elements: impl IntoIterator<Item = &'a Self>, ctx: &Self::LatticeContext) -> Self
    where
        Self: 'a,
    {
        merge_all(&mut |a: &Self, b: &Self| a.meet(b), elements, &Self::top(ctx))
    }
}

/////////////////////////////////////
// Concrete domain implementations //
/////////////////////////////////////

/// Bool is a lattice, where false is bottom and true is top,
/// join is or, meet is and.
impl JoinSemiLattice for bool {
    type LatticeContext = ();

    fn bottom(_ctx: &Self::LatticeContext) -> Self {
        false
    }

    fn join(&self, other: &Self) -> Self {
        *self || *other
    }
}

impl Lattice for bool {
    fn top(_ctx: &Self::LatticeContext) -> Self {
        true
    }

    fn meet(&self, other: &Self) -> Self {
        *self && *other
    }
}

/// Adds a new bottom element below a join semi-lattice. `None` usually
/// stands for unreachable code, so a flow function can tell apart "nothing
/// is known" and "this point is never reached".
impl<T: JoinSemiLattice> JoinSemiLattice for Option<T> {
    type LatticeContext = T::LatticeContext;

    fn bottom(_ctx: &Self::LatticeContext) -> Self {
        None
    }

    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (None, x) | (x, None) => x.clone(),
            (Some(a), Some(b)) => Some(a.join(b)),
        }
    }
}

/// In the power set lattice, the empty set is bottom, union is join
/// intersect is meet, and the full set is top.
#[derive(PartialEq, Eq, Clone, Default)]
pub struct PowerSet<T: Eq + Hash>(pub HashSet<T>);

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct PowerSetTop<T: Eq + Hash>(pub PowerSet<T>);

impl<T: Eq + Hash> FromIterator<T> for PowerSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Eq + Hash> Deref for PowerSet<T> {
    type Target = HashSet<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Eq + Hash> DerefMut for PowerSet<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Eq + Hash> PartialOrd for PowerSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_superset(other), other.is_superset(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (_, _) => None,
        }
    }
}

impl<T: Eq + Hash + Debug> Debug for PowerSet<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut elements: Box<[String]> = self.iter().map(|x| format!("{x:?}")).collect();
        elements.sort_unstable();
        write!(f, "{{{}}}", elements.join(", "))
    }
}

impl<T: Eq + Hash + Debug + Clone> JoinSemiLattice for PowerSet<T> {
    type LatticeContext = PowerSetTop<T>;

    fn bottom(_: &Self::LatticeContext) -> Self {
        Self(HashSet::new())
    }

    fn join(&self, other: &Self) -> Self {
        Self(self.union(other).cloned().collect())
    }
}

impl<T: Eq + Hash + Debug + Clone> Lattice for PowerSet<T> {
    fn top(ctx: &Self::LatticeContext) -> Self {
        ctx.0.clone()
    }

    fn meet(&self, other: &Self) -> Self {
        Self(self.intersection(other).cloned().collect())
    }
}

/// A flat lattice lifts a set of unordered values. Every value is
/// incomparable with the others, the only approximations are Bottom (no
/// value) and Top (any value).
///
/// ```txt
///               Top
///      /      /  ...  \      \
///    v1     v2   ...   vn-1   vn
///      \      \  ...  /      /
///              Bottom
/// ```
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub enum Flat<T> {
    Bottom,
    Value(T),
    Top,
}

impl<T> Flat<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Flat::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Eq> PartialOrd for Flat<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Flat::Bottom, Flat::Bottom) | (Flat::Top, Flat::Top) => Some(Ordering::Equal),
            (Flat::Bottom, _) | (_, Flat::Top) => Some(Ordering::Less),
            (_, Flat::Bottom) | (Flat::Top, _) => Some(Ordering::Greater),
            (Flat::Value(a), Flat::Value(b)) => (a == b).then_some(Ordering::Equal),
        }
    }
}

impl<T: Eq + Clone + Debug> JoinSemiLattice for Flat<T> {
    type LatticeContext = ();

    fn bottom(_: &Self::LatticeContext) -> Self {
        Flat::Bottom
    }

    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (Flat::Bottom, x) | (x, Flat::Bottom) => x.clone(),
            (Flat::Value(a), Flat::Value(b)) if a == b => self.clone(),
            _ => Flat::Top,
        }
    }
}

impl<T: Eq + Clone + Debug> Lattice for Flat<T> {
    fn top(_: &Self::LatticeContext) -> Self {
        Flat::Top
    }

    fn meet(&self, other: &Self) -> Self {
        match (self, other) {
            (Flat::Top, x) | (x, Flat::Top) => x.clone(),
            (Flat::Value(a), Flat::Value(b)) if a == b => self.clone(),
            _ => Flat::Bottom,
        }
    }
}

/// Maps keys to lattice elements, ordered pointwise. Keys that are not in
/// the map are bottom. Bottom values are never stored, so two maps are
/// equal exactly when they agree on every key.
#[derive(PartialEq, Eq, Clone)]
pub struct MapDomain<K: Ord, V>(BTreeMap<K, V>);

impl<K: Ord, V> Default for MapDomain<K, V> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K, V> MapDomain<K, V>
where
    K: Ord + Clone,
    V: JoinSemiLattice<LatticeContext = ()>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> V {
        self.0.get(key).cloned().unwrap_or_else(|| V::bottom(&()))
    }

    pub fn insert(&mut self, key: K, value: V) {
        if value == V::bottom(&()) {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for MapDomain<K, V>
where
    K: Ord + Clone,
    V: JoinSemiLattice<LatticeContext = ()>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (key, value) in iter {
            result.insert(key, value);
        }
        result
    }
}

impl<K, V> PartialOrd for MapDomain<K, V>
where
    K: Ord + Clone,
    V: JoinSemiLattice<LatticeContext = ()>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut result = Ordering::Equal;
        for key in self.0.keys().chain(other.0.keys()) {
            match (self.get(key).partial_cmp(&other.get(key))?, result) {
                (Ordering::Equal, _) => {}
                (ord, Ordering::Equal) => result = ord,
                (ord, prev) if ord != prev => return None,
                _ => {}
            }
        }
        Some(result)
    }
}

impl<K: Ord + Debug, V: Debug> Debug for MapDomain<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K, V> JoinSemiLattice for MapDomain<K, V>
where
    K: Ord + Clone + Debug,
    V: JoinSemiLattice<LatticeContext = ()>,
{
    type LatticeContext = ();

    fn bottom(_: &Self::LatticeContext) -> Self {
        Self::new()
    }

    fn join(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (key, value) in &other.0 {
            let joined = result.get(key).join(value);
            result.insert(key.clone(), joined);
        }
        result
    }
}

/// Flips the order of a lattice, bottom becomes top, join becomes meet.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Flipped<T: Lattice>(pub T);

impl<T: Lattice> PartialOrd for Flipped<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.0.partial_cmp(&self.0)
    }
}

impl<T: Lattice> JoinSemiLattice for Flipped<T> {
    type LatticeContext = T::LatticeContext;

    fn bottom(ctx: &Self::LatticeContext) -> Self {
        Self(T::top(ctx))
    }

    fn join(&self, other: &Self) -> Self {
        Self(self.0.meet(&other.0))
    }
}

impl<T: Lattice> Lattice for Flipped<T> {
    fn top(ctx: &Self::LatticeContext) -> Self {
        Self(T::bottom(ctx))
    }

    fn meet(&self, other: &Self) -> Self {
        Self(self.0.join(&other.0))
    }
}
