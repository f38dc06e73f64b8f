use crate::adapters::{Reversed, Sensitized};
use crate::graph::{EdgeKind, Graph, InsensitiveBlock, SensitiveBlock};
use crate::node::{InsensitiveNode, SensitiveNode};
use crate::test_utils::diamond;

#[test]
fn sensitized_has_no_taken_edges() {
    let cfg = diamond();
    for (&label, node) in cfg.nodes() {
        let view = Sensitized(node);
        assert_eq!(view.label(), label);
        assert_eq!(view.preds_not_taken(), node.preds());
        assert_eq!(view.succs_not_taken(), node.succs());
        assert!(view.preds_taken().is_empty());
        assert!(view.succs_taken().is_empty());
    }
}

#[test]
fn reversed_swaps_edges_per_class() {
    let mut cfg = Graph::<SensitiveBlock<&str>>::new();
    let cond = cfg.add_node("x == y");
    let then = cfg.add_node("then");
    let other = cfg.add_node("else");
    cfg.add_edge(cond, then, EdgeKind::Taken)
        .add_edge(cond, other, EdgeKind::NotTaken);

    let reversed = Reversed(&cfg.nodes()[&cond]);
    assert_eq!(reversed.label(), cond);
    assert_eq!(reversed.preds_taken(), &[then]);
    assert_eq!(reversed.preds_not_taken(), &[other]);
    assert!(reversed.succs_taken().is_empty());
    assert!(reversed.succs_not_taken().is_empty());
    assert_eq!(*reversed.stmt(), "x == y");

    let reversed = Reversed(&cfg.nodes()[&then]);
    assert_eq!(reversed.succs_taken(), &[cond]);
    assert!(reversed.succs_not_taken().is_empty());
    assert!(reversed.preds_taken().is_empty());
}

#[test]
fn reversing_twice_is_identity() {
    let cfg = diamond();
    for node in cfg.nodes().values() {
        let original = Sensitized(node);
        let twice = Reversed(Reversed(original));
        assert_eq!(twice.preds_not_taken(), original.preds_not_taken());
        assert_eq!(twice.succs_not_taken(), original.succs_not_taken());
        assert_eq!(twice.into_inner().into_inner(), original);
    }
}

#[test]
fn stacked_views_keep_the_statement() {
    let mut cfg = Graph::<InsensitiveBlock<String>>::new();
    let a = cfg.add_node("a := \"x\"".to_owned());
    let b = cfg.add_node("use(a)".to_owned());
    cfg.add_edge(a, b);

    let view = Reversed(Sensitized(&cfg.nodes()[&b]));
    assert_eq!(view.stmt(), "use(a)");
    assert_eq!(view.succs_not_taken(), &[a]);
    assert!(view.preds_not_taken().is_empty());
    assert_eq!(view.inner().inner().stmt(), "use(a)");
}
