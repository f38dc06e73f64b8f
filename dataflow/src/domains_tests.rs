use super::domains::*;
use std::collections::HashSet;

#[test]
fn bool_domain_tests() {
    assert!(!bool::bottom(&()));
    assert!(bool::top(&()));
    assert!(false <= true);
    assert!(false.join(&true));
    assert!(!false.meet(&true));
    assert!(bool::join_all(&[false, true, false], &()));
    assert!(!bool::join_all(&[], &()));
    assert!(bool::meet_all(&[], &()));
    assert!(!bool::meet_all(&[true, false], &()));
}

#[test]
fn option_domain_tests() {
    let unreachable: Option<bool> = None;
    let reachable = Some(false);
    let top = Some(true);

    assert_eq!(Option::<bool>::bottom(&()), unreachable);
    assert!(unreachable <= reachable);
    assert!(reachable <= top);
    assert_eq!(unreachable.join(&reachable), reachable);
    assert_eq!(reachable.join(&unreachable), reachable);
    assert_eq!(reachable.join(&top), top);
    assert_eq!(unreachable.join(&unreachable), unreachable);
}

#[test]
fn powerset_domain_tests() {
    let ctx = PowerSetTop(PowerSet::from_iter([1, 2, 3]));
    let bottom = PowerSet::<i32>::bottom(&ctx);
    let top = PowerSet::<i32>::top(&ctx);
    let first: PowerSet<i32> = [1, 2].into_iter().collect();
    let second: PowerSet<i32> = [2, 3].into_iter().collect();
    let both: PowerSet<i32> = [2].into_iter().collect();

    assert_eq!(bottom, PowerSet(HashSet::new()));
    assert!(bottom <= first);
    assert!(first <= top);
    assert!(both <= first);
    assert!(!(first <= second));
    assert!(!(first >= second));
    assert_eq!(first.join(&second), top);
    assert_eq!(first.meet(&second), both);
    assert_eq!(top.meet(&first), first);
    assert_eq!(bottom.join(&first), first);
    assert_eq!(PowerSet::<i32>::join_all([&first, &second], &ctx), top);
    assert_eq!(PowerSet::<i32>::meet_all([&first, &second], &ctx), both);
    assert_eq!(PowerSet::<i32>::meet_all([], &ctx), top);

    // Pretty printing
    assert_eq!(format!("{top:?}"), "{1, 2, 3}");
}

#[test]
fn flat_domain_tests() {
    let bottom = Flat::Bottom;
    let a = Flat::Value("a");
    let b = Flat::Value("b");
    let top = Flat::Top;

    assert!(bottom <= a);
    assert!(a <= top);
    assert!(!(a <= b));
    assert!(!(a >= b));
    assert_eq!(a.join(&a), a);
    assert_eq!(a.join(&b), top);
    assert_eq!(bottom.join(&b), b);
    assert_eq!(a.meet(&b), bottom);
    assert_eq!(top.meet(&b), b);
    assert_eq!(Flat::join_all(&[a.clone(), a.clone()], &()), a);
    assert_eq!(Flat::<&str>::join_all(&[], &()), bottom);
    assert_eq!(a.value(), Some(&"a"));
    assert_eq!(top.value(), None);
}

#[test]
fn map_domain_tests() {
    type Env = MapDomain<&'static str, Flat<i32>>;

    let empty = Env::bottom(&());
    let x1: Env = [("x", Flat::Value(1))].into_iter().collect();
    let x2: Env = [("x", Flat::Value(2))].into_iter().collect();
    let y1: Env = [("y", Flat::Value(1))].into_iter().collect();
    let x1_y1: Env = [("x", Flat::Value(1)), ("y", Flat::Value(1))]
        .into_iter()
        .collect();

    // Missing keys are bottom and bottom values are not stored.
    assert_eq!(empty.get(&"x"), Flat::Bottom);
    assert_eq!(Env::from_iter([("x", Flat::Bottom)]), empty);
    let mut cleared = x1.clone();
    cleared.insert("x", Flat::Bottom);
    assert_eq!(cleared, empty);

    assert!(empty <= x1);
    assert!(x1 <= x1_y1);
    assert!(!(x1 <= x2));
    assert!(!(x1 <= y1) && !(y1 <= x1));
    assert_eq!(x1.join(&y1), x1_y1);
    assert_eq!(x1.join(&x2).get(&"x"), Flat::Top);
    assert_eq!(empty.join(&x1), x1);
    assert_eq!(Env::join_all([&x1, &y1, &empty], &()), x1_y1);

    // Pretty printing
    assert_eq!(format!("{x1_y1:?}"), "{\"x\": Value(1), \"y\": Value(1)}");
}

#[test]
fn flipped_domain_tests() {
    let ctx = PowerSetTop(PowerSet::from_iter([1, 2, 3]));
    let all = Flipped(PowerSet::<i32>::top(&ctx));
    let none = Flipped(PowerSet::<i32>::bottom(&ctx));
    let first = Flipped(PowerSet::from_iter([1, 2]));
    let second = Flipped(PowerSet::from_iter([2, 3]));

    assert_eq!(Flipped::<PowerSet<i32>>::bottom(&ctx), all);
    assert_eq!(Flipped::<PowerSet<i32>>::top(&ctx), none);
    assert!(all <= first);
    assert!(first <= none);
    assert_eq!(first.join(&second), Flipped(PowerSet::from_iter([2])));
    assert_eq!(first.meet(&second), all);
    assert_eq!(all.join(&first), first);
}
