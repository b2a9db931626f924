#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn graph(nodes: u32) -> (Reachability<u32>, Vec<NodeId>) {
    let mut r = Reachability::new();
    let ids = (0..nodes).map(|i| r.add_node(i)).collect();
    (r, ids)
}

fn sorted(mut pairs: Vec<(NodeId, NodeId)>) -> Vec<(u32, u32)> {
    pairs.sort();
    pairs.into_iter().map(|(a, b)| (a.raw(), b.raw())).collect()
}

#[test]
fn ids_are_dense_and_carry_payloads() {
    let (r, ids) = graph(3);
    assert_eq!(ids, vec![NodeId(0), NodeId(1), NodeId(2)]);
    assert_eq!(r.len(), 3);
    assert_eq!(*r.payload(ids[2]), 2);
    assert_eq!(r.edge_count(), 0);
}

#[test]
fn single_edge_is_reported() {
    let (mut r, n) = graph(10);
    let mut out = Vec::new();
    r.add_edge(n[0], n[8], &mut out);
    assert_eq!(sorted(out), vec![(0, 8)]);
    assert!(r.contains_edge(n[0], n[8]));
    assert!(!r.contains_edge(n[8], n[0]));
}

#[test]
fn repeated_edge_reports_nothing() {
    let (mut r, n) = graph(10);
    let mut out = Vec::new();
    r.add_edge(n[0], n[8], &mut out);
    out.clear();
    r.add_edge(n[0], n[8], &mut out);
    assert!(out.is_empty());
}

#[test]
fn bridging_edge_reports_full_product() {
    let (mut r, n) = graph(10);
    let mut out = Vec::new();
    for (a, b) in [
        (0, 8),
        (0, 3),
        (1, 3),
        (2, 3),
        (4, 5),
        (4, 6),
        (4, 7),
        (6, 7),
        (9, 1),
        (9, 8),
    ] {
        r.add_edge(n[a], n[b], &mut out);
    }

    out.clear();
    r.add_edge(n[3], n[4], &mut out);

    let mut expected = Vec::new();
    for lhs in [0, 1, 2, 3, 9] {
        for rhs in [4, 5, 6, 7] {
            expected.push((lhs, rhs));
        }
    }
    assert_eq!(out.len(), 20);
    assert_eq!(sorted(out), expected);
}

#[test]
fn self_loops_are_ordinary_edges() {
    let (mut r, n) = graph(2);
    let mut out = Vec::new();
    r.add_edge(n[0], n[0], &mut out);
    r.add_edge(n[0], n[1], &mut out);
    assert_eq!(sorted(out), vec![(0, 0), (0, 1)]);
    assert!(!r.contains_edge(n[1], n[1]));
}

#[test]
fn cycles_close_in_both_directions() {
    let (mut r, n) = graph(3);
    let mut out = Vec::new();
    r.add_edge(n[0], n[1], &mut out);
    r.add_edge(n[1], n[2], &mut out);
    r.add_edge(n[2], n[0], &mut out);
    for &a in &n {
        for &b in &n {
            assert!(r.contains_edge(a, b), "{a:?} should reach {b:?}");
        }
    }
    assert_eq!(r.edge_count(), 9);
}

#[test]
fn neighbours_iterate_in_discovery_order() {
    let (mut r, n) = graph(4);
    let mut out = Vec::new();
    r.add_edge(n[0], n[3], &mut out);
    r.add_edge(n[0], n[1], &mut out);
    r.add_edge(n[2], n[1], &mut out);
    assert_eq!(r.successors(n[0]).collect::<Vec<_>>(), vec![n[3], n[1]]);
    assert_eq!(r.predecessors(n[1]).collect::<Vec<_>>(), vec![n[0], n[2]]);
}

#[test]
fn restore_discards_later_nodes_and_edges() {
    let (mut r, n) = graph(3);
    let mut out = Vec::new();
    r.add_edge(n[0], n[1], &mut out);

    let snapshot = r.snapshot();
    assert_eq!(snapshot.len(), 3);
    let extra = r.add_node(99);
    r.add_edge(n[1], n[2], &mut out);
    r.add_edge(extra, n[0], &mut out);
    assert!(r.contains_edge(n[0], n[2]));

    r.restore(snapshot);
    assert_eq!(r.len(), 3);
    assert!(r.contains_edge(n[0], n[1]));
    assert!(!r.contains_edge(n[1], n[2]));
    assert!(!r.contains_edge(n[0], n[2]));
    assert_eq!(r.predecessors(n[0]).count(), 0);
    assert_eq!(r.edge_count(), 1);

    // The freed id is handed out again.
    assert_eq!(r.add_node(7), extra);
}

#[test]
#[should_panic(expected = "restoring snapshot")]
fn restoring_a_stale_snapshot_panics() {
    let (mut r, _) = graph(2);
    let outer = r.snapshot();
    let _ = r.add_node(2);
    let inner = r.snapshot();
    r.restore(outer);
    r.restore(inner);
}

fn edge_sequence() -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
    (1u32..12).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..40)))
}

proptest! {
    #[test]
    fn closure_is_transitive((nodes, edges) in edge_sequence()) {
        let (mut r, n) = graph(nodes);
        let mut out = Vec::new();
        for (a, b) in edges {
            r.add_edge(n[a as usize], n[b as usize], &mut out);
        }
        for &a in &n {
            for &b in &n {
                if !r.contains_edge(a, b) {
                    continue;
                }
                for &c in &n {
                    if r.contains_edge(b, c) {
                        prop_assert!(r.contains_edge(a, c));
                    }
                }
            }
        }
    }

    #[test]
    fn reported_pairs_are_exactly_the_new_ones((nodes, edges) in edge_sequence()) {
        let (mut r, n) = graph(nodes);
        let mut out = Vec::new();
        for (a, b) in edges {
            let before = r.edge_count();
            out.clear();
            r.add_edge(n[a as usize], n[b as usize], &mut out);
            prop_assert_eq!(r.edge_count(), before + out.len());
            let mut seen = out.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), out.len());
        }
    }

    #[test]
    fn restore_matches_snapshot_queries((nodes, edges) in edge_sequence(), split in 0usize..40) {
        let (mut r, n) = graph(nodes);
        let mut out = Vec::new();
        let split = split.min(edges.len());
        for &(a, b) in &edges[..split] {
            r.add_edge(n[a as usize], n[b as usize], &mut out);
        }
        let expected: Vec<bool> = n
            .iter()
            .flat_map(|&a| n.iter().map(move |&b| (a, b)))
            .map(|(a, b)| r.contains_edge(a, b))
            .collect();

        let snapshot = r.snapshot();
        for &(a, b) in &edges[split..] {
            r.add_edge(n[a as usize], n[b as usize], &mut out);
        }
        r.restore(snapshot);

        let actual: Vec<bool> = n
            .iter()
            .flat_map(|&a| n.iter().map(move |&b| (a, b)))
            .map(|(a, b)| r.contains_edge(a, b))
            .collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(r.len(), nodes as usize);
    }
}
