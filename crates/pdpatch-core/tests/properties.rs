//! Property tests for the patch builder and renderer.
//!
//! - Append-only indexing across mixed node kinds
//! - Deterministic, non-mutating rendering
//! - Message escaping
//! - Subpatch block framing and ordering

use pdpatch_core::{NodeId, Patch};
use proptest::prelude::*;

/// One builder call, generated by proptest.
#[derive(Debug, Clone)]
enum Op {
    Obj(i32, i32, Vec<String>),
    Msg(i32, i32, String),
    Text(i32, i32, String),
    Sub(i32, i32, String, u8),
    Connect(u32, u32, u32, u32),
}

fn token() -> impl Strategy<Value = String> {
    "[a-z~*+-]{1,8}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>(), prop::collection::vec(token(), 0..4))
            .prop_map(|(x, y, t)| Op::Obj(x.into(), y.into(), t)),
        (any::<i16>(), any::<i16>(), "[a-z ;,]{0,16}")
            .prop_map(|(x, y, s)| Op::Msg(x.into(), y.into(), s)),
        (any::<i16>(), any::<i16>(), "[a-z ;,=]{0,16}")
            .prop_map(|(x, y, s)| Op::Text(x.into(), y.into(), s)),
        (any::<i16>(), any::<i16>(), "[a-z]{1,6}", 0u8..4)
            .prop_map(|(x, y, n, m)| Op::Sub(x.into(), y.into(), n, m)),
        (0u32..20, 0u32..4, 0u32..20, 0u32..4).prop_map(|(a, b, c, d)| Op::Connect(a, b, c, d)),
    ]
}

/// Applies `ops` to a fresh patch, returning the ids handed out by the
/// node-adding calls.
fn build(ops: &[Op]) -> (Patch, Vec<NodeId>) {
    let mut p = Patch::new();
    let mut ids = Vec::new();
    for op in ops {
        match op {
            Op::Obj(x, y, t) => ids.push(p.obj(*x, *y, t)),
            Op::Msg(x, y, s) => ids.push(p.msg(*x, *y, s)),
            Op::Text(x, y, s) => ids.push(p.text(*x, *y, s.clone())),
            Op::Sub(x, y, name, members) => {
                let mut inner = Patch::new();
                for i in 0..*members {
                    inner.obj(0, i32::from(i) * 30, ["f"]);
                }
                ids.push(p.subpatch(*x, *y, name.clone(), inner));
            }
            Op::Connect(a, b, c, d) => p.connect(NodeId(*a), *b, NodeId(*c), *d),
        }
    }
    (p, ids)
}

proptest! {
    #[test]
    fn kth_node_gets_index_k(ops in prop::collection::vec(op(), 0..40)) {
        let (p, ids) = build(&ops);
        for (k, id) in ids.iter().enumerate() {
            prop_assert_eq!(id.index(), k);
        }
        prop_assert_eq!(p.len(), ids.len());
    }

    #[test]
    fn rendering_is_deterministic(ops in prop::collection::vec(op(), 0..40)) {
        let (p, _) = build(&ops);
        let before = p.clone();
        let first = p.render();
        let second = p.render();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(p, before);
    }

    #[test]
    fn every_line_is_terminated(ops in prop::collection::vec(op(), 0..40)) {
        let (p, _) = build(&ops);
        let text = p.render();
        prop_assert!(text.lines().all(|l| l.ends_with(';')));
        prop_assert!(!text.ends_with('\n'));
    }

    #[test]
    fn message_separators_are_escaped(body in "[a-z ;,]{0,24}") {
        let mut p = Patch::new();
        p.msg(0, 0, &body);
        let text = p.render();
        let line = text.lines().nth(1).unwrap();
        let payload = line
            .strip_prefix("#X msg 0 0 ")
            .and_then(|l| l.strip_suffix(';'))
            .unwrap();

        let expected: String = body
            .chars()
            .flat_map(|c| match c {
                ';' | ',' => vec!['\\', c],
                _ => vec![c],
            })
            .collect();
        prop_assert_eq!(payload, expected);
        if !body.contains(';') && !body.contains(',') {
            prop_assert_eq!(payload, body.as_str());
        }
    }

    #[test]
    fn subpatch_block_is_framed(members in 0usize..6, cords in 0usize..4) {
        let mut inner = Patch::new();
        for i in 0..members {
            inner.obj(10, i as i32 * 20, ["f"]);
        }
        for _ in 0..cords {
            inner.connect(NodeId(0), 0, NodeId(1), 0);
        }

        let mut p = Patch::new();
        p.subpatch(7, 8, "sub", inner);
        let tail = p.obj(1, 1, ["print"]);
        p.connect(NodeId(0), 0, tail, 0);

        let text = p.render();
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), 1 + 1 + members + cords + 1 + 1 + 1);
        prop_assert_eq!(lines[0], "#N canvas 100 100 900 800 12;");
        prop_assert_eq!(lines[1], "#N canvas 0 0 600 400 sub 0;");
        for line in &lines[2..2 + members] {
            prop_assert!(line.starts_with("#X obj 10 "));
        }
        for line in &lines[2 + members..2 + members + cords] {
            prop_assert_eq!(*line, "#X connect 0 0 1 0;");
        }
        prop_assert_eq!(lines[2 + members + cords], "#X restore 7 8 pd sub;");
        prop_assert_eq!(lines[3 + members + cords], "#X obj 1 1 print;");
        prop_assert_eq!(lines[4 + members + cords], "#X connect 0 0 1 0;");
    }
}

#[test]
fn end_to_end_scenario() {
    let mut p = Patch::new();
    let foo = p.obj(10, 10, ["foo", "1"]);
    let bar = p.msg(10, 50, "bar, baz");
    p.connect(foo, 0, bar, 0);

    assert_eq!(
        p.render(),
        "#N canvas 100 100 900 800 12;\n\
         #X obj 10 10 foo 1;\n\
         #X msg 10 50 bar\\, baz;\n\
         #X connect 0 0 1 0;"
    );
}

#[test]
fn depth_two_nesting_has_two_headers_and_restores() {
    let mut leaf = Patch::new();
    leaf.obj(0, 0, ["outlet~"]);

    let mut mid = Patch::new();
    mid.obj(5, 5, ["inlet~"]);
    mid.subpatch(11, 22, "leaf", leaf);

    let mut root = Patch::new();
    root.subpatch(33, 44, "mid", mid);

    let text = root.render();
    let headers: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("#N canvas 0 0 600 400"))
        .collect();
    let restores: Vec<&str> = text.lines().filter(|l| l.starts_with("#X restore")).collect();

    assert_eq!(
        headers,
        vec!["#N canvas 0 0 600 400 mid 0;", "#N canvas 0 0 600 400 leaf 0;"]
    );
    assert_eq!(
        restores,
        vec!["#X restore 11 22 pd leaf;", "#X restore 33 44 pd mid;"]
    );
}
