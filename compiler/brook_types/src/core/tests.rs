#![allow(clippy::unwrap_used, clippy::expect_used)]

use brook_ir::{Name, Span, StringInterner};
use pretty_assertions::assert_eq;

use super::*;
use crate::error::Shape;

fn sp(n: u32) -> Span {
    Span::new(n, n + 1)
}

struct Fixture {
    core: TypeCheckerCore,
    interner: StringInterner,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            core: TypeCheckerCore::new(),
            interner: StringInterner::new(),
        }
    }

    fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }
}

#[test]
fn constructors_allocate_one_node_each() {
    let mut core = TypeCheckerCore::new();
    let _ = core.int(sp(0));
    let _ = core.str_use(sp(1));
    let (v, u) = core.var();
    assert_eq!(core.node_count(), 3);
    assert_eq!(v.node(), u.node());
    assert_eq!(*core.node(v.node()), TypeNode::Var);
}

#[test]
fn matching_primitives_flow() {
    let mut core = TypeCheckerCore::new();
    let int = core.int(sp(0));
    let int_use = core.int_use(sp(1));
    core.flow(int, int_use).unwrap();
    assert!(core.flows_to(int, int_use));

    let float = core.float(sp(2));
    let either = core.int_or_float_use(sp(3));
    core.flow(float, either).unwrap();
    core.flow(int, either).unwrap();
}

#[test]
fn mismatch_names_both_shapes() {
    let mut core = TypeCheckerCore::new();
    let s = core.str(sp(4));
    let int_use = core.int_use(sp(9));
    let err = core.flow(s, int_use).unwrap_err();
    assert_eq!(
        err,
        TypeError::TypeMismatch {
            found: Shape::Str,
            expected: Shape::Int,
            value_span: sp(4),
            use_span: sp(9),
        }
    );
}

#[test]
fn str_is_not_int_or_float() {
    let mut core = TypeCheckerCore::new();
    let s = core.str(sp(0));
    let either = core.int_or_float_use(sp(1));
    let err = core.flow(s, either).unwrap_err();
    assert!(matches!(
        err,
        TypeError::TypeMismatch {
            expected: Shape::IntOrFloat,
            ..
        }
    ));
}

#[test]
fn errors_surface_through_variables() {
    let mut core = TypeCheckerCore::new();
    let (v, u) = core.var();
    let int = core.int(sp(0));
    let bool_use = core.bool_use(sp(1));

    // Either order of connection reaches the same conflict.
    core.flow(v, bool_use).unwrap();
    let err = core.flow(int, u).unwrap_err();
    assert!(matches!(err, TypeError::TypeMismatch { found: Shape::Int, .. }));
}

#[test]
fn record_width_subtyping() {
    let mut f = Fixture::new();
    let (a, b, c) = (f.name("a"), f.name("b"), f.name("c"));
    let core = &mut f.core;

    let a_val = core.int(sp(0));
    let b_val = core.str(sp(1));
    let rec = core.obj(vec![(a, a_val), (b, b_val)], None, sp(2));

    let a_use = core.int_use(sp(3));
    let wants_a = core.obj_use((a, a_use), sp(4));
    core.flow(rec, wants_a).unwrap();

    let (_, c_use) = core.var();
    let wants_c = core.obj_use((c, c_use), sp(5));
    let err = core.flow(rec, wants_c).unwrap_err();
    assert_eq!(
        err,
        TypeError::MissingField {
            field: c,
            value_span: sp(2),
            use_span: sp(5),
        }
    );
}

#[test]
fn field_types_are_checked() {
    let mut f = Fixture::new();
    let a = f.name("a");
    let core = &mut f.core;

    let a_val = core.str(sp(0));
    let rec = core.obj(vec![(a, a_val)], None, sp(1));
    let a_use = core.int_use(sp(2));
    let wants_a = core.obj_use((a, a_use), sp(3));
    assert!(matches!(
        core.flow(rec, wants_a),
        Err(TypeError::TypeMismatch { found: Shape::Str, expected: Shape::Int, .. })
    ));
}

#[test]
fn prototype_answers_missing_fields() {
    let mut f = Fixture::new();
    let (x, y) = (f.name("x"), f.name("y"));
    let core = &mut f.core;

    let x_val = core.int(sp(0));
    let proto = core.obj(vec![(x, x_val)], None, sp(1));
    let rec = core.obj(vec![], Some(proto), sp(2));

    let x_use = core.int_use(sp(3));
    let wants_x = core.obj_use((x, x_use), sp(4));
    core.flow(rec, wants_x).unwrap();

    // Missing everywhere along the chain: reported against the prototype.
    let (_, y_use) = core.var();
    let wants_y = core.obj_use((y, y_use), sp(5));
    let err = core.flow(rec, wants_y).unwrap_err();
    assert_eq!(
        err,
        TypeError::MissingField {
            field: y,
            value_span: sp(1),
            use_span: sp(5),
        }
    );
}

#[test]
fn own_fields_shadow_the_prototype() {
    let mut f = Fixture::new();
    let x = f.name("x");
    let core = &mut f.core;

    let proto_x = core.str(sp(0));
    let proto = core.obj(vec![(x, proto_x)], None, sp(1));
    let own_x = core.int(sp(2));
    let rec = core.obj(vec![(x, own_x)], Some(proto), sp(3));

    let x_use = core.int_use(sp(4));
    let wants_x = core.obj_use((x, x_use), sp(5));
    core.flow(rec, wants_x).unwrap();
}

#[test]
fn function_arguments_are_contravariant() {
    let mut core = TypeCheckerCore::new();

    // f: (int) -> str
    let param_use = core.int_use(sp(0));
    let ret_val = core.str(sp(1));
    let f = core.func(param_use, ret_val, sp(2));

    // called with a string, result used as a string: fails on the argument
    let arg_val = core.str(sp(3));
    let ret_use = core.str_use(sp(4));
    let call = core.func_use(arg_val, ret_use, sp(5));
    let err = core.flow(f, call).unwrap_err();
    assert_eq!(
        err,
        TypeError::TypeMismatch {
            found: Shape::Str,
            expected: Shape::Int,
            value_span: sp(3),
            use_span: sp(0),
        }
    );
}

#[test]
fn function_results_are_covariant() {
    let mut core = TypeCheckerCore::new();

    let param_use = core.int_use(sp(0));
    let ret_val = core.str(sp(1));
    let f = core.func(param_use, ret_val, sp(2));

    let arg_val = core.int(sp(3));
    let ret_use = core.int_use(sp(4));
    let call = core.func_use(arg_val, ret_use, sp(5));
    let err = core.flow(f, call).unwrap_err();
    assert_eq!(
        err,
        TypeError::TypeMismatch {
            found: Shape::Str,
            expected: Shape::Int,
            value_span: sp(1),
            use_span: sp(4),
        }
    );
}

#[test]
fn case_arms_and_wildcards() {
    let mut f = Fixture::new();
    let (some, none, other) = (f.name("Some"), f.name("None"), f.name("Other"));
    let core = &mut f.core;

    let (merged, merged_use) = core.var();
    let arm_result = core.int(sp(0));
    let (payload, payload_use) = core.var();
    let match_use = core.case_use(vec![(some, (payload_use, (arm_result, merged_use)))], None, sp(1));

    let inner = core.int(sp(2));
    let tagged = core.case((some, inner), sp(3));
    core.flow(tagged, match_use).unwrap();
    assert!(core.flows_to(inner, payload_use));
    assert!(core.flows_to(arm_result, merged_use));
    let _ = (merged, payload);

    let null = core.null(sp(4));
    let untagged = core.case((none, null), sp(5));
    let err = core.flow(untagged, match_use).unwrap_err();
    assert_eq!(
        err,
        TypeError::UnhandledCase {
            tag: none,
            value_span: sp(5),
            use_span: sp(1),
        }
    );

    // A wildcard receives the whole case value, not its payload.
    let (_, wild_use) = core.var();
    let (_, merged2_use) = core.var();
    let wild_result = core.str(sp(6));
    let wild_match = core.case_use(vec![], Some((wild_use, (wild_result, merged2_use))), sp(7));
    let str_payload = core.str(sp(8));
    let other_case = core.case((other, str_payload), sp(9));
    core.flow(other_case, wild_match).unwrap();
    assert!(core.flows_to(other_case, wild_use));
    assert!(!core.flows_to(str_payload, wild_use));
    assert!(core.flows_to(wild_result, merged2_use));
}

#[test]
fn lazy_arm_flow_waits_for_its_tag() {
    let mut f = Fixture::new();
    let (a, b) = (f.name("A"), f.name("B"));
    let core = &mut f.core;

    let (_, merged_use) = core.var();
    let (_, a_payload) = core.var();
    let (_, b_payload) = core.var();
    let a_result = core.int(sp(0));
    let b_result = core.str(sp(1));
    let match_use = core.case_use(
        vec![
            (a, (a_payload, (a_result, merged_use))),
            (b, (b_payload, (b_result, merged_use))),
        ],
        None,
        sp(2),
    );

    let payload = core.null(sp(3));
    let only_a = core.case((a, payload), sp(4));
    core.flow(only_a, match_use).unwrap();

    assert!(core.flows_to(a_result, merged_use));
    assert!(!core.flows_to(b_result, merged_use));
}

#[test]
fn reference_capabilities() {
    let mut core = TypeCheckerCore::new();

    let (cell, cell_use) = core.var();
    let read_only = core.reference(None, Some(cell), sp(0));
    let write_only = core.reference(Some(cell_use), None, sp(1));

    let (_, out_use) = core.var();
    let read = core.reference_use(None, Some(out_use), sp(2));
    let new_val = core.int(sp(3));
    let write = core.reference_use(Some(new_val), None, sp(4));

    core.flow(read_only, read).unwrap();
    core.flow(write_only, write).unwrap();
    assert!(core.flows_to(new_val, cell_use));

    assert_eq!(
        core.flow(write_only, read).unwrap_err(),
        TypeError::NotReadable {
            value_span: sp(1),
            use_span: sp(2),
        }
    );
    assert_eq!(
        core.flow(read_only, write).unwrap_err(),
        TypeError::NotWritable {
            value_span: sp(0),
            use_span: sp(4),
        }
    );
}

#[test]
fn references_are_invariant_through_both_sides() {
    let mut core = TypeCheckerCore::new();

    let (cell, cell_use) = core.var();
    let r = core.reference(Some(cell_use), Some(cell), sp(0));
    let s = core.str(sp(1));
    let write = core.reference_use(Some(s), None, sp(2));
    core.flow(r, write).unwrap();

    let int_use = core.int_use(sp(3));
    let read = core.reference_use(None, Some(int_use), sp(4));
    let err = core.flow(r, read).unwrap_err();
    assert!(matches!(err, TypeError::TypeMismatch { found: Shape::Str, .. }));
}

#[test]
fn null_use_accepts_only_null() {
    let mut core = TypeCheckerCore::new();
    let null = core.null(sp(0));
    let null_use = core.null_use(sp(1));
    core.flow(null, null_use).unwrap();

    let int = core.int(sp(2));
    let err = core.flow(int, null_use).unwrap_err();
    assert_eq!(
        err,
        TypeError::TypeMismatch {
            found: Shape::Int,
            expected: Shape::Null,
            value_span: sp(2),
            use_span: sp(1),
        }
    );
}

#[test]
fn null_check_forwards_everything_but_null() {
    let mut core = TypeCheckerCore::new();
    let (narrowed, nonnull_use) = core.var();
    let check = core.null_check_use(nonnull_use, sp(0));

    let null = core.null(sp(1));
    core.flow(null, check).unwrap();
    assert!(!core.flows_to(null, nonnull_use));

    let int = core.int(sp(2));
    core.flow(int, check).unwrap();
    assert!(core.flows_to(int, nonnull_use));

    // The narrowed side no longer sees null.
    let int_use = core.int_use(sp(3));
    core.flow(narrowed, int_use).unwrap();
}

#[test]
fn null_is_rejected_without_a_check() {
    let mut core = TypeCheckerCore::new();
    let null = core.null(sp(0));
    let int_use = core.int_use(sp(1));
    assert!(matches!(
        core.flow(null, int_use),
        Err(TypeError::TypeMismatch { found: Shape::Null, expected: Shape::Int, .. })
    ));
}

#[test]
fn restore_discards_nodes_and_edges() {
    let mut core = TypeCheckerCore::new();
    let int = core.int(sp(0));
    let (v, u) = core.var();
    core.flow(int, u).unwrap();

    let point = core.save();
    assert_eq!(point.node_count(), 2);

    let str_use = core.str_use(sp(1));
    let _ = core.flow(v, str_use);
    let (_, u2) = core.var();
    core.flow(v, u2).unwrap();
    assert_eq!(core.node_count(), 4);

    core.restore(point);
    assert_eq!(core.node_count(), 2);
    assert!(core.flows_to(int, u));

    // The failed connection is gone, so a compatible one now succeeds.
    let int_use = core.int_use(sp(2));
    core.flow(v, int_use).unwrap();
}

#[test]
fn nested_save_points_unwind_in_order() {
    let mut core = TypeCheckerCore::new();
    let outer = core.save();
    let _ = core.int(sp(0));
    let inner = core.save();
    let _ = core.int(sp(1));

    core.restore(inner);
    assert_eq!(core.node_count(), 1);
    core.restore(outer);
    assert_eq!(core.node_count(), 0);
}
