//! Type errors rendered through the terminal emitter.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use brook_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use brook_diagnostic::ErrorCode;
use brook_ir::ast::{BinaryOp, Expr, ExprKind, Literal, OpType, TopLevel};
use brook_ir::{Span, StringInterner};
use brook_types::TypeckState;
use pretty_assertions::assert_eq;

fn literal(interner: &StringInterner, kind: Literal, text: &str, span: Span) -> Expr {
    Expr {
        kind: ExprKind::Literal {
            kind,
            text: interner.intern(text),
        },
        span,
    }
}

fn render(source: &str, diag: &brook_diagnostic::Diagnostic) -> String {
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_source(source);
    emitter.emit(diag);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn mismatch_renders_with_line_and_column() {
    let source = "# sum\n1 + \"s\"";
    let interner = StringInterner::new();

    // `1` at 6..7, `"s"` at 10..13
    let sum = Expr {
        kind: ExprKind::Binary {
            op: BinaryOp::Add,
            op_type: OpType::IntOp,
            left: Box::new(literal(&interner, Literal::Int, "1", Span::new(6, 7))),
            right: Box::new(literal(&interner, Literal::Str, "\"s\"", Span::new(10, 13))),
        },
        span: Span::new(6, 13),
    };

    let err = TypeckState::new()
        .check_script(&[TopLevel::Expr(sum)])
        .unwrap_err();
    let diag = err.to_diagnostic(&interner);
    assert_eq!(diag.code, ErrorCode::E2007);

    let text = render(source, &diag);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "error[E2007]: type mismatch: expected int, found string",
            "  --> 2:5: value of type int is required here",
            "    |",
            "  2 | 1 + \"s\"",
            "    |     ^^^",
            "      2:5: but that value may be of type string, originating here",
            "    |",
            "  2 | 1 + \"s\"",
            "    |     ---",
            "",
        ]
    );
}

#[test]
fn undefined_variable_has_a_single_label() {
    let source = "ghost";
    let interner = StringInterner::new();
    let ghost = Expr {
        kind: ExprKind::Variable(interner.intern("ghost")),
        span: Span::new(0, 5),
    };

    let err = TypeckState::new()
        .check_script(&[TopLevel::Expr(ghost)])
        .unwrap_err();
    let diag = err.to_diagnostic(&interner);
    assert_eq!(diag.labels.len(), 1);

    let text = render(source, &diag);
    assert!(text.starts_with("error[E2001]: undefined variable\n"));
    assert!(text.contains("  --> 1:1: undefined variable `ghost`"));
    assert!(text.contains("  1 | ghost"));
    assert!(text.contains("    | ^^^^^"));
}
