use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builder_collects_labels_in_order() {
    let diag = Diagnostic::error(ErrorCode::E2007)
        .with_message("type mismatch")
        .with_label(Span::new(10, 15), "found int here")
        .with_secondary_label(Span::new(0, 5), "expected string here")
        .with_note("values flow left to right");

    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.labels[0], Label::primary(Span::new(10, 15), "found int here"));
    assert_eq!(
        diag.labels[1],
        Label::secondary(Span::new(0, 5), "expected string here")
    );
    assert_eq!(diag.notes, vec!["values flow left to right".to_string()]);
}

#[test]
fn labels_keep_insertion_order_not_priority() {
    let diag = Diagnostic::error(ErrorCode::E2003)
        .with_secondary_label(Span::new(1, 2), "context")
        .with_label(Span::new(7, 9), "here");
    let primary: Vec<_> = diag.labels.iter().map(|l| l.is_primary).collect();
    assert_eq!(primary, vec![false, true]);

    let bare = Diagnostic::error(ErrorCode::E3001);
    assert!(bare.labels.is_empty());
    assert!(bare.message.is_empty());
}

#[test]
fn display_includes_code_and_message() {
    let diag = Diagnostic::error(ErrorCode::E2001).with_message("undefined variable `x`");
    assert_eq!(diag.to_string(), "error[E2001]: undefined variable `x`");
}
