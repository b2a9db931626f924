//! Pattern handling.

use brook_ir::ast::{LetPattern, MatchArm, MatchPattern};
use brook_ir::{Name, Span};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::bindings::Bindings;
use crate::core::{TypeCheckerCore, Use};
use crate::error::{TypeError, UnreachableReason};

/// Bind the names in a function-argument pattern.
///
/// Returns the use the argument must flow into. A record pattern demands
/// each listed field and nothing else.
pub fn process_let_pattern(
    engine: &mut TypeCheckerCore,
    bindings: &mut Bindings,
    pattern: &LetPattern,
) -> Result<Use, TypeError> {
    let (arg, arg_use) = engine.var();
    match pattern {
        LetPattern::Var(name) => bindings.insert(*name, arg),
        LetPattern::Record(fields) => {
            let mut seen: FxHashMap<Name, Span> = FxHashMap::default();
            for field in fields {
                if let Some(first) = seen.insert(field.name, field.span) {
                    return Err(TypeError::RepeatedFieldPattern {
                        name: field.name,
                        first,
                        second: field.span,
                    });
                }

                let field_use = process_let_pattern(engine, bindings, &field.pattern)?;
                let bound = engine.obj_use((field.name, field_use), field.span);
                engine.flow(arg, bound)?;
            }
        }
    }
    Ok(arg_use)
}

/// Rejects match arms that can never be selected.
///
/// An arm is dead if it follows a wildcard arm or repeats an earlier tag.
#[derive(Default)]
pub(super) struct ArmTracker {
    wildcard: Option<Span>,
    tags: SmallVec<[(Name, Span); 8]>,
}

impl ArmTracker {
    pub(super) fn visit(&mut self, arm: &MatchArm) -> Result<(), TypeError> {
        if let Some(wildcard) = self.wildcard {
            return Err(TypeError::UnreachablePattern {
                reason: UnreachableReason::AfterWildcard,
                arm: arm.span,
                earlier: wildcard,
            });
        }
        match arm.pattern {
            MatchPattern::Case { tag, .. } => {
                if let Some(&(_, earlier)) = self.tags.iter().find(|(seen, _)| *seen == tag) {
                    return Err(TypeError::UnreachablePattern {
                        reason: UnreachableReason::DuplicateTag(tag),
                        arm: arm.span,
                        earlier,
                    });
                }
                self.tags.push((tag, arm.span));
            }
            MatchPattern::Wildcard { .. } => self.wildcard = Some(arm.span),
        }
        Ok(())
    }
}
