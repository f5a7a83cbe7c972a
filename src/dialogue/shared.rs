//! States handled the same way in both dialects
//!
//! Dialect handlers match their own states first and fall through to
//! [`ask_question`] and [`consume_answer`] for everything else. None of the
//! shared states touch a collaborator, so these are plain functions.

use super::handler::{
    non_empty, parse_choice, parse_status_code, yes_no, ResponseText, Turn, ValidationError,
};
use super::messages::*;
use super::{BodyAssertionKind, DialogueContext, DialogueState as S, Intent};
use crate::assertion::{BodyAssertionOperator, StatusCodeAssertion};

pub fn ask_question(state: S, ctx: &mut DialogueContext, out: &mut ResponseText) -> bool {
    match state {
        S::NameTestCase => {
            out.sentence(ENTER_TEST_CASE_NAME);
            false
        }
        S::BodyQuestion => {
            out.sentence(INCLUDE_BODY_QUESTION);
            false
        }
        S::EnterBody => {
            out.sentence(ENTER_BODY);
            false
        }
        S::AssertionsQuestion => {
            out.sentence(INCLUDE_ASSERTIONS_QUESTION);
            false
        }
        S::AssertionTypeQuestion => {
            out.lines(&SELECT_ASSERTION_TYPE);
            false
        }
        S::EnterStatusCode => {
            out.sentence(EXPECTED_STATUS_CODE_QUESTION);
            false
        }
        S::AssertionsOverview => {
            out.push("\n");
            out.line(ASSERTION_OVERVIEW);
            for assertion in ctx.assertions() {
                out.line(format!("- {assertion}"));
            }
            out.push("\n\n");
            ctx.move_to(S::AddAnotherAssertionQuestion);
            true
        }
        S::AddAnotherAssertionQuestion => {
            out.sentence(ADD_ANOTHER_ASSERTION);
            false
        }
        S::BodyAssertionTypeQuestion => {
            out.lines(&SELECT_BODY_ASSERTION_TYPE);
            false
        }
        S::EnterBodyAssertionPart => {
            let wants_type = ctx.wip_kind().is_some_and(BodyAssertionKind::is_type_check);
            out.sentence(if wants_type {
                ENTER_EXPECTED_TYPE
            } else {
                ENTER_FIELD_NAME
            });
            false
        }
        S::EndOfBodyAssertionQuestion => {
            if let Some(chain) = ctx.wip_chain() {
                out.sentence(format!("{ASSERTION_PREVIEW} Response body {chain}"));
                if let Some(field) = chain.tail().field_name() {
                    out.line(refine_field_question(field));
                }
            }
            false
        }
        S::Init | S::Final => false,
        other => {
            tracing::warn!(state = ?other, dialect = ?ctx.dialect(), "no question for state");
            false
        }
    }
}

pub fn consume_answer(
    state: S,
    ctx: &mut DialogueContext,
    turn: &Turn<'_>,
    out: &mut ResponseText,
) -> bool {
    let result = match state {
        S::Init => Ok(begin(ctx, turn, out)),
        S::BodyQuestion => yes_no(turn.intent).map(|include| {
            out.sentence(OK);
            ctx.move_to(if include { S::EnterBody } else { S::AssertionsQuestion });
            true
        }),
        S::EnterBody => consume_body(ctx, turn, out),
        S::AssertionsQuestion | S::AddAnotherAssertionQuestion => {
            yes_no(turn.intent).map(|more| {
                out.sentence(OK);
                if more {
                    ctx.move_to(S::AssertionTypeQuestion);
                    true
                } else {
                    ctx.move_to(S::Final);
                    false
                }
            })
        }
        S::AssertionTypeQuestion => {
            parse_choice(turn.message, SELECT_ASSERTION_TYPE.len() - 1).map(|choice| {
                ctx.move_to(if choice == 1 {
                    S::EnterStatusCode
                } else {
                    S::BodyAssertionTypeQuestion
                });
                true
            })
        }
        S::EnterStatusCode => parse_status_code(turn.message).map(|code| {
            let added = ctx.add_assertion(StatusCodeAssertion::equals(code));
            out.sentence(if added { ASSERTION_ADDED } else { ASSERTION_EXISTS });
            ctx.move_to(S::AssertionsOverview);
            true
        }),
        S::BodyAssertionTypeQuestion => {
            parse_choice(turn.message, BodyAssertionKind::COUNT).map(|choice| {
                if let Some(kind) = BodyAssertionKind::from_choice(choice) {
                    ctx.set_wip_kind(kind);
                }
                ctx.move_to(S::EnterBodyAssertionPart);
                true
            })
        }
        S::EnterBodyAssertionPart => consume_body_assertion_part(ctx, turn, out),
        S::EndOfBodyAssertionQuestion => yes_no(turn.intent).map(|refine| {
            out.sentence(OK);
            if refine {
                ctx.move_to(S::BodyAssertionTypeQuestion);
            } else {
                commit(ctx, out);
            }
            true
        }),
        // Only ever passed through within a single turn
        S::AssertionsOverview | S::Final => Ok(false),
        other => {
            tracing::warn!(state = ?other, dialect = ?ctx.dialect(), "no answer handling for state");
            Ok(false)
        }
    };

    result.unwrap_or_else(|error| {
        out.reject(&error);
        false
    })
}

/// Store the test case name and move on to `next`.
pub fn consume_test_case_name(
    ctx: &mut DialogueContext,
    turn: &Turn<'_>,
    out: &mut ResponseText,
    next: S,
) -> bool {
    match non_empty(turn.message) {
        Ok(name) => {
            out.sentence(test_case_named(name));
            ctx.test_case_name = Some(name.to_string());
            ctx.move_to(next);
            true
        }
        Err(error) => {
            out.reject(&error);
            false
        }
    }
}

/// Anything but the begin-modeling intent leaves a fresh context untouched.
fn begin(ctx: &mut DialogueContext, turn: &Turn<'_>, out: &mut ResponseText) -> bool {
    if *turn.intent != Intent::BeginModeling {
        return false;
    }
    out.sentence(MODEL_TEST_CASE_INTRO);
    ctx.move_to(ctx.dialect().first_state());
    true
}

fn consume_body(
    ctx: &mut DialogueContext,
    turn: &Turn<'_>,
    out: &mut ResponseText,
) -> Result<bool, ValidationError> {
    serde_json::from_str::<serde_json::Value>(turn.message)
        .map_err(|_| ValidationError::InvalidJson)?;
    ctx.request_body = Some(turn.message.trim().to_string());
    out.sentence(BODY_SET);
    ctx.move_to(S::AssertionsQuestion);
    Ok(true)
}

fn consume_body_assertion_part(
    ctx: &mut DialogueContext,
    turn: &Turn<'_>,
    out: &mut ResponseText,
) -> Result<bool, ValidationError> {
    let kind = ctx.wip_kind().unwrap_or(BodyAssertionKind::FieldCheck);

    if kind.is_type_check() {
        let Intent::Type(expected) = turn.intent else {
            return Err(ValidationError::UnknownType);
        };
        ctx.extend_wip(kind.wrap(BodyAssertionOperator::type_check(*expected)));
        commit(ctx, out);
    } else {
        let field = non_empty(turn.message)?;
        ctx.extend_wip(kind.wrap(BodyAssertionOperator::has_field(field)));
        ctx.move_to(S::EndOfBodyAssertionQuestion);
    }
    Ok(true)
}

fn commit(ctx: &mut DialogueContext, out: &mut ResponseText) {
    let added = ctx.commit_wip().unwrap_or(false);
    out.sentence(if added { ASSERTION_ADDED } else { ASSERTION_EXISTS });
    ctx.move_to(S::AssertionsOverview);
}
