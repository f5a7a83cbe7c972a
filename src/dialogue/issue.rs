//! Issue and pull-request dialect: no project lookup, method and path are
//! typed in directly.

use super::handler::{non_empty, DialogueHandler, ResponseText, Turn, ValidationError};
use super::messages::*;
use super::shared;
use super::{DialogueContext, DialogueState as S, Intent, PathParameterSet};
use async_trait::async_trait;

#[derive(Debug, Default, Clone, Copy)]
pub struct IssueHandler;

impl IssueHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DialogueHandler for IssueHandler {
    async fn ask_question(
        &self,
        state: S,
        ctx: &mut DialogueContext,
        out: &mut ResponseText,
    ) -> bool {
        match state {
            S::EnterMethod => {
                out.sentence(ENTER_REQUEST_METHOD);
                false
            }
            S::EnterPath => {
                out.sentence(ENTER_REQUEST_PATH);
                false
            }
            _ => shared::ask_question(state, ctx, out),
        }
    }

    async fn consume_answer(
        &self,
        state: S,
        ctx: &mut DialogueContext,
        turn: &Turn<'_>,
        out: &mut ResponseText,
    ) -> bool {
        match state {
            S::NameTestCase => shared::consume_test_case_name(ctx, turn, out, S::EnterMethod),
            S::EnterMethod => match turn.intent {
                Intent::RequestMethod(method) => {
                    ctx.request_method = Some(method.as_str().to_string());
                    ctx.move_to(S::EnterPath);
                    true
                }
                _ => {
                    out.reject(&ValidationError::UnrecognizedIntent);
                    false
                }
            },
            S::EnterPath => match non_empty(turn.message) {
                Ok(path) => {
                    let method = ctx.request_method.clone().unwrap_or_default();
                    out.sentence(issue_request(&method, path));
                    ctx.request_path = Some(path.to_string());
                    ctx.path_parameters = PathParameterSet::default();
                    ctx.move_to(S::BodyQuestion);
                    true
                }
                Err(error) => {
                    out.reject(&error);
                    false
                }
            },
            _ => shared::consume_answer(state, ctx, turn, out),
        }
    }
}
