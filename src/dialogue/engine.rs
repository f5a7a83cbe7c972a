//! Step engine
//!
//! One inbound message is one turn. The turn consumes the answer for the
//! state the conversation was waiting in, then keeps asking the questions of
//! every state it cascades into until a question needs user input. All text
//! produced along the way goes into a single reply.

use super::handler::{DialogueHandler, ResponseText, Turn};
use super::messages::{ERROR_GENERATING_CODE, GENERATED_CODE_INTRO, MODELED_TEST_INTRO};
use super::{ChannelContextStore, ChatHandler, Dialect, DialogueContext, Intent, IssueHandler};
use crate::services::http::{HttpFinalizer, HttpProjectDirectory, HttpSpecService};
use crate::services::{Finalizer, ProjectDirectory, SpecService, TestSuggestion};
use std::sync::Arc;

/// Upper bound on passes over the step order within one turn
const MAX_PASSES: usize = 16;

const SUGGESTION_DESCRIPTION: &str = "Modeled with API testing bot.";

/// Engine wired to the HTTP collaborators
pub type ProductionEngine = DialogueEngine<HttpProjectDirectory, HttpSpecService, HttpFinalizer>;

/// Reply to one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub text: String,
    /// The conversation reached FINAL and its context was dropped
    pub closed: bool,
}

pub struct DialogueEngine<P, Sp, F> {
    chat: ChatHandler<P, Sp>,
    issue: IssueHandler,
    finalizer: F,
    store: Arc<ChannelContextStore>,
}

impl<P, Sp, F> DialogueEngine<P, Sp, F>
where
    P: ProjectDirectory,
    Sp: SpecService,
    F: Finalizer,
{
    pub fn new(directory: P, specs: Sp, finalizer: F, store: Arc<ChannelContextStore>) -> Self {
        Self {
            chat: ChatHandler::new(directory, specs),
            issue: IssueHandler::new(),
            finalizer,
            store,
        }
    }

    pub fn store(&self) -> &Arc<ChannelContextStore> {
        &self.store
    }

    fn handler(&self, dialect: Dialect) -> &dyn DialogueHandler {
        match dialect {
            Dialect::Chat => &self.chat,
            Dialect::Issue => &self.issue,
        }
    }

    /// Run one turn for `channel`. `dialect` only matters when the channel
    /// has no live conversation yet.
    pub async fn handle(
        &self,
        channel: &str,
        dialect: Dialect,
        message: &str,
        intent: &Intent,
    ) -> StepOutcome {
        let mut ctx = self.store.checkout(channel, dialect).await;
        tracing::debug!(channel, state = ?ctx.state(), ?intent, "turn");

        let turn = Turn { message, intent };
        let mut out = ResponseText::new();
        self.step(&mut ctx, &turn, &mut out).await;

        let closed = ctx.is_final();
        if closed {
            self.finalize(&ctx, &mut out).await;
        }
        self.store.release(ctx).await;

        StepOutcome {
            text: out.into_string(),
            closed,
        }
    }

    async fn step(&self, ctx: &mut DialogueContext, turn: &Turn<'_>, out: &mut ResponseText) {
        let handler = self.handler(ctx.dialect());
        let steps = ctx.dialect().steps();

        let mut advance = false;
        // State whose answer this turn carries; consumed in the first pass only
        let mut waiting = Some(ctx.state());

        for _ in 0..MAX_PASSES {
            for &step in steps {
                if advance && ctx.state() == step {
                    advance = handler.ask_question(step, ctx, out).await;
                }
                if waiting == Some(step) {
                    advance = handler.consume_answer(step, ctx, turn, out).await;
                }
            }
            waiting = None;

            if !advance || ctx.is_final() {
                return;
            }
        }

        tracing::warn!(
            channel = %ctx.channel(),
            state = ?ctx.state(),
            "step cascade did not settle"
        );
    }

    /// Hand the finished test model to the dialect's finalizer.
    async fn finalize(&self, ctx: &DialogueContext, out: &mut ResponseText) {
        if !ctx.request_is_complete() {
            tracing::debug!(channel = %ctx.channel(), "closed without a request");
            return;
        }

        let model = ctx.to_test_model();
        match ctx.dialect() {
            Dialect::Chat => {
                let Some(component_id) = ctx.microservice.as_ref().map(|c| c.id) else {
                    tracing::warn!(channel = %ctx.channel(), "no microservice to attach test to");
                    return;
                };
                let suggestion = TestSuggestion {
                    component_id,
                    test_model: model,
                    description: SUGGESTION_DESCRIPTION.to_string(),
                };
                match self.finalizer.persist(&suggestion).await {
                    Ok(()) => {
                        tracing::info!(channel = %ctx.channel(), component_id, "test suggestion stored");
                    }
                    Err(e) => {
                        tracing::warn!(channel = %ctx.channel(), error = %e, "storing test suggestion failed");
                    }
                }
            }
            Dialect::Issue => {
                let Some(test_case) = model.test_cases.into_iter().next() else {
                    return;
                };
                out.line(MODELED_TEST_INTRO);
                for request in &test_case.requests {
                    out.line(request.describe());
                }
                match self.finalizer.generate_code(&test_case).await {
                    Ok(code) => {
                        out.line(GENERATED_CODE_INTRO);
                        out.line(format!("```java\n{}\n```", code.trim_end()));
                    }
                    Err(e) => {
                        tracing::warn!(channel = %ctx.channel(), error = %e, "code generation failed");
                        out.line(ERROR_GENERATING_CODE);
                    }
                }
            }
        }
    }
}
