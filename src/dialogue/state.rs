//! Dialogue states, dialects and the transition table

use serde::Serialize;

/// Conversation flavor, fixed when a context is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Chat room linked to projects: project → microservice → operation
    #[default]
    Chat,
    /// Issue or pull-request thread: method and path are typed in directly
    Issue,
}

impl Dialect {
    /// Map the messenger name sent by the transport. Unknown names fall back
    /// to the chat dialect.
    pub fn from_messenger(messenger: &str) -> Self {
        match messenger {
            "GitHub Issues" | "GitHub Pull Requests" => Dialect::Issue,
            _ => Dialect::Chat,
        }
    }

    /// Fixed order in which the step engine visits states, INIT to FINAL
    pub fn steps(self) -> &'static [DialogueState] {
        match self {
            Dialect::Chat => CHAT_STEPS,
            Dialect::Issue => ISSUE_STEPS,
        }
    }

    /// State entered after the begin-modeling intent
    pub fn first_state(self) -> DialogueState {
        match self {
            Dialect::Chat => DialogueState::SelectProject,
            Dialect::Issue => DialogueState::NameTestCase,
        }
    }
}

/// Position of a conversation in the modeling flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Init,

    // Chat dialect
    SelectProject,
    SelectMicroservice,
    SelectOperation,
    EnterPathParams,

    // Issue dialect
    EnterMethod,
    EnterPath,

    // Both dialects
    NameTestCase,
    BodyQuestion,
    EnterBody,
    AssertionsQuestion,
    AssertionTypeQuestion,
    EnterStatusCode,
    AssertionsOverview,
    AddAnotherAssertionQuestion,
    BodyAssertionTypeQuestion,
    EnterBodyAssertionPart,
    EndOfBodyAssertionQuestion,

    /// Terminal: the context is finalized and dropped
    Final,
}

const CHAT_STEPS: &[DialogueState] = &[
    DialogueState::Init,
    DialogueState::SelectProject,
    DialogueState::SelectMicroservice,
    DialogueState::NameTestCase,
    DialogueState::SelectOperation,
    DialogueState::EnterPathParams,
    DialogueState::BodyQuestion,
    DialogueState::EnterBody,
    DialogueState::AssertionsQuestion,
    DialogueState::AssertionTypeQuestion,
    DialogueState::EnterStatusCode,
    DialogueState::AssertionsOverview,
    DialogueState::AddAnotherAssertionQuestion,
    DialogueState::BodyAssertionTypeQuestion,
    DialogueState::EnterBodyAssertionPart,
    DialogueState::EndOfBodyAssertionQuestion,
    DialogueState::Final,
];

const ISSUE_STEPS: &[DialogueState] = &[
    DialogueState::Init,
    DialogueState::NameTestCase,
    DialogueState::EnterMethod,
    DialogueState::EnterPath,
    DialogueState::BodyQuestion,
    DialogueState::EnterBody,
    DialogueState::AssertionsQuestion,
    DialogueState::AssertionTypeQuestion,
    DialogueState::EnterStatusCode,
    DialogueState::AssertionsOverview,
    DialogueState::AddAnotherAssertionQuestion,
    DialogueState::BodyAssertionTypeQuestion,
    DialogueState::EnterBodyAssertionPart,
    DialogueState::EndOfBodyAssertionQuestion,
    DialogueState::Final,
];

impl DialogueState {
    pub fn is_final(self) -> bool {
        self == DialogueState::Final
    }

    /// States reachable from `self` in one move for the given dialect.
    pub fn successors(self, dialect: Dialect) -> &'static [DialogueState] {
        use DialogueState as S;
        match (self, dialect) {
            (S::Init, Dialect::Chat) => &[S::SelectProject],
            (S::Init, Dialect::Issue) => &[S::NameTestCase],

            (S::SelectProject, Dialect::Chat) => &[S::SelectMicroservice, S::Final],
            (S::SelectMicroservice, Dialect::Chat) => &[S::NameTestCase, S::Final],
            (S::NameTestCase, Dialect::Chat) => &[S::SelectOperation],
            (S::SelectOperation, Dialect::Chat) => &[S::EnterPathParams, S::Final],
            (S::EnterPathParams, Dialect::Chat) => &[S::BodyQuestion],

            (S::NameTestCase, Dialect::Issue) => &[S::EnterMethod],
            (S::EnterMethod, Dialect::Issue) => &[S::EnterPath],
            (S::EnterPath, Dialect::Issue) => &[S::BodyQuestion],

            (S::BodyQuestion, _) => &[S::EnterBody, S::AssertionsQuestion],
            (S::EnterBody, _) => &[S::AssertionsQuestion],
            (S::AssertionsQuestion, _) => &[S::AssertionTypeQuestion, S::Final],
            (S::AssertionTypeQuestion, _) => &[S::EnterStatusCode, S::BodyAssertionTypeQuestion],
            (S::EnterStatusCode, _) => &[S::AssertionsOverview],
            (S::AssertionsOverview, _) => &[S::AddAnotherAssertionQuestion],
            (S::AddAnotherAssertionQuestion, _) => &[S::AssertionTypeQuestion, S::Final],
            (S::BodyAssertionTypeQuestion, _) => &[S::EnterBodyAssertionPart],
            (S::EnterBodyAssertionPart, _) => {
                &[S::AssertionsOverview, S::EndOfBodyAssertionQuestion]
            }
            (S::EndOfBodyAssertionQuestion, _) => {
                &[S::BodyAssertionTypeQuestion, S::AssertionsOverview]
            }

            // Dialect-foreign states and FINAL have no way out
            _ => &[],
        }
    }

    pub fn can_move_to(self, next: DialogueState, dialect: Dialect) -> bool {
        self.successors(dialect).contains(&next)
    }
}
