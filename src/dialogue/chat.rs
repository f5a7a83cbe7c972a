//! Chat dialect: the test is attached to a project's microservice and the
//! request is picked from the microservice's API document.

use super::handler::{non_empty, parse_choice, DialogueHandler, ResponseText, Turn};
use super::messages::*;
use super::shared;
use super::{DialogueContext, DialogueState as S, PathParameterSet};
use crate::services::{Component, Project, ProjectDirectory, SpecService};
use async_trait::async_trait;

pub struct ChatHandler<P, Sp> {
    directory: P,
    specs: Sp,
}

impl<P, Sp> ChatHandler<P, Sp>
where
    P: ProjectDirectory,
    Sp: SpecService,
{
    pub fn new(directory: P, specs: Sp) -> Self {
        Self { directory, specs }
    }

    async fn ask_project(&self, ctx: &mut DialogueContext, out: &mut ResponseText) -> bool {
        let projects = match self.directory.list_projects_linked_to(ctx.channel()).await {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!(channel = %ctx.channel(), error = %e, "project lookup failed");
                out.line(ERROR_LOADING_PROJECTS);
                ctx.move_to(S::Final);
                return false;
            }
        };

        match projects.as_slice() {
            [] => {
                out.line(NO_PROJECT_LINKED);
                ctx.move_to(S::Final);
                false
            }
            [only] => {
                let only = only.clone();
                ctx.projects = projects;
                select_project(ctx, only, out);
                true
            }
            _ => {
                out.sentence(SELECT_PROJECT);
                for (i, project) in projects.iter().enumerate() {
                    out.line(format!("{}. {}", i + 1, project.name));
                }
                ctx.projects = projects;
                false
            }
        }
    }

    fn ask_microservice(&self, ctx: &mut DialogueContext, out: &mut ResponseText) -> bool {
        let microservices = ctx
            .project
            .as_ref()
            .map(Project::microservices)
            .unwrap_or_default();

        match microservices.as_slice() {
            [] => {
                out.line(NO_MICROSERVICE_IN_PROJECT);
                ctx.move_to(S::Final);
                false
            }
            [only] => {
                let only = only.clone();
                ctx.microservices = microservices;
                select_microservice(ctx, only, out);
                true
            }
            _ => {
                out.sentence(SELECT_MICROSERVICE);
                for (i, component) in microservices.iter().enumerate() {
                    out.line(format!("{}. {}", i + 1, component.name));
                }
                ctx.microservices = microservices;
                false
            }
        }
    }

    async fn ask_operation(&self, ctx: &mut DialogueContext, out: &mut ResponseText) -> bool {
        let Some(component_id) = ctx.microservice.as_ref().map(|c| c.id) else {
            out.line(NO_OPERATIONS);
            ctx.move_to(S::Final);
            return false;
        };

        let operations = match self.specs.get_operations_for(component_id).await {
            Ok(operations) => operations,
            Err(e) => {
                tracing::warn!(component_id, error = %e, "operation lookup failed");
                out.line(ERROR_LOADING_OPERATIONS);
                ctx.move_to(S::Final);
                return false;
            }
        };

        if operations.is_empty() {
            out.line(NO_OPERATIONS);
            ctx.move_to(S::Final);
            return false;
        }

        out.sentence(SELECT_OPERATION);
        for (i, operation) in operations.iter().enumerate() {
            out.line(format!(
                "{}. {} {}",
                i + 1,
                operation.method.to_uppercase(),
                operation.path
            ));
        }
        ctx.operations = operations;
        false
    }

    fn consume_operation(
        &self,
        ctx: &mut DialogueContext,
        turn: &Turn<'_>,
        out: &mut ResponseText,
    ) -> bool {
        let choice = match parse_choice(turn.message, ctx.operations.len()) {
            Ok(choice) => choice,
            Err(error) => {
                out.reject(&error);
                return false;
            }
        };
        let operation = ctx.operations[choice - 1].clone();
        let method = operation.method.to_uppercase();

        out.sentence(test_operation(&method, &operation.path));
        ctx.request_method = Some(method);
        ctx.request_path = Some(operation.path);
        ctx.path_parameters = PathParameterSet::new(operation.path_parameter_names);
        ctx.move_to(S::EnterPathParams);
        true
    }

    fn ask_path_params(&self, ctx: &mut DialogueContext, out: &mut ResponseText) -> bool {
        let Some(name) = ctx.path_parameters.next_unset() else {
            ctx.move_to(S::BodyQuestion);
            return true;
        };
        out.sentence(PATH_PARAMS_INFO);
        out.sentence(enter_path_param(name));
        false
    }

    fn consume_path_param(
        &self,
        ctx: &mut DialogueContext,
        turn: &Turn<'_>,
        out: &mut ResponseText,
    ) -> bool {
        let value = match non_empty(turn.message) {
            Ok(value) => value,
            Err(error) => {
                out.reject(&error);
                return false;
            }
        };
        if let Ok(name) = ctx.path_parameters.set_next(value) {
            out.sentence(path_param_set(&name, value));
        }

        match ctx.path_parameters.next_unset() {
            Some(next) => {
                out.sentence(enter_path_param(next));
                false
            }
            None => {
                out.sentence(request_url(&ctx.request_url()));
                ctx.move_to(S::BodyQuestion);
                true
            }
        }
    }
}

#[async_trait]
impl<P, Sp> DialogueHandler for ChatHandler<P, Sp>
where
    P: ProjectDirectory,
    Sp: SpecService,
{
    async fn ask_question(
        &self,
        state: S,
        ctx: &mut DialogueContext,
        out: &mut ResponseText,
    ) -> bool {
        match state {
            S::SelectProject => self.ask_project(ctx, out).await,
            S::SelectMicroservice => self.ask_microservice(ctx, out),
            S::SelectOperation => self.ask_operation(ctx, out).await,
            S::EnterPathParams => self.ask_path_params(ctx, out),
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
            S::SelectProject => match parse_choice(turn.message, ctx.projects.len()) {
                Ok(choice) => {
                    let project = ctx.projects[choice - 1].clone();
                    select_project(ctx, project, out);
                    true
                }
                Err(error) => {
                    out.reject(&error);
                    false
                }
            },
            S::SelectMicroservice => match parse_choice(turn.message, ctx.microservices.len()) {
                Ok(choice) => {
                    let component = ctx.microservices[choice - 1].clone();
                    select_microservice(ctx, component, out);
                    true
                }
                Err(error) => {
                    out.reject(&error);
                    false
                }
            },
            S::NameTestCase => shared::consume_test_case_name(ctx, turn, out, S::SelectOperation),
            S::SelectOperation => self.consume_operation(ctx, turn, out),
            S::EnterPathParams => self.consume_path_param(ctx, turn, out),
            _ => shared::consume_answer(state, ctx, turn, out),
        }
    }
}

fn select_project(ctx: &mut DialogueContext, project: Project, out: &mut ResponseText) {
    out.sentence(test_added_to_project(&project.name));
    ctx.project = Some(project);
    ctx.move_to(S::SelectMicroservice);
}

fn select_microservice(ctx: &mut DialogueContext, component: Component, out: &mut ResponseText) {
    out.sentence(test_added_to_microservice(&component.name));
    ctx.microservice = Some(component);
    ctx.move_to(S::NameTestCase);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{Dialect, Intent};
    use crate::services::testing::*;
    use std::sync::Arc;

    fn handler(
        directory: &Arc<MockProjectDirectory>,
        specs: &Arc<MockSpecService>,
    ) -> ChatHandler<Arc<MockProjectDirectory>, Arc<MockSpecService>> {
        ChatHandler::new(directory.clone(), specs.clone())
    }

    fn begun(channel: &str) -> DialogueContext {
        let mut ctx = DialogueContext::new(channel, Dialect::Chat);
        ctx.move_to(S::SelectProject);
        ctx
    }

    #[tokio::test]
    async fn several_projects_are_listed() {
        let directory = Arc::new(MockProjectDirectory::new());
        directory.link("room", project(1, "Mensa", vec![]));
        directory.link("room", project(2, "Library", vec![]));
        let specs = Arc::new(MockSpecService::new());
        let handler = handler(&directory, &specs);

        let mut ctx = begun("room");
        let mut out = ResponseText::new();
        let advance = handler
            .ask_question(S::SelectProject, &mut ctx, &mut out)
            .await;

        assert!(!advance);
        assert_eq!(ctx.state(), S::SelectProject);
        assert!(out.as_str().ends_with("\n1. Mensa\n2. Library"));
        assert_eq!(ctx.projects.len(), 2);
    }

    #[tokio::test]
    async fn project_choice_out_of_range_is_rejected() {
        let directory = Arc::new(MockProjectDirectory::new());
        directory.link("room", project(1, "Mensa", vec![]));
        directory.link("room", project(2, "Library", vec![]));
        let specs = Arc::new(MockSpecService::new());
        let handler = handler(&directory, &specs);

        let mut ctx = begun("room");
        let mut out = ResponseText::new();
        handler
            .ask_question(S::SelectProject, &mut ctx, &mut out)
            .await;

        let intent = Intent::from("none");
        let mut out = ResponseText::new();
        let turn = Turn {
            message: "3",
            intent: &intent,
        };
        let advance = handler
            .consume_answer(S::SelectProject, &mut ctx, &turn, &mut out)
            .await;

        assert!(!advance);
        assert_eq!(
            out.as_str(),
            ":warning:Please enter a number between 1 and 2!:warning:"
        );
        assert!(ctx.project.is_none());
    }

    #[tokio::test]
    async fn operation_lookup_failure_ends_dialogue() {
        let directory = Arc::new(MockProjectDirectory::new());
        let specs = Arc::new(MockSpecService::new());
        specs.fail();
        let handler = handler(&directory, &specs);

        let mut ctx = begun("room");
        ctx.project = Some(project(1, "Mensa", vec![microservice(7, "dishes")]));
        ctx.move_to(S::SelectMicroservice);
        ctx.microservice = Some(microservice(7, "dishes"));
        ctx.move_to(S::NameTestCase);
        ctx.move_to(S::SelectOperation);

        let mut out = ResponseText::new();
        let advance = handler
            .ask_question(S::SelectOperation, &mut ctx, &mut out)
            .await;

        assert!(!advance);
        assert!(ctx.is_final());
        assert_eq!(out.as_str(), ERROR_LOADING_OPERATIONS);
    }

    #[tokio::test]
    async fn path_parameters_are_asked_one_by_one() {
        let directory = Arc::new(MockProjectDirectory::new());
        let specs = Arc::new(MockSpecService::new());
        let handler = handler(&directory, &specs);

        let mut ctx = begun("room");
        ctx.move_to(S::SelectMicroservice);
        ctx.move_to(S::NameTestCase);
        ctx.move_to(S::SelectOperation);
        ctx.operations = vec![operation("get", "/mensa/{city}/dishes/{day}", &["city", "day"])];

        let intent = Intent::from("none");
        let answer = |message: &'static str| Turn {
            message,
            intent: &intent,
        };

        let mut out = ResponseText::new();
        assert!(
            handler
                .consume_answer(S::SelectOperation, &mut ctx, &answer("1"), &mut out)
                .await
        );
        assert_eq!(ctx.request_method.as_deref(), Some("GET"));

        let mut out = ResponseText::new();
        assert!(
            !handler
                .ask_question(S::EnterPathParams, &mut ctx, &mut out)
                .await
        );
        assert!(out.as_str().contains("`city`"));

        let mut out = ResponseText::new();
        assert!(
            !handler
                .consume_answer(S::EnterPathParams, &mut ctx, &answer("Aachen"), &mut out)
                .await
        );
        assert!(out.as_str().contains("`day`"));

        let mut out = ResponseText::new();
        assert!(
            handler
                .consume_answer(S::EnterPathParams, &mut ctx, &answer(" monday "), &mut out)
                .await
        );
        assert_eq!(ctx.state(), S::BodyQuestion);
        assert!(out
            .as_str()
            .contains("The request URL now is `/mensa/Aachen/dishes/monday`."));
    }

    #[tokio::test]
    async fn blank_path_parameter_is_reasked() {
        let directory = Arc::new(MockProjectDirectory::new());
        let specs = Arc::new(MockSpecService::new());
        let handler = handler(&directory, &specs);

        let mut ctx = begun("room");
        ctx.move_to(S::SelectMicroservice);
        ctx.move_to(S::NameTestCase);
        ctx.move_to(S::SelectOperation);
        ctx.operations = vec![operation("get", "/mensa/{city}/dishes", &["city"])];

        let intent = Intent::from("none");
        let answer = |message: &'static str| Turn {
            message,
            intent: &intent,
        };

        let mut out = ResponseText::new();
        handler
            .consume_answer(S::SelectOperation, &mut ctx, &answer("1"), &mut out)
            .await;

        let mut out = ResponseText::new();
        let advance = handler
            .consume_answer(S::EnterPathParams, &mut ctx, &answer("   "), &mut out)
            .await;

        assert!(!advance);
        assert_eq!(out.as_str(), "The answer must not be empty. Please try again.");
        assert_eq!(ctx.state(), S::EnterPathParams);
        assert_eq!(ctx.path_parameters.next_unset(), Some("city"));
        assert!(ctx.path_parameters.values().is_empty());

        let mut out = ResponseText::new();
        assert!(
            handler
                .consume_answer(S::EnterPathParams, &mut ctx, &answer("Aachen"), &mut out)
                .await
        );
        assert_eq!(ctx.request_url(), "/mensa/Aachen/dishes");
    }
}
