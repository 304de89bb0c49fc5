use std::collections::HashSet;

use crate::domain::entities::candidate::NotifyRow;
use crate::domain::entities::user::PERM_NOTIFY;
use crate::domain::visibility::ActorContext;
use crate::errors::AppError;
use crate::interfaces::repositories::candidate::CandidateRepository;
use crate::interfaces::repositories::notifier::Notifier;

pub struct NotifyHandler<C, N>
where
    C: CandidateRepository,
    N: Notifier,
{
    pub candidate_repo: C,
    pub notifier: N,
}

impl<C, N> NotifyHandler<C, N>
where
    C: CandidateRepository,
    N: Notifier,
{
    pub fn new(candidate_repo: C, notifier: N) -> Self {
        NotifyHandler {
            candidate_repo,
            notifier,
        }
    }

    /// Sends one webhook message announcing that the selected candidates
    /// entered the interview stage. Gated by an explicit per-actor grant.
    pub async fn notify(&self, actor: &ActorContext, ids: &[i32]) -> Result<String, AppError> {
        if !actor.roles.can(PERM_NOTIFY) {
            return Err(AppError::ForbiddenAccess);
        }

        let rows = self.candidate_repo.notify_rows(ids).await?;
        if rows.is_empty() {
            return Err(AppError::NotFound("No candidates selected".into()));
        }

        let message = compose_message(&rows);
        self.notifier.send_text(&message).await?;

        tracing::info!(
            actor = %actor.username,
            candidates = rows.len(),
            "Interview notification sent"
        );
        Ok(message)
    }
}

/// Distinct candidate names and distinct first-interviewer names, in first
/// appearance order. A candidate with no assigned interviewer contributes a
/// single empty placeholder.
pub fn compose_message(rows: &[NotifyRow]) -> String {
    let names = dedup(rows.iter().map(|r| r.username.clone()));
    let interviewers = dedup(
        rows.iter()
            .map(|r| r.first_interviewer_name.clone().unwrap_or_default()),
    );

    format!(
        "Candidates {} have entered the interview stage. Dear interviewers, please prepare: {}",
        names.join(", "),
        interviewers.join(", ")
    )
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::domain::visibility::RoleSet;
    use crate::interfaces::repositories::candidate::MockCandidateRepository;
    use crate::interfaces::repositories::notifier::MockNotifier;

    fn row(username: &str, interviewer: Option<&str>) -> NotifyRow {
        NotifyRow {
            username: username.into(),
            first_interviewer_name: interviewer.map(String::from),
        }
    }

    fn actor_with(permissions: &[&str]) -> ActorContext {
        let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
        ActorContext {
            id: Uuid::new_v4(),
            username: "hr_person".into(),
            roles: RoleSet::resolve(&["hr".to_string()], false, &permissions),
        }
    }

    #[test]
    fn message_deduplicates_names_and_interviewers() {
        let rows = vec![
            row("Alice", Some("Bob")),
            row("Carol", Some("Bob")),
            row("Dave", None),
        ];
        let message = compose_message(&rows);

        assert!(message.contains("Alice, Carol, Dave"));
        // "Bob" once, plus one empty placeholder for the unassigned record
        assert!(message.ends_with("please prepare: Bob, "));
        assert_eq!(message.matches("Bob").count(), 1);
    }

    #[test]
    fn duplicate_candidate_names_appear_once() {
        let rows = vec![row("Alice", Some("Bob")), row("Alice", Some("Eve"))];
        let message = compose_message(&rows);
        assert_eq!(message.matches("Alice").count(), 1);
        assert!(message.contains("Bob, Eve"));
    }

    #[tokio::test]
    async fn notify_requires_explicit_grant() {
        let handler = NotifyHandler::new(MockCandidateRepository::new(), MockNotifier::new());
        let ungranted = actor_with(&[]);

        let err = handler.notify(&ungranted, &[1, 2]).await.unwrap_err();
        assert!(matches!(err, AppError::ForbiddenAccess));
    }

    #[tokio::test]
    async fn notify_sends_one_composed_message() {
        let mut repo = MockCandidateRepository::new();
        repo.expect_notify_rows()
            .returning(|_| Ok(vec![row("Alice", Some("Bob")), row("Carol", None)]));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_text()
            .times(1)
            .withf(|msg| msg.contains("Alice, Carol") && msg.contains("Bob"))
            .returning(|_| Ok(()));

        let handler = NotifyHandler::new(repo, notifier);
        let actor = actor_with(&["notify_interviewers"]);

        let message = handler.notify(&actor, &[1, 2]).await.unwrap();
        assert!(message.contains("interview stage"));
    }
}
