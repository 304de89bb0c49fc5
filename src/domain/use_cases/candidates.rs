use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::entities::candidate::{
    AssignInterviewers, Candidate, CandidateFilters, CandidateInsert, PromotionResponse,
};
use crate::domain::entities::user::PERM_EXPORT;
use crate::domain::use_cases::export::{export_filename, write_csv};
use crate::domain::visibility::{
    self, field_policy, row_scope, ActorContext, VisibilityPolicy,
};
use crate::errors::AppError;
use crate::interfaces::repositories::candidate::CandidateRepository;
use crate::interfaces::repositories::resume::ResumeRepository;

pub struct CandidateHandler<C, R>
where
    C: CandidateRepository,
    R: ResumeRepository,
{
    pub candidate_repo: C,
    pub resume_repo: R,
}

impl<C, R> CandidateHandler<C, R>
where
    C: CandidateRepository,
    R: ResumeRepository,
{
    pub fn new(candidate_repo: C, resume_repo: R) -> Self {
        CandidateHandler {
            candidate_repo,
            resume_repo,
        }
    }

    /// Lists candidates within the actor's row scope, each row filtered to
    /// the fields that actor may see on that record.
    pub async fn list(
        &self,
        actor: &ActorContext,
        filters: &CandidateFilters,
    ) -> Result<Vec<Value>, AppError> {
        let scope = row_scope(actor);
        let candidates = self.candidate_repo.list(scope, filters).await?;

        candidates
            .iter()
            .map(|c| filtered_view(c, &field_policy(actor, c)))
            .collect()
    }

    /// Single candidate, filtered per the actor's disclosure depth. A record
    /// outside the actor's row scope reads as absent.
    pub async fn detail(&self, actor: &ActorContext, id: i32) -> Result<Value, AppError> {
        let candidate = self.fetch_in_scope(actor, id).await?;
        let policy = field_policy(actor, &candidate);

        let mut view = filtered_view(&candidate, &policy)?;
        if let Value::Object(map) = &mut view {
            map.insert(
                "readonly_fields".into(),
                serde_json::to_value(&policy.readonly_fields)?,
            );
        }
        Ok(view)
    }

    /// Applies a partial edit. Every submitted field must be editable for
    /// this actor on this record; the save is stamped with the acting user.
    pub async fn update(
        &self,
        actor: &ActorContext,
        id: i32,
        changes: Map<String, Value>,
    ) -> Result<Value, AppError> {
        let candidate = self.fetch_in_scope(actor, id).await?;
        let policy = field_policy(actor, &candidate);

        for field in changes.keys() {
            if !policy.editable_fields.iter().any(|f| *f == field.as_str()) {
                return Err(AppError::ForbiddenAccess);
            }
        }

        let mut doc = serde_json::to_value(&candidate)?;
        if let Value::Object(map) = &mut doc {
            for (key, value) in changes {
                map.insert(key, value);
            }
        }
        let mut updated: Candidate = serde_json::from_value(doc)?;

        stamp(&mut updated, actor, Utc::now());
        let saved = self.candidate_repo.update(&updated).await?;
        filtered_view(&saved, &field_policy(actor, &saved))
    }

    /// Inline edit of the two interviewer-assignment fields from the list
    /// view. HR/superuser only; runs through the same save stamping.
    pub async fn assign_interviewers(
        &self,
        actor: &ActorContext,
        id: i32,
        assignment: AssignInterviewers,
    ) -> Result<Value, AppError> {
        if visibility::inline_editable_fields(&actor.roles).is_empty() {
            return Err(AppError::ForbiddenAccess);
        }

        let mut candidate = self
            .candidate_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".into()))?;

        if let Some(first) = assignment.first_interviewer_id {
            candidate.first_interviewer_id = first;
        }
        if let Some(second) = assignment.second_interviewer_id {
            candidate.second_interviewer_id = second;
        }

        stamp(&mut candidate, actor, Utc::now());
        let saved = self.candidate_repo.update(&candidate).await?;
        filtered_view(&saved, &field_policy(actor, &saved))
    }

    /// Promotes the selected resumes into the interview pipeline: one new
    /// candidate per resume, shared attributes copied verbatim, rounds
    /// empty. Writes are independent; a failure partway leaves the earlier
    /// candidates in place. Re-promotion of the same resume is permitted and
    /// creates a duplicate.
    pub async fn promote(
        &self,
        actor: &ActorContext,
        resume_ids: &[i32],
    ) -> Result<PromotionResponse, AppError> {
        let resumes = self.resume_repo.get_by_ids(resume_ids).await?;
        if resumes.is_empty() {
            return Err(AppError::NotFound("No resumes selected".into()));
        }

        let mut promoted = Vec::with_capacity(resumes.len());
        for resume in &resumes {
            let insert = CandidateInsert::from_resume(resume, &actor.username, Utc::now());
            let candidate = self.candidate_repo.insert(&insert).await?;
            promoted.push(candidate.username);
        }

        tracing::info!(
            actor = %actor.username,
            count = promoted.len(),
            "Resumes promoted to candidates"
        );

        let message = format!(
            "Candidates {} have successfully entered the interview process",
            promoted.join(", ")
        );
        Ok(PromotionResponse { promoted, message })
    }

    /// CSV export of the selected candidates. Gated by an explicit per-actor
    /// grant, independent of row/field visibility.
    pub async fn export(
        &self,
        actor: &ActorContext,
        ids: &[i32],
    ) -> Result<(String, Vec<u8>), AppError> {
        if !actor.roles.can(PERM_EXPORT) {
            return Err(AppError::ForbiddenAccess);
        }

        let candidates = self.candidate_repo.get_by_ids(ids).await?;
        let bytes = write_csv(&candidates)?;
        let filename = export_filename(Utc::now().date_naive());

        tracing::info!(
            actor = %actor.username,
            rows = candidates.len(),
            %filename,
            "Candidate list exported"
        );
        Ok((filename, bytes))
    }

    async fn fetch_in_scope(&self, actor: &ActorContext, id: i32) -> Result<Candidate, AppError> {
        let candidate = self
            .candidate_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".into()))?;

        if !row_scope(actor).permits(&candidate) {
            // Out-of-scope rows read as absent rather than forbidden.
            return Err(AppError::NotFound("Candidate not found".into()));
        }
        Ok(candidate)
    }
}

/// Audit stamping applied on every candidate save, regardless of whether it
/// originates from a full edit or an inline list edit.
pub fn stamp(candidate: &mut Candidate, actor: &ActorContext, now: DateTime<Utc>) {
    candidate.last_editor = Some(actor.username.clone());
    if candidate.creator.is_none() {
        candidate.creator = Some(actor.username.clone());
    }
    candidate.modified_date = now;
}

fn filtered_view(candidate: &Candidate, policy: &VisibilityPolicy) -> Result<Value, AppError> {
    let doc = serde_json::to_value(candidate)?;
    let Value::Object(map) = doc else {
        return Err(AppError::InternalError("Candidate did not serialize to an object".into()));
    };

    let mut view = Map::new();
    view.insert("id".into(), Value::from(candidate.id));
    for (key, value) in map {
        if policy.visible_fields.iter().any(|f| *f == key) {
            view.insert(key, value);
        }
    }
    Ok(Value::Object(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::domain::entities::candidate::InterviewResult;
    use crate::domain::entities::resume::{Degree, Gender, Resume};
    use crate::domain::visibility::RoleSet;
    use crate::interfaces::repositories::candidate::MockCandidateRepository;
    use crate::interfaces::repositories::resume::MockResumeRepository;

    fn actor(name: &str, groups: &[&str], superuser: bool, permissions: &[&str]) -> ActorContext {
        let groups: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
        let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
        ActorContext {
            id: Uuid::new_v4(),
            username: name.into(),
            roles: RoleSet::resolve(&groups, superuser, &permissions),
        }
    }

    fn resume(username: &str) -> Resume {
        let now = Utc::now();
        Resume {
            id: 7,
            username: username.into(),
            phone: "111".into(),
            email: format!("{username}@example.com"),
            city: "Beijing".into(),
            born_address: "Haidian".into(),
            gender: Gender::Female,
            apply_position: "Backend engineer".into(),
            bachelor_school: "X".into(),
            master_school: "Y".into(),
            major: "CS".into(),
            degree: Degree::Master,
            candidate_introduction: "intro".into(),
            work_experience: "work".into(),
            project_experience: "project".into(),
            applicant_id: Uuid::new_v4(),
            created_date: now - Duration::days(3),
            modified_date: now - Duration::days(3),
        }
    }

    fn candidate_from(insert: &CandidateInsert) -> Candidate {
        Candidate {
            id: 42,
            username: insert.username.clone(),
            phone: insert.phone.clone(),
            email: insert.email.clone(),
            city: insert.city.clone(),
            born_address: insert.born_address.clone(),
            gender: insert.gender,
            apply_position: insert.apply_position.clone(),
            bachelor_school: insert.bachelor_school.clone(),
            master_school: insert.master_school.clone(),
            major: insert.major.clone(),
            degree: insert.degree,
            candidate_introduction: insert.candidate_introduction.clone(),
            work_experience: insert.work_experience.clone(),
            project_experience: insert.project_experience.clone(),
            first_score: None,
            first_learning_ability: None,
            first_professional_competency: None,
            first_advantage: None,
            first_disadvantage: None,
            first_result: InterviewResult::Pending,
            first_recommend_position: None,
            first_interviewer_id: None,
            first_remark: None,
            second_score: None,
            second_learning_ability: None,
            second_professional_competency: None,
            second_pursue_of_excellence: None,
            second_communication_ability: None,
            second_pressure_score: None,
            second_advantage: None,
            second_disadvantage: None,
            second_result: InterviewResult::Pending,
            second_recommend_position: None,
            second_interviewer_id: None,
            second_remark: None,
            hr_score: None,
            hr_responsibility: None,
            hr_communication_ability: None,
            hr_logic_ability: None,
            hr_potential: None,
            hr_stability: None,
            hr_advantage: None,
            hr_disadvantage: None,
            hr_result: InterviewResult::Pending,
            hr_interviewer_id: None,
            hr_remark: None,
            creator: insert.creator.clone(),
            last_editor: None,
            created_date: insert.created_date,
            modified_date: insert.modified_date,
        }
    }

    #[test]
    fn promotion_copies_shared_fields_and_restamps_times() {
        let source = resume("Alice");
        let before = Utc::now();
        let insert = CandidateInsert::from_resume(&source, "hr_person", Utc::now());

        assert_eq!(insert.username, "Alice");
        assert_eq!(insert.phone, "111");
        assert_eq!(insert.bachelor_school, "X");
        assert_eq!(insert.degree, Degree::Master);
        assert_eq!(insert.creator.as_deref(), Some("hr_person"));
        assert_eq!(insert.created_date, insert.modified_date);
        assert!(insert.created_date >= before);
        // the resume's own timestamps are not carried over
        assert!(insert.created_date > source.created_date);
    }

    #[tokio::test]
    async fn promote_reports_all_promoted_names() {
        let mut resume_repo = MockResumeRepository::new();
        resume_repo
            .expect_get_by_ids()
            .withf(|ids| ids == [7, 8])
            .returning(|_| {
                let mut second = resume("Bob");
                second.id = 8;
                Ok(vec![resume("Alice"), second])
            });

        let mut candidate_repo = MockCandidateRepository::new();
        candidate_repo
            .expect_insert()
            .times(2)
            .returning(|insert| Ok(candidate_from(insert)));

        let handler = CandidateHandler::new(candidate_repo, resume_repo);
        let hr = actor("hr_person", &["hr"], false, &[]);

        let response = handler.promote(&hr, &[7, 8]).await.unwrap();
        assert_eq!(response.promoted, vec!["Alice", "Bob"]);
        assert!(response.message.contains("Alice, Bob"));
    }

    #[test]
    fn stamping_sets_last_editor_and_fills_creator_once() {
        let insert = CandidateInsert::from_resume(&resume("Alice"), "hr_person", Utc::now());
        let mut candidate = candidate_from(&insert);
        candidate.creator = None;

        let first = actor("first_editor", &["hr"], false, &[]);
        let second = actor("second_editor", &["hr"], false, &[]);

        stamp(&mut candidate, &first, Utc::now());
        assert_eq!(candidate.creator.as_deref(), Some("first_editor"));
        assert_eq!(candidate.last_editor.as_deref(), Some("first_editor"));

        let previous_modified = candidate.modified_date;
        stamp(&mut candidate, &second, Utc::now() + Duration::seconds(1));
        assert_eq!(candidate.creator.as_deref(), Some("first_editor"));
        assert_eq!(candidate.last_editor.as_deref(), Some("second_editor"));
        assert!(candidate.modified_date > previous_modified);
    }

    #[tokio::test]
    async fn update_rejects_fields_outside_the_editable_set() {
        let interviewer = actor("ivy", &["interviewer"], false, &[]);
        let insert = CandidateInsert::from_resume(&resume("Alice"), "hr_person", Utc::now());
        let mut record = candidate_from(&insert);
        record.first_interviewer_id = Some(interviewer.id);

        let mut candidate_repo = MockCandidateRepository::new();
        let stored = record.clone();
        candidate_repo
            .expect_get_by_id()
            .with(eq(42))
            .returning(move |_| Ok(Some(stored.clone())));

        let handler = CandidateHandler::new(candidate_repo, MockResumeRepository::new());

        // a first-round interviewer may not write round-2 data
        let mut changes = Map::new();
        changes.insert("second_score".into(), Value::from(3.5));
        let err = handler.update(&interviewer, 42, changes).await.unwrap_err();
        assert!(matches!(err, AppError::ForbiddenAccess));
    }

    #[tokio::test]
    async fn update_applies_round_one_edit_and_stamps() {
        let interviewer = actor("ivy", &["interviewer"], false, &[]);
        let insert = CandidateInsert::from_resume(&resume("Alice"), "hr_person", Utc::now());
        let mut record = candidate_from(&insert);
        record.first_interviewer_id = Some(interviewer.id);

        let stored = record.clone();
        let mut candidate_repo = MockCandidateRepository::new();
        candidate_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        candidate_repo
            .expect_update()
            .withf(|c| {
                c.first_score == Some(4.0)
                    && c.first_result == InterviewResult::Pass
                    && c.last_editor.as_deref() == Some("ivy")
                    && c.creator.as_deref() == Some("hr_person")
            })
            .returning(|c| Ok(c.clone()));

        let handler = CandidateHandler::new(candidate_repo, MockResumeRepository::new());

        let mut changes = Map::new();
        changes.insert("first_score".into(), Value::from(4.0));
        changes.insert("first_result".into(), Value::from("pass"));
        let view = handler.update(&interviewer, 42, changes).await.unwrap();

        assert_eq!(view["first_score"], Value::from(4.0));
        // round 2 stays hidden from the first-round interviewer
        assert!(view.get("second_score").is_none());
    }

    #[tokio::test]
    async fn detail_outside_row_scope_reads_as_absent() {
        let interviewer = actor("ivy", &["interviewer"], false, &[]);
        let insert = CandidateInsert::from_resume(&resume("Alice"), "hr_person", Utc::now());
        let record = candidate_from(&insert); // no assignments

        let mut candidate_repo = MockCandidateRepository::new();
        candidate_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(record.clone())));

        let handler = CandidateHandler::new(candidate_repo, MockResumeRepository::new());
        let err = handler.detail(&interviewer, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn assignment_edit_is_denied_for_interviewers() {
        let interviewer = actor("ivy", &["interviewer"], false, &[]);
        let handler =
            CandidateHandler::new(MockCandidateRepository::new(), MockResumeRepository::new());

        let assignment = AssignInterviewers {
            first_interviewer_id: Some(Some(Uuid::new_v4())),
            second_interviewer_id: None,
        };
        let err = handler
            .assign_interviewers(&interviewer, 42, assignment)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenAccess));
    }

    #[tokio::test]
    async fn export_requires_explicit_grant() {
        let hr = actor("hr_person", &["hr"], false, &[]);
        let handler =
            CandidateHandler::new(MockCandidateRepository::new(), MockResumeRepository::new());

        let err = handler.export(&hr, &[1]).await.unwrap_err();
        assert!(matches!(err, AppError::ForbiddenAccess));
    }

    #[tokio::test]
    async fn export_produces_header_and_rows() {
        let granted = actor("hr_person", &["hr"], false, &["export_candidates"]);
        let insert = CandidateInsert::from_resume(&resume("Alice"), "hr_person", Utc::now());
        let record = candidate_from(&insert);

        let mut candidate_repo = MockCandidateRepository::new();
        candidate_repo
            .expect_get_by_ids()
            .returning(move |_| Ok(vec![record.clone()]));

        let handler = CandidateHandler::new(candidate_repo, MockResumeRepository::new());
        let (filename, bytes) = handler.export(&granted, &[42]).await.unwrap();

        assert!(filename.starts_with("recruitment-candidates-list-"));
        assert!(filename.ends_with(".csv"));
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
