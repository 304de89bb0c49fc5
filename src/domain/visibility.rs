use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::entities::candidate::Candidate;
use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{GROUP_HR, GROUP_INTERVIEWER, User};
use crate::errors::AuthError;

/// Role labels drawn from group membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Interviewer,
    Hr,
}

impl Role {
    fn from_group(group: &str) -> Option<Role> {
        match group {
            GROUP_INTERVIEWER => Some(Role::Interviewer),
            GROUP_HR => Some(Role::Hr),
            _ => None,
        }
    }
}

/// Resolved role set for an actor: group-derived roles, the superuser flag
/// and the explicit per-actor action grants. Recomputed per request, never
/// cached.
#[derive(Debug, Clone, Default)]
pub struct RoleSet {
    roles: HashSet<Role>,
    is_superuser: bool,
    permissions: HashSet<String>,
}

impl RoleSet {
    pub fn resolve(groups: &[String], is_superuser: bool, permissions: &[String]) -> Self {
        RoleSet {
            roles: groups.iter().filter_map(|g| Role::from_group(g)).collect(),
            is_superuser,
            permissions: permissions.iter().cloned().collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    /// Full-table candidate visibility belongs to HR and superusers.
    pub fn sees_all_candidates(&self) -> bool {
        self.is_superuser || self.has_role(Role::Hr)
    }

    /// Any staff relation to the admin surface at all.
    pub fn is_staff(&self) -> bool {
        self.is_superuser || !self.roles.is_empty()
    }

    /// Explicit action grant, independent of roles. Superusers hold every
    /// grant implicitly.
    pub fn can(&self, permission: &str) -> bool {
        self.is_superuser || self.permissions.contains(permission)
    }
}

/// Authenticated actor, threaded explicitly through every workflow and
/// permission function instead of being read from ambient request state.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub id: Uuid,
    pub username: String,
    pub roles: RoleSet,
}

impl ActorContext {
    pub fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;
        Ok(ActorContext {
            id,
            username: claims.username.clone(),
            roles: RoleSet::resolve(&claims.groups, claims.superuser, &claims.permissions),
        })
    }

    pub fn from_user(user: &User) -> Self {
        ActorContext {
            id: user.id,
            username: user.username.clone(),
            roles: RoleSet::resolve(&user.groups, user.is_superuser, &user.permissions),
        }
    }
}

/// Which candidate rows an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    All,
    /// Only rows where this actor is the first- or second-round interviewer.
    Assigned(Uuid),
}

pub fn row_scope(actor: &ActorContext) -> RowScope {
    if actor.roles.sees_all_candidates() {
        RowScope::All
    } else {
        RowScope::Assigned(actor.id)
    }
}

impl RowScope {
    pub fn permits(&self, candidate: &Candidate) -> bool {
        match self {
            RowScope::All => true,
            RowScope::Assigned(id) => {
                candidate.first_interviewer_id == Some(*id)
                    || candidate.second_interviewer_id == Some(*id)
            }
        }
    }
}

/// Shared resume-derived attributes, visible at every disclosure depth.
pub const BASE_FIELDS: &[&str] = &[
    "username",
    "phone",
    "email",
    "city",
    "born_address",
    "gender",
    "apply_position",
    "bachelor_school",
    "master_school",
    "major",
    "degree",
    "candidate_introduction",
    "work_experience",
    "project_experience",
];

pub const ROUND1_FIELDS: &[&str] = &[
    "first_score",
    "first_learning_ability",
    "first_professional_competency",
    "first_advantage",
    "first_disadvantage",
    "first_result",
    "first_recommend_position",
    "first_interviewer_id",
    "first_remark",
];

pub const ROUND2_FIELDS: &[&str] = &[
    "second_score",
    "second_learning_ability",
    "second_professional_competency",
    "second_pursue_of_excellence",
    "second_communication_ability",
    "second_pressure_score",
    "second_advantage",
    "second_disadvantage",
    "second_result",
    "second_recommend_position",
    "second_interviewer_id",
    "second_remark",
];

pub const HR_ROUND_FIELDS: &[&str] = &[
    "hr_score",
    "hr_responsibility",
    "hr_communication_ability",
    "hr_logic_ability",
    "hr_potential",
    "hr_stability",
    "hr_advantage",
    "hr_disadvantage",
    "hr_result",
    "hr_interviewer_id",
    "hr_remark",
];

/// The two interviewer-assignment fields: inline-editable from the list view
/// for HR/superusers, forced read-only on the detail form for interviewers.
pub const ASSIGNMENT_FIELDS: &[&str] = &["first_interviewer_id", "second_interviewer_id"];

const AUDIT_FIELDS: &[&str] = &["creator", "last_editor", "created_date", "modified_date"];

/// True for any serialized candidate field name, including audit fields.
/// The export field list is validated against this before any row is
/// written.
pub fn is_known_field(name: &str) -> bool {
    name == "id"
        || BASE_FIELDS.contains(&name)
        || ROUND1_FIELDS.contains(&name)
        || ROUND2_FIELDS.contains(&name)
        || HR_ROUND_FIELDS.contains(&name)
        || AUDIT_FIELDS.contains(&name)
}

/// Per-record field disclosure and editability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityPolicy {
    pub visible_fields: Vec<&'static str>,
    pub editable_fields: Vec<&'static str>,
    pub readonly_fields: Vec<&'static str>,
}

/// Progressive disclosure, decided per record: the actor's relation to this
/// candidate determines how deep they can see.
///
/// An unassigned interviewer slot (`None`) never matches any actor, so a
/// freshly promoted candidate falls through to base-only visibility for
/// plain interviewers.
pub fn field_policy(actor: &ActorContext, candidate: &Candidate) -> VisibilityPolicy {
    if actor.roles.sees_all_candidates() {
        let visible = concat_fields(&[BASE_FIELDS, ROUND1_FIELDS, ROUND2_FIELDS, HR_ROUND_FIELDS]);
        return VisibilityPolicy {
            editable_fields: visible.clone(),
            visible_fields: visible,
            readonly_fields: Vec::new(),
        };
    }

    if !actor.roles.has_role(Role::Interviewer) {
        return VisibilityPolicy {
            visible_fields: BASE_FIELDS.to_vec(),
            editable_fields: Vec::new(),
            readonly_fields: Vec::new(),
        };
    }

    let visible = if candidate.second_interviewer_id == Some(actor.id) {
        concat_fields(&[BASE_FIELDS, ROUND1_FIELDS, ROUND2_FIELDS])
    } else if candidate.first_interviewer_id == Some(actor.id) {
        concat_fields(&[BASE_FIELDS, ROUND1_FIELDS])
    } else {
        BASE_FIELDS.to_vec()
    };

    // Interviewers may never reassign interviews, not even their own.
    let readonly: Vec<&'static str> = ASSIGNMENT_FIELDS
        .iter()
        .filter(|f| visible.contains(f))
        .copied()
        .collect();

    let editable = if candidate.first_interviewer_id == Some(actor.id)
        || candidate.second_interviewer_id == Some(actor.id)
    {
        visible.iter().filter(|f| !readonly.contains(f)).copied().collect()
    } else {
        Vec::new()
    };

    VisibilityPolicy {
        visible_fields: visible,
        editable_fields: editable,
        readonly_fields: readonly,
    }
}

/// Fields an actor may inline-edit from the list view. Only HR and
/// superusers may reassign interviewers there.
pub fn inline_editable_fields(roles: &RoleSet) -> &'static [&'static str] {
    if roles.sees_all_candidates() {
        ASSIGNMENT_FIELDS
    } else {
        &[]
    }
}

fn concat_fields(groups: &[&[&'static str]]) -> Vec<&'static str> {
    groups.iter().flat_map(|g| g.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::entities::candidate::InterviewResult;
    use crate::domain::entities::resume::{Degree, Gender};

    fn actor(groups: &[&str], superuser: bool) -> ActorContext {
        let groups: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
        ActorContext {
            id: Uuid::new_v4(),
            username: "tester".into(),
            roles: RoleSet::resolve(&groups, superuser, &[]),
        }
    }

    fn candidate(first: Option<Uuid>, second: Option<Uuid>) -> Candidate {
        let now = Utc::now();
        Candidate {
            id: 1,
            username: "Alice".into(),
            phone: "111".into(),
            email: "alice@example.com".into(),
            city: "Beijing".into(),
            born_address: String::new(),
            gender: Gender::Female,
            apply_position: String::new(),
            bachelor_school: "X".into(),
            master_school: String::new(),
            major: String::new(),
            degree: Degree::Bachelor,
            candidate_introduction: String::new(),
            work_experience: String::new(),
            project_experience: String::new(),
            first_score: None,
            first_learning_ability: None,
            first_professional_competency: None,
            first_advantage: None,
            first_disadvantage: None,
            first_result: InterviewResult::Pending,
            first_recommend_position: None,
            first_interviewer_id: first,
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
            second_interviewer_id: second,
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
            creator: None,
            last_editor: None,
            created_date: now,
            modified_date: now,
        }
    }

    #[test]
    fn hr_and_superuser_see_all_rows() {
        let hr = actor(&["hr"], false);
        let root = actor(&[], true);
        assert_eq!(row_scope(&hr), RowScope::All);
        assert_eq!(row_scope(&root), RowScope::All);
    }

    #[test]
    fn interviewer_row_scope_matches_assignments_only() {
        let interviewer = actor(&["interviewer"], false);
        let scope = row_scope(&interviewer);
        assert_eq!(scope, RowScope::Assigned(interviewer.id));

        let mine_first = candidate(Some(interviewer.id), None);
        let mine_second = candidate(None, Some(interviewer.id));
        let other = candidate(Some(Uuid::new_v4()), Some(Uuid::new_v4()));
        let unassigned = candidate(None, None);

        assert!(scope.permits(&mine_first));
        assert!(scope.permits(&mine_second));
        assert!(!scope.permits(&other));
        assert!(!scope.permits(&unassigned));
    }

    #[test]
    fn first_interviewer_sees_exactly_base_and_round1() {
        let interviewer = actor(&["interviewer"], false);
        let record = candidate(Some(interviewer.id), None);

        let policy = field_policy(&interviewer, &record);
        let expected = concat_fields(&[BASE_FIELDS, ROUND1_FIELDS]);
        assert_eq!(policy.visible_fields, expected);
        for field in ROUND2_FIELDS.iter().chain(HR_ROUND_FIELDS) {
            assert!(!policy.visible_fields.contains(field));
        }
    }

    #[test]
    fn second_interviewer_sees_rounds_one_and_two() {
        let interviewer = actor(&["interviewer"], false);
        let record = candidate(Some(Uuid::new_v4()), Some(interviewer.id));

        let policy = field_policy(&interviewer, &record);
        assert!(policy.visible_fields.contains(&"second_score"));
        assert!(policy.visible_fields.contains(&"first_score"));
        assert!(!policy.visible_fields.contains(&"hr_score"));
    }

    #[test]
    fn hr_sees_everything_and_may_edit_assignments() {
        let hr = actor(&["hr"], false);
        let record = candidate(None, None);

        let policy = field_policy(&hr, &record);
        assert!(policy.visible_fields.contains(&"hr_result"));
        assert!(policy.editable_fields.contains(&"first_interviewer_id"));
        assert!(policy.readonly_fields.is_empty());
    }

    #[test]
    fn assignment_fields_are_readonly_for_interviewers() {
        let interviewer = actor(&["interviewer"], false);
        let record = candidate(Some(interviewer.id), None);

        let policy = field_policy(&interviewer, &record);
        assert_eq!(policy.readonly_fields, vec!["first_interviewer_id"]);
        assert!(!policy.editable_fields.contains(&"first_interviewer_id"));
        assert!(policy.editable_fields.contains(&"first_score"));
    }

    #[test]
    fn unassigned_record_defaults_to_base_visibility() {
        let interviewer = actor(&["interviewer"], false);
        let record = candidate(None, None);

        let policy = field_policy(&interviewer, &record);
        assert_eq!(policy.visible_fields, BASE_FIELDS.to_vec());
        assert!(policy.editable_fields.is_empty());
    }

    #[test]
    fn inline_editing_is_hr_only() {
        let hr = actor(&["hr"], false);
        let interviewer = actor(&["interviewer"], false);
        assert_eq!(inline_editable_fields(&hr.roles), ASSIGNMENT_FIELDS);
        assert!(inline_editable_fields(&interviewer.roles).is_empty());
    }

    #[test]
    fn bulk_action_grants_are_independent_of_roles() {
        let granted = RoleSet::resolve(
            &["interviewer".to_string()],
            false,
            &["export_candidates".to_string()],
        );
        let hr_without_grant = RoleSet::resolve(&["hr".to_string()], false, &[]);

        assert!(granted.can("export_candidates"));
        assert!(!granted.can("notify_interviewers"));
        assert!(!hr_without_grant.can("export_candidates"));
    }

    #[test]
    fn export_field_names_are_known() {
        assert!(is_known_field("username"));
        assert!(is_known_field("hr_remark"));
        assert!(!is_known_field("no_such_field"));
    }
}
