use async_trait::async_trait;
use sqlx::QueryBuilder;

use crate::{
    domain::entities::candidate::{Candidate, CandidateFilters, CandidateInsert, NotifyRow},
    domain::visibility::RowScope,
    errors::AppError,
    interfaces::repositories::sqlx_repo::SqlxCandidateRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn insert(&self, candidate: &CandidateInsert) -> Result<Candidate, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Candidate>, AppError>;
    async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Candidate>, AppError>;
    async fn list(
        &self,
        scope: RowScope,
        filters: &CandidateFilters,
    ) -> Result<Vec<Candidate>, AppError>;
    async fn update(&self, candidate: &Candidate) -> Result<Candidate, AppError>;
    /// Candidate name plus resolved first-interviewer username for the
    /// notification message.
    async fn notify_rows(&self, ids: &[i32]) -> Result<Vec<NotifyRow>, AppError>;
}

impl SqlxCandidateRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCandidateRepo { pool }
    }
}

#[async_trait]
impl CandidateRepository for SqlxCandidateRepo {
    async fn insert(&self, candidate: &CandidateInsert) -> Result<Candidate, AppError> {
        sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (
                username, phone, email, city, born_address, gender, apply_position,
                bachelor_school, master_school, major, degree,
                candidate_introduction, work_experience, project_experience,
                creator, created_date, modified_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&candidate.username)
        .bind(&candidate.phone)
        .bind(&candidate.email)
        .bind(&candidate.city)
        .bind(&candidate.born_address)
        .bind(candidate.gender)
        .bind(&candidate.apply_position)
        .bind(&candidate.bachelor_school)
        .bind(&candidate.master_school)
        .bind(&candidate.major)
        .bind(candidate.degree)
        .bind(&candidate.candidate_introduction)
        .bind(&candidate.work_experience)
        .bind(&candidate.project_experience)
        .bind(&candidate.creator)
        .bind(candidate.created_date)
        .bind(candidate.modified_date)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Candidate>, AppError> {
        sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Candidate>, AppError> {
        sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(
        &self,
        scope: RowScope,
        filters: &CandidateFilters,
    ) -> Result<Vec<Candidate>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM candidates WHERE 1 = 1");

        if let RowScope::Assigned(actor_id) = scope {
            qb.push(" AND (first_interviewer_id = ")
                .push_bind(actor_id)
                .push(" OR second_interviewer_id = ")
                .push_bind(actor_id)
                .push(")");
        }

        if let Some(city) = &filters.city {
            qb.push(" AND city = ").push_bind(city.clone());
        }
        if let Some(result) = filters.first_result {
            qb.push(" AND first_result = ").push_bind(result);
        }
        if let Some(result) = filters.second_result {
            qb.push(" AND second_result = ").push_bind(result);
        }
        if let Some(result) = filters.hr_result {
            qb.push(" AND hr_result = ").push_bind(result);
        }
        if let Some(id) = filters.first_interviewer_id {
            qb.push(" AND first_interviewer_id = ").push_bind(id);
        }
        if let Some(id) = filters.second_interviewer_id {
            qb.push(" AND second_interviewer_id = ").push_bind(id);
        }
        if let Some(q) = &filters.q {
            let pattern = format!("%{}%", q);
            qb.push(" AND (username ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR phone ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR bachelor_school ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY hr_result, second_result, first_result, id");

        qb.build_query_as::<Candidate>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, candidate: &Candidate) -> Result<Candidate, AppError> {
        sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET
                username = $2, phone = $3, email = $4, city = $5, born_address = $6,
                gender = $7, apply_position = $8, bachelor_school = $9,
                master_school = $10, major = $11, degree = $12,
                candidate_introduction = $13, work_experience = $14, project_experience = $15,

                first_score = $16, first_learning_ability = $17,
                first_professional_competency = $18, first_advantage = $19,
                first_disadvantage = $20, first_result = $21,
                first_recommend_position = $22, first_interviewer_id = $23,
                first_remark = $24,

                second_score = $25, second_learning_ability = $26,
                second_professional_competency = $27, second_pursue_of_excellence = $28,
                second_communication_ability = $29, second_pressure_score = $30,
                second_advantage = $31, second_disadvantage = $32, second_result = $33,
                second_recommend_position = $34, second_interviewer_id = $35,
                second_remark = $36,

                hr_score = $37, hr_responsibility = $38, hr_communication_ability = $39,
                hr_logic_ability = $40, hr_potential = $41, hr_stability = $42,
                hr_advantage = $43, hr_disadvantage = $44, hr_result = $45,
                hr_interviewer_id = $46, hr_remark = $47,

                creator = $48, last_editor = $49, modified_date = $50
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.username)
        .bind(&candidate.phone)
        .bind(&candidate.email)
        .bind(&candidate.city)
        .bind(&candidate.born_address)
        .bind(candidate.gender)
        .bind(&candidate.apply_position)
        .bind(&candidate.bachelor_school)
        .bind(&candidate.master_school)
        .bind(&candidate.major)
        .bind(candidate.degree)
        .bind(&candidate.candidate_introduction)
        .bind(&candidate.work_experience)
        .bind(&candidate.project_experience)
        .bind(candidate.first_score)
        .bind(candidate.first_learning_ability)
        .bind(candidate.first_professional_competency)
        .bind(&candidate.first_advantage)
        .bind(&candidate.first_disadvantage)
        .bind(candidate.first_result)
        .bind(&candidate.first_recommend_position)
        .bind(candidate.first_interviewer_id)
        .bind(&candidate.first_remark)
        .bind(candidate.second_score)
        .bind(candidate.second_learning_ability)
        .bind(candidate.second_professional_competency)
        .bind(candidate.second_pursue_of_excellence)
        .bind(candidate.second_communication_ability)
        .bind(candidate.second_pressure_score)
        .bind(&candidate.second_advantage)
        .bind(&candidate.second_disadvantage)
        .bind(candidate.second_result)
        .bind(&candidate.second_recommend_position)
        .bind(candidate.second_interviewer_id)
        .bind(&candidate.second_remark)
        .bind(candidate.hr_score)
        .bind(candidate.hr_responsibility)
        .bind(candidate.hr_communication_ability)
        .bind(candidate.hr_logic_ability)
        .bind(candidate.hr_potential)
        .bind(candidate.hr_stability)
        .bind(&candidate.hr_advantage)
        .bind(&candidate.hr_disadvantage)
        .bind(candidate.hr_result)
        .bind(candidate.hr_interviewer_id)
        .bind(&candidate.hr_remark)
        .bind(&candidate.creator)
        .bind(&candidate.last_editor)
        .bind(candidate.modified_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Candidate not found".into()),
            _ => e.into(),
        })
    }

    async fn notify_rows(&self, ids: &[i32]) -> Result<Vec<NotifyRow>, AppError> {
        sqlx::query_as::<_, NotifyRow>(
            r#"
            SELECT c.username, u.username AS first_interviewer_name
            FROM candidates c
            LEFT JOIN users u ON u.id = c.first_interviewer_id
            WHERE c.id = ANY($1)
            ORDER BY c.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
