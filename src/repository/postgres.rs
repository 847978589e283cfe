use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::{types::Json, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, ApplicationFilter, ApplicationSource, CommunicationEntry, InterviewSummary},
    candidate::{Candidate, CandidateFilter},
    interview::{Interview, InterviewFilter},
    message::{Audience, Message, SYSTEM_ADDRESS},
    position::{Position, PositionFilter},
    purchase_order::PurchaseOrder,
    user::{normalize_email, User, UserFilter},
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_opt<T>(value: Option<String>) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = Error>,
{
    value.map(|v| v.parse()).transpose()
}

fn convert<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

fn expect_one(rows_affected: u64, entity: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(Error::NotFound(format!("{} not found", entity)));
    }
    Ok(())
}

const USER_COLUMNS: &str =
    "id, email, password_hash, role, is_approved, profile, created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    is_approved: bool,
    profile: JsonValue,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = Error;

    fn try_from(r: UserRow) -> Result<Self> {
        Ok(User {
            id: r.id,
            email: r.email,
            password_hash: r.password_hash,
            role: r.role.parse()?,
            is_approved: r.is_approved,
            profile: r.profile,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const POSITION_COLUMNS: &str = "id, title, department, required_skills, location, openings, status, hiring_manager, created_by, created_at, updated_at";

#[derive(FromRow)]
struct PositionRow {
    id: Uuid,
    title: String,
    department: Option<String>,
    required_skills: Vec<String>,
    location: Option<String>,
    openings: i32,
    status: String,
    hiring_manager: Uuid,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PositionRow> for Position {
    type Error = Error;

    fn try_from(r: PositionRow) -> Result<Self> {
        Ok(Position {
            id: r.id,
            title: r.title,
            department: r.department,
            required_skills: r.required_skills,
            location: r.location,
            openings: r.openings,
            status: r.status.parse()?,
            hiring_manager: r.hiring_manager,
            created_by: r.created_by,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const CANDIDATE_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone, skills, experience, education, resume_path, status, job_id, position, onboarding_status, created_at, updated_at";

#[derive(FromRow)]
struct CandidateRow {
    id: Uuid,
    user_id: Option<Uuid>,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    skills: Vec<String>,
    experience: Json<Vec<JsonValue>>,
    education: Json<Vec<JsonValue>>,
    resume_path: Option<String>,
    status: String,
    job_id: Option<Uuid>,
    position: Option<String>,
    onboarding_status: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = Error;

    fn try_from(r: CandidateRow) -> Result<Self> {
        Ok(Candidate {
            id: r.id,
            user: r.user_id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            skills: r.skills,
            experience: r.experience.0,
            education: r.education.0,
            resume_path: r.resume_path,
            status: r.status.parse()?,
            job_id: r.job_id,
            position: r.position,
            onboarding_status: parse_opt(r.onboarding_status)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const APPLICATION_COLUMNS: &str = "id, candidate_id, position_id, source, submitted_by, status, resume_url, notes, interviews, communication, onboarding_status, applied_at, updated_at";

#[derive(FromRow)]
struct ApplicationRow {
    id: Uuid,
    candidate_id: Uuid,
    position_id: Uuid,
    source: String,
    submitted_by: Option<Uuid>,
    status: String,
    resume_url: Option<String>,
    notes: Option<String>,
    interviews: Json<Vec<InterviewSummary>>,
    communication: Json<Vec<CommunicationEntry>>,
    onboarding_status: Option<String>,
    applied_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(r: ApplicationRow) -> Result<Self> {
        Ok(Application {
            id: r.id,
            candidate: r.candidate_id,
            position: r.position_id,
            source: r.source.parse()?,
            submitted_by: r.submitted_by,
            status: r.status.parse()?,
            resume_url: r.resume_url,
            notes: r.notes,
            interviews: r.interviews.0,
            communication: r.communication.0,
            onboarding_status: parse_opt(r.onboarding_status)?,
            applied_at: r.applied_at,
            updated_at: r.updated_at,
        })
    }
}

const INTERVIEW_COLUMNS: &str = "id, candidate_id, candidate_first_name, candidate_last_name, application_id, position_id, interviewer_id, interviewer_name, date, time, scheduled_at, job_position, interview_mode, status, result, rating, meeting_link, notes, notify_manager, created_by, created_at, updated_at";

#[derive(FromRow)]
struct InterviewRow {
    id: Uuid,
    candidate_id: Option<Uuid>,
    candidate_first_name: String,
    candidate_last_name: String,
    application_id: Option<Uuid>,
    position_id: Option<Uuid>,
    interviewer_id: Option<Uuid>,
    interviewer_name: Option<String>,
    date: String,
    time: Option<String>,
    scheduled_at: Option<DateTime<Utc>>,
    job_position: Option<String>,
    interview_mode: Option<String>,
    status: String,
    result: String,
    rating: Option<i32>,
    meeting_link: Option<String>,
    notes: Option<String>,
    notify_manager: bool,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InterviewRow> for Interview {
    type Error = Error;

    fn try_from(r: InterviewRow) -> Result<Self> {
        Ok(Interview {
            id: r.id,
            candidate_id: r.candidate_id,
            candidate_first_name: r.candidate_first_name,
            candidate_last_name: r.candidate_last_name,
            application_id: r.application_id,
            position_id: r.position_id,
            interviewer_id: r.interviewer_id,
            interviewer_name: r.interviewer_name,
            date: r.date,
            time: r.time,
            scheduled_at: r.scheduled_at,
            job_position: r.job_position,
            interview_mode: r.interview_mode,
            status: r.status.parse()?,
            result: r.result.parse()?,
            rating: r.rating,
            meeting_link: r.meeting_link,
            notes: r.notes,
            notify_manager: r.notify_manager,
            created_by: r.created_by,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const MESSAGE_COLUMNS: &str =
    "id, recipient, to_address, sender, from_label, subject, body, is_read, created_at";

#[derive(FromRow)]
struct MessageRow {
    id: Uuid,
    recipient: Option<Uuid>,
    to_address: Option<String>,
    sender: Option<Uuid>,
    from_label: Option<String>,
    subject: String,
    body: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = Error;

    fn try_from(r: MessageRow) -> Result<Self> {
        Ok(Message {
            id: r.id,
            recipient: r.recipient,
            to: r.to_address,
            sender: r.sender,
            from: r.from_label,
            subject: r.subject,
            body: r.body,
            is_read: r.is_read,
            created_at: r.created_at,
        })
    }
}

const PURCHASE_ORDER_COLUMNS: &str = "id, candidate_id, position_id, application_id, vendor, amount, currency, description, status, requested_by, decided_by, created_at, updated_at";

#[derive(FromRow)]
struct PurchaseOrderRow {
    id: Uuid,
    candidate_id: Option<Uuid>,
    position_id: Option<Uuid>,
    application_id: Option<Uuid>,
    vendor: String,
    amount: Decimal,
    currency: String,
    description: Option<String>,
    status: String,
    requested_by: Uuid,
    decided_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PurchaseOrderRow> for PurchaseOrder {
    type Error = Error;

    fn try_from(r: PurchaseOrderRow) -> Result<Self> {
        Ok(PurchaseOrder {
            id: r.id,
            candidate: r.candidate_id,
            position: r.position_id,
            application: r.application_id,
            vendor: r.vendor,
            amount: r.amount,
            currency: r.currency,
            description: r.description,
            status: r.status.parse()?,
            requested_by: r.requested_by,
            decided_by: r.decided_by,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, is_approved, profile, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_approved)
        .bind(&user.profile)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match Error::from(e) {
            Error::Conflict(_) => Error::Conflict("A user with this email already exists".into()),
            other => other,
        })?;
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM users WHERE TRUE", USER_COLUMNS));
        if let Some(approved) = filter.approved {
            qb.push(" AND is_approved = ").push_bind(approved);
        }
        if let Some(role) = filter.role {
            qb.push(" AND role = ").push_bind(role.as_str());
        }
        qb.push(" ORDER BY created_at DESC");
        let rows = qb.build_query_as::<UserRow>().fetch_all(&self.pool).await?;
        convert(rows)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, role = $4, is_approved = $5, profile = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_approved)
        .bind(&user.profile)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        expect_one(res.rows_affected(), "User")
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_position(&self, position: &Position) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO positions (id, title, department, required_skills, location, openings, status, hiring_manager, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(position.id)
        .bind(&position.title)
        .bind(&position.department)
        .bind(&position.required_skills)
        .bind(&position.location)
        .bind(position.openings)
        .bind(position.status.as_str())
        .bind(position.hiring_manager)
        .bind(position.created_by)
        .bind(position.created_at)
        .bind(position.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn position_by_id(&self, id: Uuid) -> Result<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(&format!(
            "SELECT {} FROM positions WHERE id = $1",
            POSITION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Position::try_from).transpose()
    }

    async fn position_by_title(&self, title: &str) -> Result<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(&format!(
            "SELECT {} FROM positions WHERE title = $1 ORDER BY created_at DESC LIMIT 1",
            POSITION_COLUMNS
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Position::try_from).transpose()
    }

    async fn list_positions(&self, filter: PositionFilter) -> Result<Vec<Position>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM positions WHERE TRUE",
            POSITION_COLUMNS
        ));
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(manager) = filter.hiring_manager {
            qb.push(" AND hiring_manager = ").push_bind(manager);
        }
        qb.push(" ORDER BY created_at DESC");
        let rows = qb
            .build_query_as::<PositionRow>()
            .fetch_all(&self.pool)
            .await?;
        convert(rows)
    }

    async fn update_position(&self, position: &Position) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE positions
            SET title = $2, department = $3, required_skills = $4, location = $5, openings = $6,
                status = $7, hiring_manager = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(position.id)
        .bind(&position.title)
        .bind(&position.department)
        .bind(&position.required_skills)
        .bind(&position.location)
        .bind(position.openings)
        .bind(position.status.as_str())
        .bind(position.hiring_manager)
        .bind(position.updated_at)
        .execute(&self.pool)
        .await?;
        expect_one(res.rows_affected(), "Position")
    }

    async fn delete_position(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM positions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_candidate(&self, candidate: &Candidate) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO candidates (
                id, user_id, first_name, last_name, email, phone, skills, experience, education,
                resume_path, status, job_id, position, onboarding_status, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
            "#,
        )
        .bind(candidate.id)
        .bind(candidate.user)
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.skills)
        .bind(Json(&candidate.experience))
        .bind(Json(&candidate.education))
        .bind(&candidate.resume_path)
        .bind(candidate.status.as_str())
        .bind(candidate.job_id)
        .bind(&candidate.position)
        .bind(candidate.onboarding_status.map(|s| s.as_str()))
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match Error::from(e) {
            Error::Conflict(_) => {
                Error::Conflict("A candidate with this email address already exists".into())
            }
            other => other,
        })?;
        Ok(())
    }

    async fn candidate_by_id(&self, id: Uuid) -> Result<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {} FROM candidates WHERE id = $1",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Candidate::try_from).transpose()
    }

    async fn candidate_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {} FROM candidates WHERE email = $1",
            CANDIDATE_COLUMNS
        ))
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        row.map(Candidate::try_from).transpose()
    }

    async fn candidate_by_user(&self, user_id: Uuid) -> Result<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {} FROM candidates WHERE user_id = $1 ORDER BY created_at ASC LIMIT 1",
            CANDIDATE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Candidate::try_from).transpose()
    }

    async fn list_candidates(&self, filter: CandidateFilter) -> Result<Vec<Candidate>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM candidates WHERE TRUE",
            CANDIDATE_COLUMNS
        ));
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        qb.push(" ORDER BY created_at DESC");
        let rows = qb
            .build_query_as::<CandidateRow>()
            .fetch_all(&self.pool)
            .await?;
        convert(rows)
    }

    async fn update_candidate(&self, candidate: &Candidate) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE candidates
            SET user_id = $2, first_name = $3, last_name = $4, email = $5, phone = $6, skills = $7,
                experience = $8, education = $9, resume_path = $10, status = $11, job_id = $12,
                position = $13, onboarding_status = $14, updated_at = $15
            WHERE id = $1
            "#,
        )
        .bind(candidate.id)
        .bind(candidate.user)
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.skills)
        .bind(Json(&candidate.experience))
        .bind(Json(&candidate.education))
        .bind(&candidate.resume_path)
        .bind(candidate.status.as_str())
        .bind(candidate.job_id)
        .bind(&candidate.position)
        .bind(candidate.onboarding_status.map(|s| s.as_str()))
        .bind(candidate.updated_at)
        .execute(&self.pool)
        .await?;
        expect_one(res.rows_affected(), "Candidate")
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_application(&self, application: &Application) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (
                id, candidate_id, position_id, source, submitted_by, status, resume_url, notes,
                interviews, communication, onboarding_status, applied_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
            "#,
        )
        .bind(application.id)
        .bind(application.candidate)
        .bind(application.position)
        .bind(application.source.as_str())
        .bind(application.submitted_by)
        .bind(application.status.as_str())
        .bind(&application.resume_url)
        .bind(&application.notes)
        .bind(Json(&application.interviews))
        .bind(Json(&application.communication))
        .bind(application.onboarding_status.map(|s| s.as_str()))
        .bind(application.applied_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match Error::from(e) {
            Error::Conflict(_) => Error::Conflict(
                "Candidate has already been submitted for this position".into(),
            ),
            other => other,
        })?;
        Ok(())
    }

    async fn application_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn find_application(
        &self,
        candidate: Uuid,
        position: Uuid,
        source: ApplicationSource,
    ) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM applications WHERE candidate_id = $1 AND position_id = $2 AND source = $3 LIMIT 1",
            APPLICATION_COLUMNS
        ))
        .bind(candidate)
        .bind(position)
        .bind(source.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn list_applications(&self, filter: ApplicationFilter) -> Result<Vec<Application>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM applications WHERE TRUE",
            APPLICATION_COLUMNS
        ));
        if let Some(candidate) = filter.candidate {
            qb.push(" AND candidate_id = ").push_bind(candidate);
        }
        if let Some(position) = filter.position {
            qb.push(" AND position_id = ").push_bind(position);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(source) = filter.source {
            qb.push(" AND source = ").push_bind(source.as_str());
        }
        qb.push(" ORDER BY applied_at DESC");
        let rows = qb
            .build_query_as::<ApplicationRow>()
            .fetch_all(&self.pool)
            .await?;
        convert(rows)
    }

    async fn update_application(&self, application: &Application) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE applications
            SET status = $2, resume_url = $3, notes = $4, interviews = $5, communication = $6,
                onboarding_status = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(application.id)
        .bind(application.status.as_str())
        .bind(&application.resume_url)
        .bind(&application.notes)
        .bind(Json(&application.interviews))
        .bind(Json(&application.communication))
        .bind(application.onboarding_status.map(|s| s.as_str()))
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;
        expect_one(res.rows_affected(), "Application")
    }

    async fn insert_interview(&self, interview: &Interview) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO interviews (
                id, candidate_id, candidate_first_name, candidate_last_name, application_id,
                position_id, interviewer_id, interviewer_name, date, time, scheduled_at,
                job_position, interview_mode, status, result, rating, meeting_link, notes,
                notify_manager, created_by, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19,$20,$21,$22)
            "#,
        )
        .bind(interview.id)
        .bind(interview.candidate_id)
        .bind(&interview.candidate_first_name)
        .bind(&interview.candidate_last_name)
        .bind(interview.application_id)
        .bind(interview.position_id)
        .bind(interview.interviewer_id)
        .bind(&interview.interviewer_name)
        .bind(&interview.date)
        .bind(&interview.time)
        .bind(interview.scheduled_at)
        .bind(&interview.job_position)
        .bind(&interview.interview_mode)
        .bind(interview.status.as_str())
        .bind(interview.result.as_str())
        .bind(interview.rating)
        .bind(&interview.meeting_link)
        .bind(&interview.notes)
        .bind(interview.notify_manager)
        .bind(interview.created_by)
        .bind(interview.created_at)
        .bind(interview.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn interview_by_id(&self, id: Uuid) -> Result<Option<Interview>> {
        let row = sqlx::query_as::<_, InterviewRow>(&format!(
            "SELECT {} FROM interviews WHERE id = $1",
            INTERVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Interview::try_from).transpose()
    }

    async fn list_interviews(&self, filter: InterviewFilter) -> Result<Vec<Interview>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM interviews WHERE TRUE",
            INTERVIEW_COLUMNS
        ));
        if let Some(interviewer) = filter.interviewer {
            qb.push(" AND interviewer_id = ").push_bind(interviewer);
        }
        if let Some(candidate) = filter.candidate {
            qb.push(" AND candidate_id = ").push_bind(candidate);
        }
        qb.push(" ORDER BY created_at DESC");
        let rows = qb
            .build_query_as::<InterviewRow>()
            .fetch_all(&self.pool)
            .await?;
        convert(rows)
    }

    async fn update_interview(&self, interview: &Interview) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE interviews
            SET candidate_id = $2, candidate_first_name = $3, candidate_last_name = $4,
                application_id = $5, position_id = $6, interviewer_id = $7, interviewer_name = $8,
                date = $9, time = $10, scheduled_at = $11, job_position = $12, interview_mode = $13,
                status = $14, result = $15, rating = $16, meeting_link = $17, notes = $18,
                notify_manager = $19, updated_at = $20
            WHERE id = $1
            "#,
        )
        .bind(interview.id)
        .bind(interview.candidate_id)
        .bind(&interview.candidate_first_name)
        .bind(&interview.candidate_last_name)
        .bind(interview.application_id)
        .bind(interview.position_id)
        .bind(interview.interviewer_id)
        .bind(&interview.interviewer_name)
        .bind(&interview.date)
        .bind(&interview.time)
        .bind(interview.scheduled_at)
        .bind(&interview.job_position)
        .bind(&interview.interview_mode)
        .bind(interview.status.as_str())
        .bind(interview.result.as_str())
        .bind(interview.rating)
        .bind(&interview.meeting_link)
        .bind(&interview.notes)
        .bind(interview.notify_manager)
        .bind(interview.updated_at)
        .execute(&self.pool)
        .await?;
        expect_one(res.rows_affected(), "Interview")
    }

    async fn delete_interview(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_message(&self, message: &Message) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, recipient, to_address, sender, from_label, subject, body, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(message.id)
        .bind(message.recipient)
        .bind(&message.to)
        .bind(message.sender)
        .bind(&message.from)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(message.is_read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn message_by_id(&self, id: Uuid) -> Result<Option<Message>> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {} FROM messages WHERE id = $1",
            MESSAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Message::try_from).transpose()
    }

    async fn list_messages_for(&self, audience: &Audience) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            SELECT {} FROM messages
            WHERE recipient = $1
               OR lower(to_address) = lower($2)
               OR ($3 AND to_address = $4)
            ORDER BY created_at DESC
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(audience.user_id)
        .bind(&audience.email)
        .bind(audience.include_system)
        .bind(SYSTEM_ADDRESS)
        .fetch_all(&self.pool)
        .await?;
        convert(rows)
    }

    async fn set_message_read(&self, id: Uuid, is_read: bool) -> Result<()> {
        let res = sqlx::query("UPDATE messages SET is_read = $2 WHERE id = $1")
            .bind(id)
            .bind(is_read)
            .execute(&self.pool)
            .await?;
        expect_one(res.rows_affected(), "Message")
    }

    async fn insert_purchase_order(&self, order: &PurchaseOrder) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO purchase_orders (
                id, candidate_id, position_id, application_id, vendor, amount, currency,
                description, status, requested_by, decided_by, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
            "#,
        )
        .bind(order.id)
        .bind(order.candidate)
        .bind(order.position)
        .bind(order.application)
        .bind(&order.vendor)
        .bind(order.amount)
        .bind(&order.currency)
        .bind(&order.description)
        .bind(order.status.as_str())
        .bind(order.requested_by)
        .bind(order.decided_by)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn purchase_order_by_id(&self, id: Uuid) -> Result<Option<PurchaseOrder>> {
        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            "SELECT {} FROM purchase_orders WHERE id = $1",
            PURCHASE_ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(PurchaseOrder::try_from).transpose()
    }

    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        let rows = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            "SELECT {} FROM purchase_orders ORDER BY created_at DESC",
            PURCHASE_ORDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        convert(rows)
    }

    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE purchase_orders
            SET vendor = $2, amount = $3, currency = $4, description = $5, status = $6,
                decided_by = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(order.id)
        .bind(&order.vendor)
        .bind(order.amount)
        .bind(&order.currency)
        .bind(&order.description)
        .bind(order.status.as_str())
        .bind(order.decided_by)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;
        expect_one(res.rows_affected(), "Purchase order")
    }
}
