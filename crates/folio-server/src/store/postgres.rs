use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_shared::{
    api::{CardInput, ValidProfile},
    Card, Education, Position, Profile, Project,
};
use sqlx::{
    postgres::{PgArguments, Postgres},
    query::QueryAs,
    types::Json,
};
use uuid::Uuid;

use super::{ProfileStore, StoreResult};
use crate::db::DbPool;

const PROFILE_COLUMNS: &str = r#"
    id, name, profession, photo, company, address, email, phone, website, bio,
    cover_image, cv_url, years_of_experience, linkedin, github, twitter, instagram,
    skills, specializations, languages, certifications, awards,
    projects, personal_projects, previous_positions, education,
    created_at, updated_at
"#;

const CARD_COLUMNS: &str = "id, user_id, nfc_id, is_active, created_at, updated_at";

/// Row of the `users` table. Every column except the id and timestamps is
/// nullable in the schema.
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    name: Option<String>,
    profession: Option<String>,
    photo: Option<String>,
    company: Option<String>,
    address: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    bio: Option<String>,
    cover_image: Option<String>,
    cv_url: Option<String>,
    years_of_experience: Option<i32>,
    linkedin: Option<String>,
    github: Option<String>,
    twitter: Option<String>,
    instagram: Option<String>,
    skills: Option<Vec<String>>,
    specializations: Option<Vec<String>>,
    languages: Option<Vec<String>>,
    certifications: Option<Vec<String>>,
    awards: Option<Vec<String>>,
    projects: Option<Json<Vec<Project>>>,
    personal_projects: Option<Json<Vec<Project>>>,
    previous_positions: Option<Json<Vec<Position>>>,
    education: Option<Json<Vec<Education>>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            name: row.name.unwrap_or_default(),
            profession: row.profession.unwrap_or_default(),
            photo: row.photo.unwrap_or_default(),
            company: row.company,
            address: row.address,
            email: row.email,
            phone: row.phone,
            website: row.website,
            bio: row.bio,
            cover_image: row.cover_image,
            cv_url: row.cv_url,
            years_of_experience: row.years_of_experience,
            linkedin: row.linkedin,
            github: row.github,
            twitter: row.twitter,
            instagram: row.instagram,
            skills: row.skills.unwrap_or_default(),
            specializations: row.specializations.unwrap_or_default(),
            languages: row.languages.unwrap_or_default(),
            certifications: row.certifications.unwrap_or_default(),
            awards: row.awards.unwrap_or_default(),
            projects: row.projects.map(|j| j.0).unwrap_or_default(),
            personal_projects: row.personal_projects.map(|j| j.0).unwrap_or_default(),
            previous_positions: row.previous_positions.map(|j| j.0).unwrap_or_default(),
            education: row.education.map(|j| j.0).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

type ProfileQuery<'q> = QueryAs<'q, Postgres, ProfileRow, PgArguments>;

/// Bind the 25 writable profile columns, in `PROFILE_COLUMNS` order
fn bind_profile<'q>(query: ProfileQuery<'q>, profile: &'q ValidProfile) -> ProfileQuery<'q> {
    let fields = profile.fields();
    query
        .bind(profile.name())
        .bind(profile.profession())
        .bind(profile.photo())
        .bind(&fields.company)
        .bind(&fields.address)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.bio)
        .bind(&fields.cover_image)
        .bind(&fields.cv_url)
        .bind(fields.years_of_experience)
        .bind(&fields.linkedin)
        .bind(&fields.github)
        .bind(&fields.twitter)
        .bind(&fields.instagram)
        .bind(&fields.skills)
        .bind(&fields.specializations)
        .bind(&fields.languages)
        .bind(&fields.certifications)
        .bind(&fields.awards)
        .bind(Json(&fields.projects))
        .bind(Json(&fields.personal_projects))
        .bind(Json(&fields.previous_positions))
        .bind(Json(&fields.education))
}

/// PostgreSQL-backed store over the `users` and `cards` tables
#[derive(Clone)]
pub struct PgStore {
    db: DbPool,
}

impl PgStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        let rows: Vec<ProfileRow> =
            sqlx::query_as(&format!("SELECT {} FROM users", PROFILE_COLUMNS))
                .fetch_all(&self.db)
                .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        let row: Option<ProfileRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", PROFILE_COLUMNS))
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(row.map(Profile::from))
    }

    async fn create_profile(&self, profile: ValidProfile) -> StoreResult<Profile> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let sql = format!(
            r#"
            INSERT INTO users ({columns})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
            RETURNING {columns}
            "#,
            columns = PROFILE_COLUMNS
        );

        let query = sqlx::query_as::<_, ProfileRow>(&sql).bind(id);
        let row = bind_profile(query, &profile)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

        tracing::debug!(profile_id = %id, "Inserted profile row");
        Ok(row.into())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        profile: ValidProfile,
    ) -> StoreResult<Option<Profile>> {
        let sql = format!(
            r#"
            UPDATE users SET
                name = $2, profession = $3, photo = $4, company = $5, address = $6,
                email = $7, phone = $8, website = $9, bio = $10, cover_image = $11,
                cv_url = $12, years_of_experience = $13, linkedin = $14, github = $15,
                twitter = $16, instagram = $17, skills = $18, specializations = $19,
                languages = $20, certifications = $21, awards = $22, projects = $23,
                personal_projects = $24, previous_positions = $25, education = $26,
                updated_at = $27
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let query = sqlx::query_as::<_, ProfileRow>(&sql).bind(id);
        let row = bind_profile(query, &profile)
            .bind(Utc::now())
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(Profile::from))
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_cards(&self) -> StoreResult<Vec<Card>> {
        let cards = sqlx::query_as(&format!("SELECT {} FROM cards", CARD_COLUMNS))
            .fetch_all(&self.db)
            .await?;

        Ok(cards)
    }

    async fn get_card(&self, id: Uuid) -> StoreResult<Option<Card>> {
        let card = sqlx::query_as(&format!("SELECT {} FROM cards WHERE id = $1", CARD_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(card)
    }

    async fn create_card(&self, card: CardInput) -> StoreResult<Card> {
        let now = Utc::now();

        let card = sqlx::query_as(&format!(
            r#"
            INSERT INTO cards (id, user_id, nfc_id, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CARD_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(card.user_id)
        .bind(&card.nfc_id)
        .bind(card.is_active)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(card)
    }

    async fn update_card(&self, id: Uuid, card: CardInput) -> StoreResult<Option<Card>> {
        let card = sqlx::query_as(&format!(
            r#"
            UPDATE cards
            SET user_id = $2, nfc_id = $3, is_active = $4, updated_at = $5
            WHERE id = $1
            RETURNING {}
            "#,
            CARD_COLUMNS
        ))
        .bind(id)
        .bind(card.user_id)
        .bind(&card.nfc_id)
        .bind(card.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        Ok(card)
    }

    async fn delete_card(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
