use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::error::RepoError;
use crate::planner::models::{Milestone, School, Semester, Student};

#[async_trait]
pub trait PlannerRepo: Send + Sync {
    async fn insert_school(&self, school: &School) -> Result<(), RepoError>;

    /// Ordered by name.
    async fn list_schools(&self) -> Result<Vec<School>, RepoError>;

    async fn find_school_by_slug(&self, slug: &str) -> Result<Option<School>, RepoError>;

    async fn insert_milestone(&self, milestone: &Milestone) -> Result<(), RepoError>;

    /// Chronological.
    async fn list_milestones(&self) -> Result<Vec<Milestone>, RepoError>;

    async fn insert_semester(&self, semester: &Semester) -> Result<(), RepoError>;

    async fn list_semesters(&self, active_only: bool) -> Result<Vec<Semester>, RepoError>;

    async fn insert_student(&self, student: &Student) -> Result<(), RepoError>;

    async fn list_students(&self, user_id: Uuid) -> Result<Vec<Student>, RepoError>;
}

#[async_trait]
impl PlannerRepo for PgStore {
    async fn insert_school(&self, school: &School) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO schools (id, name, slug, url, milestones_url)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(school.id)
        .bind(&school.name)
        .bind(&school.slug)
        .bind(&school.url)
        .bind(&school.milestones_url)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list_schools(&self) -> Result<Vec<School>, RepoError> {
        let rows = sqlx::query_as::<_, School>(
            r#"
            SELECT id, name, slug, url, milestones_url
            FROM schools
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_school_by_slug(&self, slug: &str) -> Result<Option<School>, RepoError> {
        let school = sqlx::query_as::<_, School>(
            r#"
            SELECT id, name, slug, url, milestones_url
            FROM schools
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await?;
        Ok(school)
    }

    async fn insert_milestone(&self, milestone: &Milestone) -> Result<(), RepoError> {
        sqlx::query(r#"INSERT INTO milestones (id, date) VALUES ($1, $2)"#)
            .bind(milestone.id)
            .bind(milestone.date)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, RepoError> {
        let rows = sqlx::query_as::<_, Milestone>(
            r#"SELECT id, date FROM milestones ORDER BY date"#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn insert_semester(&self, semester: &Semester) -> Result<(), RepoError> {
        sqlx::query(r#"INSERT INTO semesters (id, active, date) VALUES ($1, $2, $3)"#)
            .bind(semester.id)
            .bind(semester.active)
            .bind(semester.date)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn list_semesters(&self, active_only: bool) -> Result<Vec<Semester>, RepoError> {
        let rows = sqlx::query_as::<_, Semester>(
            r#"
            SELECT id, active, date
            FROM semesters
            WHERE active OR NOT $1
            ORDER BY date
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn insert_student(&self, student: &Student) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO students (id, user_id, first_name, last_name, class_year)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(student.id)
        .bind(student.user_id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.class_year)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list_students(&self, user_id: Uuid) -> Result<Vec<Student>, RepoError> {
        let rows = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, user_id, first_name, last_name, class_year
            FROM students
            WHERE user_id = $1
            ORDER BY last_name, first_name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
