//! Test factories: build entities with sensible defaults, override per field,
//! and optionally persist them through a store.

use std::sync::atomic::{AtomicUsize, Ordering};

use time::Date;
use uuid::Uuid;

use crate::accounts::models::{InviteEmail, Profile, User};
use crate::accounts::repo::AccountsRepo;
use crate::error::RepoError;
use crate::planner::models::{School, Semester, Student};
use crate::planner::repo::PlannerRepo;
use crate::support::models::SupportTicket;
use crate::support::repo::SupportRepo;

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

fn next_seq() -> usize {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

#[derive(Default)]
pub struct UserFactory {
    username: Option<String>,
    email: Option<String>,
}

impl UserFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> User {
        let n = next_seq();
        User::new(
            self.username.unwrap_or_else(|| format!("user{n}")),
            self.email.unwrap_or_else(|| format!("user{n}@test.com")),
        )
    }

    pub async fn create(self, repo: &dyn AccountsRepo) -> Result<(User, Profile), RepoError> {
        let user = self.build();
        let profile = repo.insert_user(&user).await?;
        Ok((user, profile))
    }
}

#[derive(Default)]
pub struct ProfileFactory {
    user_id: Option<Uuid>,
    postal_code: Option<String>,
    stripe_customer_id: Option<String>,
}

impl ProfileFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn postal_code(mut self, postal_code: &str) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn stripe_customer_id(mut self, customer_id: &str) -> Self {
        self.stripe_customer_id = Some(customer_id.into());
        self
    }

    pub fn build(self) -> Profile {
        let user_id = self
            .user_id
            .unwrap_or_else(|| UserFactory::new().build().id);
        let mut profile = Profile::new(user_id);
        if let Some(postal_code) = self.postal_code {
            profile.postal_code = postal_code;
        }
        if let Some(customer_id) = self.stripe_customer_id {
            profile.stripe_customer_id = customer_id;
        }
        profile
    }
}

#[derive(Default)]
pub struct InviteEmailFactory {
    email: Option<String>,
}

impl InviteEmailFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> InviteEmail {
        InviteEmail::new(
            self.email
                .unwrap_or_else(|| format!("invite{}@test.com", next_seq())),
        )
    }

    pub async fn create(self, repo: &dyn AccountsRepo) -> Result<InviteEmail, RepoError> {
        let invite = self.build();
        repo.insert_invite_email(&invite).await?;
        Ok(invite)
    }
}

#[derive(Default)]
pub struct SchoolFactory {
    name: Option<String>,
    slug: Option<String>,
    url: Option<String>,
}

impl SchoolFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn build(self) -> School {
        let n = next_seq();
        let url = self
            .url
            .unwrap_or_else(|| format!("https://school{n}.example.edu"));
        let milestones_url = format!("{url}/calendar");
        School::new(
            self.name.unwrap_or_else(|| format!("School {n}")),
            self.slug.unwrap_or_else(|| format!("school-{n}")),
            url,
            milestones_url,
        )
    }

    pub async fn create(self, repo: &dyn PlannerRepo) -> Result<School, RepoError> {
        let school = self.build();
        repo.insert_school(&school).await?;
        Ok(school)
    }
}

#[derive(Default)]
pub struct SemesterFactory {
    active: Option<bool>,
    date: Option<Date>,
}

impl SemesterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    pub fn build(self) -> Semester {
        let mut semester = Semester::new(
            self.date
                .unwrap_or_else(|| time::macros::date!(2024 - 08 - 26)),
        );
        if let Some(active) = self.active {
            semester.active = active;
        }
        semester
    }

    pub async fn create(self, repo: &dyn PlannerRepo) -> Result<Semester, RepoError> {
        let semester = self.build();
        repo.insert_semester(&semester).await?;
        Ok(semester)
    }
}

pub struct StudentFactory {
    user_id: Uuid,
    first_name: String,
    last_name: String,
}

impl StudentFactory {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            first_name: "Mary".into(),
            last_name: "Smith".into(),
        }
    }

    pub fn first_name(mut self, first_name: &str) -> Self {
        self.first_name = first_name.into();
        self
    }

    pub fn last_name(mut self, last_name: &str) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn build(self) -> Student {
        Student::new(self.user_id, self.first_name, self.last_name)
    }

    pub async fn create(self, repo: &dyn PlannerRepo) -> Result<Student, RepoError> {
        let student = self.build();
        repo.insert_student(&student).await?;
        Ok(student)
    }
}

#[derive(Default)]
pub struct SupportTicketFactory {
    subject: Option<String>,
    message: Option<String>,
}

impl SupportTicketFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn build(self) -> SupportTicket {
        let n = next_seq();
        SupportTicket::new(
            self.subject.unwrap_or_else(|| format!("Ticket {n}")),
            self.message
                .unwrap_or_else(|| "Something is not working.".into()),
        )
    }

    pub async fn create(self, repo: &dyn SupportRepo) -> Result<SupportTicket, RepoError> {
        let ticket = self.build();
        repo.insert_ticket(&ticket).await?;
        Ok(ticket)
    }
}
