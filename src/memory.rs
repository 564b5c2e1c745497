//! In-memory store enforcing the same constraints as the PostgreSQL schema.
//!
//! Selected with `DATABASE_URL=memory://` and used throughout the tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::accounts::models::{
    InviteEmail, Profile, ProfileUpdate, User, USERS_EMAIL_KEY, USERS_USERNAME_KEY,
};
use crate::accounts::repo::AccountsRepo;
use crate::error::RepoError;
use crate::planner::models::{
    Milestone, School, Semester, Student, SCHOOLS_SLUG_KEY, SCHOOLS_URL_KEY,
    STUDENTS_USER_ID_FKEY,
};
use crate::planner::repo::PlannerRepo;
use crate::support::models::SupportTicket;
use crate::support::repo::SupportRepo;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    invite_emails: Vec<InviteEmail>,
    schools: Vec<School>,
    milestones: Vec<Milestone>,
    semesters: Vec<Semester>,
    students: Vec<Student>,
    support_tickets: Vec<SupportTicket>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AccountsRepo for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<Profile, RepoError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::integrity(USERS_USERNAME_KEY));
        }
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::integrity(USERS_EMAIL_KEY));
        }
        let profile = Profile::new(user.id);
        t.users.push(user.clone());
        t.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Profile, RepoError> {
        self.tables()
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, RepoError> {
        let mut t = self.tables();
        let profile = t
            .profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(RepoError::NotFound)?;
        profile.apply(update);
        Ok(profile.clone())
    }

    async fn insert_invite_email(&self, invite: &InviteEmail) -> Result<(), RepoError> {
        self.tables().invite_emails.push(invite.clone());
        Ok(())
    }

    async fn list_invite_emails(&self) -> Result<Vec<InviteEmail>, RepoError> {
        let mut rows = self.tables().invite_emails.clone();
        rows.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        Ok(rows)
    }
}

#[async_trait]
impl PlannerRepo for MemoryStore {
    async fn insert_school(&self, school: &School) -> Result<(), RepoError> {
        let mut t = self.tables();
        if t.schools.iter().any(|s| s.slug == school.slug) {
            return Err(RepoError::integrity(SCHOOLS_SLUG_KEY));
        }
        if t.schools.iter().any(|s| s.url == school.url) {
            return Err(RepoError::integrity(SCHOOLS_URL_KEY));
        }
        t.schools.push(school.clone());
        Ok(())
    }

    async fn list_schools(&self) -> Result<Vec<School>, RepoError> {
        let mut rows = self.tables().schools.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_school_by_slug(&self, slug: &str) -> Result<Option<School>, RepoError> {
        Ok(self.tables().schools.iter().find(|s| s.slug == slug).cloned())
    }

    async fn insert_milestone(&self, milestone: &Milestone) -> Result<(), RepoError> {
        self.tables().milestones.push(milestone.clone());
        Ok(())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, RepoError> {
        let mut rows = self.tables().milestones.clone();
        rows.sort_by_key(|m| m.date);
        Ok(rows)
    }

    async fn insert_semester(&self, semester: &Semester) -> Result<(), RepoError> {
        self.tables().semesters.push(semester.clone());
        Ok(())
    }

    async fn list_semesters(&self, active_only: bool) -> Result<Vec<Semester>, RepoError> {
        let mut rows: Vec<Semester> = self
            .tables()
            .semesters
            .iter()
            .filter(|s| s.active || !active_only)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.date);
        Ok(rows)
    }

    async fn insert_student(&self, student: &Student) -> Result<(), RepoError> {
        let mut t = self.tables();
        if !t.users.iter().any(|u| u.id == student.user_id) {
            return Err(RepoError::integrity(STUDENTS_USER_ID_FKEY));
        }
        t.students.push(student.clone());
        Ok(())
    }

    async fn list_students(&self, user_id: Uuid) -> Result<Vec<Student>, RepoError> {
        let mut rows: Vec<Student> = self
            .tables()
            .students
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(rows)
    }
}

#[async_trait]
impl SupportRepo for MemoryStore {
    async fn insert_ticket(&self, ticket: &SupportTicket) -> Result<(), RepoError> {
        self.tables().support_tickets.push(ticket.clone());
        Ok(())
    }

    async fn find_ticket(&self, id: Uuid) -> Result<Option<SupportTicket>, RepoError> {
        Ok(self
            .tables()
            .support_tickets
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }
}
