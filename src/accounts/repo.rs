use async_trait::async_trait;
use uuid::Uuid;

use crate::accounts::models::{InviteEmail, Profile, ProfileUpdate, User};
use crate::db::PgStore;
use crate::error::RepoError;

#[async_trait]
pub trait AccountsRepo: Send + Sync {
    /// Insert a user together with its empty profile.
    async fn insert_user(&self, user: &User) -> Result<Profile, RepoError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_profile(&self, user_id: Uuid) -> Result<Profile, RepoError>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, RepoError>;

    async fn insert_invite_email(&self, invite: &InviteEmail) -> Result<(), RepoError>;

    /// Newest first.
    async fn list_invite_emails(&self) -> Result<Vec<InviteEmail>, RepoError>;
}

#[async_trait]
impl AccountsRepo for PgStore {
    async fn insert_user(&self, user: &User) -> Result<Profile, RepoError> {
        let mut tx = self.db.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&mut *tx)
        .await?;

        let profile = Profile::new(user.id);
        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, postal_code, stripe_customer_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.postal_code)
        .bind(&profile.stripe_customer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(profile)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Profile, RepoError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, postal_code, stripe_customer_id
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, RepoError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET postal_code = COALESCE($2, postal_code),
                stripe_customer_id = COALESCE($3, stripe_customer_id)
            WHERE user_id = $1
            RETURNING id, user_id, postal_code, stripe_customer_id
            "#,
        )
        .bind(user_id)
        .bind(update.postal_code)
        .bind(update.stripe_customer_id)
        .fetch_one(&self.db)
        .await?;
        Ok(profile)
    }

    async fn insert_invite_email(&self, invite: &InviteEmail) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO invite_emails (id, email, created_date)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(invite.id)
        .bind(&invite.email)
        .bind(invite.created_date)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list_invite_emails(&self) -> Result<Vec<InviteEmail>, RepoError> {
        let rows = sqlx::query_as::<_, InviteEmail>(
            r#"
            SELECT id, email, created_date
            FROM invite_emails
            ORDER BY created_date DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
