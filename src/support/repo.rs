use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::error::RepoError;
use crate::support::models::SupportTicket;

#[async_trait]
pub trait SupportRepo: Send + Sync {
    async fn insert_ticket(&self, ticket: &SupportTicket) -> Result<(), RepoError>;

    async fn find_ticket(&self, id: Uuid) -> Result<Option<SupportTicket>, RepoError>;
}

#[async_trait]
impl SupportRepo for PgStore {
    async fn insert_ticket(&self, ticket: &SupportTicket) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO support_tickets (id, subject, message, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(ticket.id)
        .bind(&ticket.subject)
        .bind(&ticket.message)
        .bind(ticket.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn find_ticket(&self, id: Uuid) -> Result<Option<SupportTicket>, RepoError> {
        let ticket = sqlx::query_as::<_, SupportTicket>(
            r#"
            SELECT id, subject, message, created_at
            FROM support_tickets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(ticket)
    }
}
