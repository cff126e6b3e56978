//! Audit log repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use labstock_core::audit::AuditEvent;
use labstock_shared::{PageRequest, PageResponse};

use crate::entities::audit_logs;

/// Writes one audit row on the given connection or transaction.
pub(crate) async fn insert_event<C: ConnectionTrait>(
    conn: &C,
    event: &AuditEvent,
) -> Result<audit_logs::Model, DbErr> {
    audit_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        actor: Set(event.actor.clone()),
        action: Set(event.action.as_str().to_string()),
        details: Set(event.details.clone()),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await
}

/// Read access to the audit log.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    db: DatabaseConnection,
}

impl AuditRepository {
    /// Creates a new audit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an event outside any other mutation.
    pub async fn record(&self, event: &AuditEvent) -> Result<audit_logs::Model, DbErr> {
        insert_event(&self.db, event).await
    }

    /// Lists audit entries, newest first.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<audit_logs::Model>, DbErr> {
        let total = audit_logs::Entity::find().count(&self.db).await?;

        let data = audit_logs::Entity::find()
            .order_by_desc(audit_logs::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}
