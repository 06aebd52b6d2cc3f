use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eduzone_models::{CalendarEvent, EventFilterParams, NewEvent};

use crate::error::StoreError;
use crate::repositories::EventRepository;

pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "calendar_events"))]
    async fn list(&self, filter: &EventFilterParams) -> Result<Vec<CalendarEvent>, StoreError> {
        let events = sqlx::query_as::<_, CalendarEvent>(
            "SELECT * FROM calendar_events
             WHERE ($1::date IS NULL OR date >= $1)
               AND ($2::date IS NULL OR date <= $2)
             ORDER BY date ASC, id ASC",
        )
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "calendar_events"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<CalendarEvent>, StoreError> {
        let event =
            sqlx::query_as::<_, CalendarEvent>("SELECT * FROM calendar_events WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(event)
    }

    #[instrument(skip(self, event), fields(db.operation = "INSERT", db.table = "calendar_events"))]
    async fn create(&self, event: NewEvent) -> Result<CalendarEvent, StoreError> {
        let created = sqlx::query_as::<_, CalendarEvent>(
            "INSERT INTO calendar_events (title, description, date, event_type)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.event_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[instrument(skip(self, event), fields(db.operation = "UPDATE", db.table = "calendar_events"))]
    async fn update(
        &self,
        id: i64,
        event: NewEvent,
    ) -> Result<Option<CalendarEvent>, StoreError> {
        let updated = sqlx::query_as::<_, CalendarEvent>(
            "UPDATE calendar_events
             SET title = $2, description = $3, date = $4, event_type = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.event_type)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "calendar_events"))]
    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
