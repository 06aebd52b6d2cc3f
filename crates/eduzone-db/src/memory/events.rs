use async_trait::async_trait;
use chrono::Utc;

use eduzone_models::{CalendarEvent, EventFilterParams, NewEvent};

use super::MemoryDatabase;
use crate::error::StoreError;
use crate::repositories::EventRepository;

pub struct MemoryEventRepository {
    db: MemoryDatabase,
}

impl MemoryEventRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn list(&self, filter: &EventFilterParams) -> Result<Vec<CalendarEvent>, StoreError> {
        let mut events = self
            .db
            .read()
            .await
            .events
            .select(|e| filter.matches(e.date));
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CalendarEvent>, StoreError> {
        Ok(self.db.read().await.events.get(id))
    }

    async fn create(&self, event: NewEvent) -> Result<CalendarEvent, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.events.insert_with(|id| CalendarEvent {
            id,
            title: event.title,
            description: event.description,
            date: event.date,
            event_type: event.event_type,
            created_at: Utc::now(),
        }))
    }

    async fn update(
        &self,
        id: i64,
        event: NewEvent,
    ) -> Result<Option<CalendarEvent>, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.events.update_where(
            id,
            |_| true,
            |row| {
                row.title = event.title;
                row.description = event.description;
                row.date = event.date;
                row.event_type = event.event_type;
            },
        ))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.events.remove_where(id, |_| true).is_some())
    }
}
