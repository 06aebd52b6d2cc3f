use anyhow::{Context, anyhow};
use tracing::{debug, info, instrument};

use eduzone_core::AppError;
use eduzone_db::Repositories;
use eduzone_models::{CalendarEvent, EventDto, EventFilterParams};

use crate::validator::validated;

pub struct CalendarService;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Event not found"))
}

impl CalendarService {
    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "calendar_events"))]
    pub async fn list_events(
        repos: &Repositories,
        filter: EventFilterParams,
    ) -> Result<Vec<CalendarEvent>, AppError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to)
            && from > to
        {
            return Err(AppError::bad_request(anyhow!(
                "'from' must not be after 'to'"
            )));
        }

        let events = repos
            .events
            .list(&filter)
            .await
            .context("Error fetching events")?;

        debug!(count = events.len(), "Fetched calendar events");
        Ok(events)
    }

    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "calendar_events"))]
    pub async fn get_event(repos: &Repositories, id: i64) -> Result<CalendarEvent, AppError> {
        repos
            .events
            .find_by_id(id)
            .await
            .context("Error fetching event")?
            .ok_or_else(not_found)
    }

    #[instrument(skip(repos, dto), fields(db.operation = "INSERT", db.table = "calendar_events"))]
    pub async fn create_event(
        repos: &Repositories,
        dto: EventDto,
    ) -> Result<CalendarEvent, AppError> {
        let new_event = validated(dto, EventDto::into_new)?;

        let event = repos
            .events
            .create(new_event)
            .await
            .context("Error creating event")?;

        info!(event.id = event.id, event.date = %event.date, "Calendar event created");
        Ok(event)
    }

    #[instrument(skip(repos, dto), fields(db.operation = "UPDATE", db.table = "calendar_events"))]
    pub async fn update_event(
        repos: &Repositories,
        id: i64,
        dto: EventDto,
    ) -> Result<CalendarEvent, AppError> {
        let changes = validated(dto, EventDto::into_new)?;

        let event = repos
            .events
            .update(id, changes)
            .await
            .context("Error updating event")?
            .ok_or_else(not_found)?;

        info!(event.id = event.id, "Calendar event updated");
        Ok(event)
    }

    #[instrument(skip(repos), fields(db.operation = "DELETE", db.table = "calendar_events"))]
    pub async fn delete_event(repos: &Repositories, id: i64) -> Result<(), AppError> {
        if !repos
            .events
            .delete(id)
            .await
            .context("Error deleting event")?
        {
            return Err(not_found());
        }

        info!(event.id = id, "Calendar event deleted");
        Ok(())
    }
}
