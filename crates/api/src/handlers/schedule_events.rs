// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service schedule handlers. Reads are public; admins and trainees edit.

use time::Time;
use time::macros::format_description;
use tracing::{info, warn};
use vine_domain::validate_day_of_week;
use vine_persistence::{Persistence, ScheduleEventData, ScheduleEventFields};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{
    language_filter, language_or_default, optional_date, optional_text, required_text,
};
use crate::request_response::{ContentList, DataSource, LanguageQuery, ScheduleEventRequest};
use crate::static_content::fallback_schedule_events;

/// Accepts 24-hour `HH:MM` times.
fn validate_time(field: &'static str, value: &str) -> Result<(), ApiError> {
    Time::parse(value, format_description!("[hour]:[minute]"))
        .map(|_| ())
        .map_err(|e| ApiError::validation(field, format!("Invalid time '{value}': {e}")))
}

fn build_fields(request: &ScheduleEventRequest) -> Result<ScheduleEventFields, ApiError> {
    let title: String = required_text("title", request.title.as_deref())?;
    let start_time: String = required_text("start_time", request.start_time.as_deref())?;
    validate_time("start_time", &start_time)?;

    let end_time: Option<String> = optional_text(request.end_time.as_deref());
    if let Some(end) = &end_time {
        validate_time("end_time", end)?;
        if end.as_str() < start_time.as_str() {
            return Err(ApiError::validation(
                "end_time",
                "end_time must not be before start_time",
            ));
        }
    }

    if let Some(day) = request.day_of_week {
        validate_day_of_week(day)?;
    }

    Ok(ScheduleEventFields {
        title,
        description: optional_text(request.description.as_deref()),
        day_of_week: request.day_of_week,
        event_date: optional_date("event_date", request.event_date.as_deref())?,
        start_time,
        end_time,
        location: optional_text(request.location.as_deref()),
        language: language_or_default(request.language.as_deref())?,
        is_recurring: request
            .is_recurring
            .unwrap_or(request.day_of_week.is_some()),
    })
}

/// Lists schedule events in weekly order.
///
/// When the database call fails the bundled schedule is returned with
/// [`DataSource::Static`].
///
/// # Errors
///
/// Returns a validation error for an unknown language.
pub fn list_schedule_events(
    persistence: &mut Persistence,
    query: &LanguageQuery,
) -> Result<ContentList<ScheduleEventData>, ApiError> {
    let language: Option<String> = language_filter(query.language.as_deref())?;

    match persistence.list_schedule_events(language.as_deref()) {
        Ok(items) => Ok(ContentList {
            items,
            source: DataSource::Database,
        }),
        Err(e) => {
            warn!(error = %e, "Schedule query failed, serving bundled schedule");
            Ok(ContentList {
                items: fallback_schedule_events(language.as_deref()),
                source: DataSource::Static,
            })
        }
    }
}

/// Retrieves one schedule event.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if it does not exist.
pub fn get_schedule_event(
    persistence: &mut Persistence,
    event_id: &str,
) -> Result<ScheduleEventData, ApiError> {
    persistence
        .get_schedule_event(event_id)
        .map_err(|e| translate_persistence_error(e, "Schedule event"))?
        .ok_or_else(|| ApiError::not_found("Schedule event", event_id))
}

/// Creates a schedule event.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` unless the caller is an admin or trainee.
pub fn create_schedule_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ScheduleEventRequest,
) -> Result<ScheduleEventData, ApiError> {
    AuthorizationService::require_schedule_editor(actor, "create_schedule_event")?;
    let fields: ScheduleEventFields = build_fields(request)?;

    let event: ScheduleEventData = persistence
        .create_schedule_event(&fields)
        .map_err(|e| translate_persistence_error(e, "Schedule event"))?;

    info!(event_id = %event.event_id, created_by = %actor.account_id, "Schedule event created");
    Ok(event)
}

/// Replaces a schedule event.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown event and
/// `ApiError::Conflict` on a stale `expected_version`.
pub fn update_schedule_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: &str,
    request: &ScheduleEventRequest,
) -> Result<ScheduleEventData, ApiError> {
    AuthorizationService::require_schedule_editor(actor, "update_schedule_event")?;
    let fields: ScheduleEventFields = build_fields(request)?;

    persistence
        .update_schedule_event(event_id, &fields, request.expected_version)
        .map_err(|e| translate_persistence_error(e, "Schedule event"))
}

/// Deletes a schedule event.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown event.
pub fn delete_schedule_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    event_id: &str,
) -> Result<(), ApiError> {
    AuthorizationService::require_schedule_editor(actor, "delete_schedule_event")?;

    persistence
        .delete_schedule_event(event_id)
        .map_err(|e| translate_persistence_error(e, "Schedule event"))
}
