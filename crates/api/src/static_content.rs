// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Content bundled into the binary and served when the database fails.

use serde::de::DeserializeOwned;
use tracing::error;
use vine_persistence::{ScheduleEventData, SermonData};

const SERMONS_JSON: &str = include_str!("../static/sermons.json");
const SCHEDULE_EVENTS_JSON: &str = include_str!("../static/schedule_events.json");

fn parse_bundled<T: DeserializeOwned>(name: &str, json: &str) -> Vec<T> {
    serde_json::from_str(json).unwrap_or_else(|e| {
        error!(name, error = %e, "Bundled content is not valid JSON");
        Vec::new()
    })
}

/// Bundled sermons, newest first, optionally filtered by language.
#[must_use]
pub fn fallback_sermons(language: Option<&str>) -> Vec<SermonData> {
    let mut sermons: Vec<SermonData> = parse_bundled::<SermonData>("sermons", SERMONS_JSON)
        .into_iter()
        .filter(|s| language.is_none_or(|l| s.language == l))
        .collect();
    sermons.sort_by(|a, b| b.sermon_date.cmp(&a.sermon_date));
    sermons
}

/// Bundled schedule events in weekly order, optionally filtered by language.
#[must_use]
pub fn fallback_schedule_events(language: Option<&str>) -> Vec<ScheduleEventData> {
    let mut events: Vec<ScheduleEventData> =
        parse_bundled::<ScheduleEventData>("schedule_events", SCHEDULE_EVENTS_JSON)
            .into_iter()
            .filter(|e| language.is_none_or(|l| e.language == l))
            .collect();
    events.sort_by(|a, b| {
        (a.day_of_week.is_none(), a.day_of_week, &a.event_date, &a.start_time).cmp(&(
            b.day_of_week.is_none(),
            b.day_of_week,
            &b.event_date,
            &b.start_time,
        ))
    });
    events
}
