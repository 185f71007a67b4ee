// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sermons, schedule, gallery and public form tests.

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use vine_domain::MAX_UPLOAD_BYTES;
use vine_persistence::Persistence;

use crate::handlers::gallery::{
    authorize_upload, create_gallery_image, delete_gallery_image, list_gallery_images,
};
use crate::handlers::page_request;
use crate::handlers::schedule_events::{create_schedule_event, list_schedule_events};
use crate::handlers::sermons::{create_sermon, get_sermon, list_sermons, update_sermon};
use crate::handlers::visitors::{list_visitors, register_visitor, update_visitor};
use crate::handlers::volunteers::register_volunteer;
use crate::{
    ApiError, AuthenticatedActor, DataSource, GalleryImageRequest, ImageUpload, LanguageQuery,
    PageQuery, ScheduleEventRequest, SermonRequest, VisitorRequest, VolunteerRequest,
    fallback_schedule_events, fallback_sermons,
};

use super::helpers::{create_actor, setup_test_persistence};

fn sermon(title: &str, date: &str, language: &str) -> SermonRequest {
    SermonRequest {
        title: Some(title.to_string()),
        sermon_date: Some(date.to_string()),
        speaker: Some(String::from("Pr. Marcos")),
        language: Some(language.to_string()),
        ..SermonRequest::default()
    }
}

fn language(value: &str) -> LanguageQuery {
    LanguageQuery {
        language: Some(value.to_string()),
    }
}

#[test]
fn test_sermons_list_from_database_by_language() {
    let mut persistence = setup_test_persistence();
    let admin = AuthenticatedActor::service();
    create_sermon(&mut persistence, &admin, &sermon("Antigo", "2026-09-01", "pt")).unwrap();
    create_sermon(&mut persistence, &admin, &sermon("Novo", "2026-10-11", "pt")).unwrap();
    create_sermon(&mut persistence, &admin, &sermon("New", "2026-10-11", "en")).unwrap();

    let listed = list_sermons(&mut persistence, &language("pt")).unwrap();

    assert_eq!(listed.source, DataSource::Database);
    let titles: Vec<&str> = listed.items.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Novo", "Antigo"]);
}

#[test]
fn test_sermon_validation_and_unknown_language() {
    let mut persistence = setup_test_persistence();
    let admin = AuthenticatedActor::service();

    let no_title = create_sermon(
        &mut persistence,
        &admin,
        &SermonRequest {
            title: Some(String::from("   ")),
            ..sermon("x", "2026-10-11", "pt")
        },
    );
    assert_eq!(no_title.unwrap_err().field(), Some("title"));

    let bad_date = create_sermon(&mut persistence, &admin, &sermon("A", "11/10/2026", "pt"));
    assert_eq!(bad_date.unwrap_err().field(), Some("sermon_date"));

    let bad_language = list_sermons(&mut persistence, &language("fr"));
    assert_eq!(bad_language.unwrap_err().field(), Some("language"));
}

#[test]
fn test_sermon_update_bumps_version_and_rejects_stale() {
    let mut persistence = setup_test_persistence();
    let admin = create_actor(&mut persistence, "admin@vine.org", "admin", None);
    let created = create_sermon(&mut persistence, &admin, &sermon("A", "2026-10-11", "pt")).unwrap();

    let updated = update_sermon(
        &mut persistence,
        &admin,
        &created.sermon_id,
        &SermonRequest {
            expected_version: Some(created.version),
            ..sermon("A Videira", "2026-10-11", "pt")
        },
    )
    .unwrap();
    assert_eq!(updated.version, created.version + 1);
    assert_eq!(
        get_sermon(&mut persistence, &created.sermon_id).unwrap().title,
        "A Videira"
    );

    let stale = update_sermon(
        &mut persistence,
        &admin,
        &created.sermon_id,
        &SermonRequest {
            expected_version: Some(created.version),
            ..sermon("B", "2026-10-11", "pt")
        },
    );
    assert!(matches!(stale, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_bundled_content_is_filtered_and_ordered() {
    let sermons = fallback_sermons(Some("pt"));
    assert!(!sermons.is_empty());
    assert!(sermons.iter().all(|s| s.language == "pt"));
    assert!(
        sermons
            .windows(2)
            .all(|pair| pair[0].sermon_date >= pair[1].sermon_date)
    );

    let events = fallback_schedule_events(None);
    assert!(events.len() >= fallback_schedule_events(Some("en")).len());
    assert!(
        events
            .windows(2)
            .all(|pair| pair[0].day_of_week <= pair[1].day_of_week)
    );
}

#[test]
fn test_schedule_event_time_validation() {
    let mut persistence = setup_test_persistence();
    let trainee = create_actor(&mut persistence, "media@vine.org", "trainee", None);
    let base = ScheduleEventRequest {
        title: Some(String::from("Culto")),
        day_of_week: Some(0),
        start_time: Some(String::from("10:00")),
        ..ScheduleEventRequest::default()
    };

    let bad_start = create_schedule_event(
        &mut persistence,
        &trainee,
        &ScheduleEventRequest {
            start_time: Some(String::from("25:00")),
            ..base.clone()
        },
    );
    assert_eq!(bad_start.unwrap_err().field(), Some("start_time"));

    let reversed = create_schedule_event(
        &mut persistence,
        &trainee,
        &ScheduleEventRequest {
            end_time: Some(String::from("09:00")),
            ..base.clone()
        },
    );
    assert_eq!(reversed.unwrap_err().field(), Some("end_time"));

    let bad_day = create_schedule_event(
        &mut persistence,
        &trainee,
        &ScheduleEventRequest {
            day_of_week: Some(7),
            ..base.clone()
        },
    );
    assert_eq!(bad_day.unwrap_err().field(), Some("day_of_week"));

    let created = create_schedule_event(&mut persistence, &trainee, &base).unwrap();
    assert!(created.is_recurring);
    assert_eq!(created.language, "pt");

    let listed = list_schedule_events(&mut persistence, &LanguageQuery::default()).unwrap();
    assert_eq!(listed.source, DataSource::Database);
    assert_eq!(listed.items.len(), 1);
}

#[test]
fn test_gallery_is_public_to_read_and_admin_to_write() {
    let mut persistence = setup_test_persistence();
    let admin = create_actor(&mut persistence, "admin@vine.org", "admin", None);
    let teacher = create_actor(&mut persistence, "teacher@vine.org", "teacher", None);
    let request = GalleryImageRequest {
        title: Some(String::from("Páscoa")),
        image_url: Some(String::from("/uploads/easter.jpg")),
        display_order: Some(2),
        ..GalleryImageRequest::default()
    };

    assert!(matches!(
        create_gallery_image(&mut persistence, &teacher, &request),
        Err(ApiError::Forbidden { .. })
    ));

    let created = create_gallery_image(&mut persistence, &admin, &request).unwrap();
    assert_eq!(list_gallery_images(&mut persistence).unwrap().len(), 1);

    let removed = delete_gallery_image(&mut persistence, &admin, &created.image_id).unwrap();
    assert_eq!(removed.image_url, "/uploads/easter.jpg");
    assert!(list_gallery_images(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_upload_checks_role_type_and_size() {
    let admin = AuthenticatedActor::service();
    let mut persistence = setup_test_persistence();
    let member = create_actor(&mut persistence, "ana@vine.org", "member", None);
    let png = ImageUpload {
        content_type: String::from("image/png"),
        size: 1024,
    };

    assert_eq!(authorize_upload(&admin, &png).unwrap(), "png");
    assert!(matches!(
        authorize_upload(&member, &png),
        Err(ApiError::Forbidden { .. })
    ));

    let pdf = ImageUpload {
        content_type: String::from("application/pdf"),
        size: 1024,
    };
    assert_eq!(authorize_upload(&admin, &pdf).unwrap_err().code(), "validation_error");

    let huge = ImageUpload {
        content_type: String::from("image/jpeg"),
        size: MAX_UPLOAD_BYTES + 1,
    };
    assert!(matches!(
        authorize_upload(&admin, &huge),
        Err(ApiError::PayloadTooLarge { .. })
    ));
}

#[test]
fn test_visitor_registration_is_never_followed_up() {
    let mut persistence = setup_test_persistence();
    let admin = create_actor(&mut persistence, "admin@vine.org", "admin", None);

    let visitor = register_visitor(
        &mut persistence,
        &VisitorRequest {
            full_name: Some(String::from("Helena Costa")),
            email: Some(String::from("helena@example.com")),
            wants_contact: Some(true),
            followed_up: Some(true),
            ..VisitorRequest::default()
        },
    )
    .unwrap();
    assert!(!visitor.followed_up);
    assert!(visitor.wants_contact);

    let updated = update_visitor(
        &mut persistence,
        &admin,
        &visitor.visitor_id,
        &VisitorRequest {
            full_name: Some(String::from("Helena Costa")),
            followed_up: Some(true),
            ..VisitorRequest::default()
        },
    )
    .unwrap();
    assert!(updated.followed_up);

    let page = list_visitors(&mut persistence, &admin, &PageQuery::default()).unwrap();
    assert_eq!(page.total, 1);
}

#[test]
fn test_visitor_registration_validates_contact() {
    let mut persistence = setup_test_persistence();

    let bad_email = register_visitor(
        &mut persistence,
        &VisitorRequest {
            full_name: Some(String::from("Helena")),
            email: Some(String::from("helena-at-example")),
            ..VisitorRequest::default()
        },
    );
    assert_eq!(bad_email.unwrap_err().field(), Some("email"));

    let no_name = register_visitor(&mut persistence, &VisitorRequest::default());
    assert_eq!(no_name.unwrap_err().field(), Some("full_name"));
}

#[test]
fn test_volunteer_requires_an_area() {
    let mut persistence = setup_test_persistence();

    let none = register_volunteer(
        &mut persistence,
        &VolunteerRequest {
            full_name: Some(String::from("Rafael")),
            areas: Some(vec![String::from("  ")]),
            ..VolunteerRequest::default()
        },
    );
    assert_eq!(none.unwrap_err().field(), Some("areas"));

    let volunteer = register_volunteer(
        &mut persistence,
        &VolunteerRequest {
            full_name: Some(String::from("Rafael")),
            areas: Some(vec![String::from("kids"), String::from("media")]),
            contacted: Some(true),
            ..VolunteerRequest::default()
        },
    )
    .unwrap();
    assert_eq!(volunteer.areas, vec!["kids", "media"]);
    assert!(!volunteer.contacted);
}

#[test]
fn test_page_request_bounds_page_and_page_size() {
    let huge = page_request(&PageQuery {
        search: Some(String::from("  ")),
        page: Some(i64::MAX),
        per_page: Some(i64::MAX),
    });
    assert_eq!(huge.page, 1_000_000);
    assert_eq!(huge.per_page, 100);
    assert!(huge.search.is_none());
    assert_eq!(huge.offset(), 99_999_900);

    let negative = page_request(&PageQuery {
        search: None,
        page: Some(-3),
        per_page: Some(0),
    });
    assert_eq!(negative.page, 1);
    assert_eq!(negative.per_page, 1);
    assert_eq!(negative.offset(), 0);
}

#[test]
fn test_content_lists_fall_back_to_bundled_data_when_query_fails() {
    let path = std::env::temp_dir().join(format!("vine-api-{}.db", uuid::Uuid::new_v4()));
    let mut persistence = Persistence::new_with_file(&path).unwrap();
    let admin = create_actor(&mut persistence, "admin@vine.org", "admin", None);
    create_sermon(&mut persistence, &admin, &sermon("Stored", "2026-02-01", "pt")).unwrap();

    let stored = list_sermons(&mut persistence, &LanguageQuery::default()).unwrap();
    assert_eq!(stored.source, DataSource::Database);

    let mut other = SqliteConnection::establish(path.to_str().unwrap()).unwrap();
    diesel::sql_query("DROP TABLE sermons").execute(&mut other).unwrap();
    diesel::sql_query("DROP TABLE schedule_events")
        .execute(&mut other)
        .unwrap();
    drop(other);

    let sermons = list_sermons(&mut persistence, &language("pt")).unwrap();
    assert_eq!(sermons.source, DataSource::Static);
    assert_eq!(sermons.items, fallback_sermons(Some("pt")));
    assert!(!sermons.items.is_empty());

    let events = list_schedule_events(&mut persistence, &LanguageQuery::default()).unwrap();
    assert_eq!(events.source, DataSource::Static);
    assert_eq!(events.items, fallback_schedule_events(None));

    drop(persistence);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
