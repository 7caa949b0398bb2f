//! Unit tests for the conflict detector and mutation orchestrator.

use std::sync::Arc;

use crate::api::{ClassId, EntryId, SubjectId, TeacherId};
use crate::db::repositories::LocalRepository;
use crate::db::repository::DirectoryRepository;
use crate::models::{EntryFields, EntryPatch, TimeOfDay, TimeSlot, Weekday};
use crate::scheduler::{ConflictReport, EditAccess, ScheduleError, TimetableService};

struct Seed {
    class_a: ClassId,
    class_b: ClassId,
    teacher_t: TeacherId,
    teacher_y: TeacherId,
    math: SubjectId,
    science: SubjectId,
    english: SubjectId,
    history: SubjectId,
}

async fn setup() -> (LocalRepository, TimetableService, Seed) {
    let repo = LocalRepository::new();
    let service = TimetableService::new(Arc::new(repo.clone()));

    let seed = Seed {
        class_a: repo.create_class("Class A").await.unwrap().id,
        class_b: repo.create_class("Class B").await.unwrap().id,
        teacher_t: repo.create_teacher("T. Okafor").await.unwrap().id,
        teacher_y: repo.create_teacher("Y. Lindqvist").await.unwrap().id,
        math: repo.create_subject("Math").await.unwrap().id,
        science: repo.create_subject("Science").await.unwrap().id,
        english: repo.create_subject("English").await.unwrap().id,
        history: repo.create_subject("History").await.unwrap().id,
    };

    (repo, service, seed)
}

fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(
        day,
        TimeOfDay::parse(start).unwrap(),
        TimeOfDay::parse(end).unwrap(),
    )
    .unwrap()
}

fn fields(class: ClassId, teacher: TeacherId, subject: SubjectId, slot: TimeSlot) -> EntryFields {
    EntryFields {
        class_id: class,
        teacher_id: teacher,
        subject_id: subject,
        slot,
    }
}

fn expect_conflict(err: ScheduleError) -> ConflictReport {
    match err {
        ScheduleError::Conflict(report) => report,
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn create_assigns_sequential_ids() {
    let (_repo, service, s) = setup().await;

    let first = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();
    let second = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.science,
                slot(Weekday::Tuesday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();

    assert_eq!(first.id, EntryId::new(1));
    assert_eq!(second.id, EntryId::new(2));
}

#[tokio::test]
async fn exact_duplicate_slot_is_a_teacher_conflict() {
    let (_repo, service, s) = setup().await;
    let monday = slot(Weekday::Monday, "09:00:00", "10:00:00");

    service
        .create_entry(
            EditAccess::granted(),
            fields(s.class_a, s.teacher_t, s.math, monday),
        )
        .await
        .unwrap();

    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(s.class_b, s.teacher_t, s.math, monday),
        )
        .await
        .unwrap_err();

    let report = expect_conflict(err);
    assert!(matches!(report, ConflictReport::Teacher { .. }));
    let details = report.details();
    assert_eq!(
        details,
        "Teacher already assigned to Class A for Math from 09:00 to 10:00"
    );
}

#[tokio::test]
async fn overlapping_proposal_is_rejected_with_teacher_details() {
    // Teacher T has Monday 09:00-10:00 with Class A / Math. Proposing
    // Monday 09:30-10:30 for Class B must name the existing booking.
    let (_repo, service, s) = setup().await;

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();

    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_b,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:30:00", "10:30:00"),
            ),
        )
        .await
        .unwrap_err();

    let details = expect_conflict(err).details();
    assert!(details.contains("Class A"));
    assert!(details.contains("Math"));
    assert!(details.contains("09:00"));
    assert!(details.contains("10:00"));
}

#[tokio::test]
async fn partial_overlap_conflicts_from_both_sides() {
    let (_repo, service, s) = setup().await;

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "11:00:00"),
            ),
        )
        .await
        .unwrap();

    for (start, end) in [("10:00:00", "12:00:00"), ("08:00:00", "09:30:00")] {
        let err = service
            .create_entry(
                EditAccess::granted(),
                fields(
                    s.class_b,
                    s.teacher_t,
                    s.science,
                    slot(Weekday::Monday, start, end),
                ),
            )
            .await
            .unwrap_err();
        expect_conflict(err);
    }
}

#[tokio::test]
async fn containment_conflicts_both_directions() {
    let (repo, service, s) = setup().await;

    let outer = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "12:00:00"),
            ),
        )
        .await
        .unwrap();

    // Proposed inside existing.
    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_b,
                s.teacher_t,
                s.science,
                slot(Weekday::Monday, "10:00:00", "11:00:00"),
            ),
        )
        .await
        .unwrap_err();
    expect_conflict(err);

    // Proposed containing existing.
    service
        .delete_entry(EditAccess::granted(), outer.id)
        .await
        .unwrap();
    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "10:00:00", "11:00:00"),
            ),
        )
        .await
        .unwrap();
    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_b,
                s.teacher_t,
                s.science,
                slot(Weekday::Monday, "09:00:00", "12:00:00"),
            ),
        )
        .await
        .unwrap_err();
    expect_conflict(err);

    assert_eq!(repo.entry_count(), 1);
}

#[tokio::test]
async fn touching_boundary_is_not_a_conflict() {
    // Same class, same teacher, same day: 10:00-11:00 directly after
    // 09:00-10:00 must be accepted.
    let (_repo, service, s) = setup().await;

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();

    let entry = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.science,
                slot(Weekday::Monday, "10:00:00", "11:00:00"),
            ),
        )
        .await
        .unwrap();
    assert_eq!(entry.subject_id, s.science);
}

#[tokio::test]
async fn same_time_on_a_different_day_is_clear() {
    let (_repo, service, s) = setup().await;
    let times = ("09:00:00", "10:00:00");

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, times.0, times.1),
            ),
        )
        .await
        .unwrap();

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Wednesday, times.0, times.1),
            ),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn class_conflict_fires_when_teachers_differ() {
    // Class A already has Tuesday 08:00-09:00 English with teacher Y.
    // A different teacher proposing History at 08:30-09:30 for the same
    // class trips the class-scope check.
    let (_repo, service, s) = setup().await;

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_y,
                s.english,
                slot(Weekday::Tuesday, "08:00:00", "09:00:00"),
            ),
        )
        .await
        .unwrap();

    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.history,
                slot(Weekday::Tuesday, "08:30:00", "09:30:00"),
            ),
        )
        .await
        .unwrap_err();

    let report = expect_conflict(err);
    assert!(matches!(report, ConflictReport::Class { .. }));
    let details = report.details();
    assert_eq!(
        details,
        "Class already scheduled for English with Y. Lindqvist from 08:00 to 09:00"
    );
}

#[tokio::test]
async fn teacher_conflict_wins_over_class_conflict() {
    // Same teacher AND same class overlap: only the teacher conflict is
    // surfaced, the detector does not aggregate.
    let (_repo, service, s) = setup().await;

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();

    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.science,
                slot(Weekday::Monday, "09:30:00", "10:30:00"),
            ),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        expect_conflict(err),
        ConflictReport::Teacher { .. }
    ));
}

#[tokio::test]
async fn every_entry_in_scope_is_examined() {
    // The first entry retrieved for (teacher, day) does not overlap; a
    // later one does. A scan that stops early would wrongly report "clear".
    let (_repo, service, s) = setup().await;

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "08:00:00", "09:00:00"),
            ),
        )
        .await
        .unwrap();
    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.science,
                slot(Weekday::Monday, "10:00:00", "11:00:00"),
            ),
        )
        .await
        .unwrap();

    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_b,
                s.teacher_t,
                s.history,
                slot(Weekday::Monday, "10:30:00", "11:30:00"),
            ),
        )
        .await
        .unwrap_err();
    expect_conflict(err);
}

#[tokio::test]
async fn update_excludes_the_entry_itself() {
    let (_repo, service, s) = setup().await;

    let entry = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();

    // Changing only the subject keeps day/time/teacher identical to the
    // stored row; without self-exclusion this would be a false conflict.
    let updated = service
        .update_entry(
            EditAccess::granted(),
            entry.id,
            EntryPatch {
                subject_id: Some(s.science),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.subject_id, s.science);
    assert_eq!(updated.slot, entry.slot);
}

#[tokio::test]
async fn update_checks_the_merged_entry() {
    let (_repo, service, s) = setup().await;

    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();
    let second = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_b,
                s.teacher_t,
                s.science,
                slot(Weekday::Monday, "11:00:00", "12:00:00"),
            ),
        )
        .await
        .unwrap();

    // Moving the second entry onto the first teacher booking must fail.
    let err = service
        .update_entry(
            EditAccess::granted(),
            second.id,
            EntryPatch {
                start: Some(TimeOfDay::parse("09:30:00").unwrap()),
                end: Some(TimeOfDay::parse("10:30:00").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    expect_conflict(err);

    // The failed update left the entry untouched.
    let unchanged = service.get_entry(second.id).await.unwrap();
    assert_eq!(unchanged.slot, slot(Weekday::Monday, "11:00:00", "12:00:00"));
}

#[tokio::test]
async fn update_rejects_merged_inverted_range() {
    let (_repo, service, s) = setup().await;

    let entry = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();

    // Patching only the start past the stored end empties the range.
    let err = service
        .update_entry(
            EditAccess::granted(),
            entry.id,
            EntryPatch {
                start: Some(TimeOfDay::parse("10:30:00").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
}

#[tokio::test]
async fn update_of_missing_entry_is_not_found() {
    let (_repo, service, s) = setup().await;

    let err = service
        .update_entry(
            EditAccess::granted(),
            EntryId::new(99),
            EntryPatch {
                subject_id: Some(s.math),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NotFound(_)));
}

#[tokio::test]
async fn dangling_references_are_not_found() {
    let (repo, service, s) = setup().await;

    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                ClassId::new(999),
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NotFound(_)));
    assert_eq!(repo.entry_count(), 0);
}

#[tokio::test]
async fn failed_create_leaves_store_unchanged() {
    let (repo, service, s) = setup().await;
    let monday = slot(Weekday::Monday, "09:00:00", "10:00:00");

    service
        .create_entry(
            EditAccess::granted(),
            fields(s.class_a, s.teacher_t, s.math, monday),
        )
        .await
        .unwrap();
    assert_eq!(repo.entry_count(), 1);

    let conflicting = service
        .create_entry(
            EditAccess::granted(),
            fields(s.class_b, s.teacher_t, s.science, monday),
        )
        .await;
    assert!(conflicting.is_err());
    assert_eq!(repo.entry_count(), 1);
}

#[tokio::test]
async fn mutations_require_edit_access() {
    let (repo, service, s) = setup().await;
    let monday = slot(Weekday::Monday, "09:00:00", "10:00:00");

    let err = service
        .create_entry(
            EditAccess::denied(),
            fields(s.class_a, s.teacher_t, s.math, monday),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Forbidden));
    assert_eq!(repo.entry_count(), 0);

    let entry = service
        .create_entry(
            EditAccess::granted(),
            fields(s.class_a, s.teacher_t, s.math, monday),
        )
        .await
        .unwrap();

    let err = service
        .update_entry(
            EditAccess::denied(),
            entry.id,
            EntryPatch {
                subject_id: Some(s.science),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Forbidden));

    let err = service
        .delete_entry(EditAccess::denied(), entry.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Forbidden));
    assert_eq!(repo.entry_count(), 1);
}

#[tokio::test]
async fn delete_is_not_idempotent() {
    let (_repo, service, s) = setup().await;

    let entry = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();

    service
        .delete_entry(EditAccess::granted(), entry.id)
        .await
        .unwrap();
    let err = service
        .delete_entry(EditAccess::granted(), entry.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NotFound(_)));
}

#[tokio::test]
async fn unhealthy_store_surfaces_as_store_unavailable() {
    let (repo, service, s) = setup().await;
    repo.set_healthy(false);

    let err = service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::StoreUnavailable(_)));

    // Transient failure: the same request succeeds once the store is back.
    repo.set_healthy(true);
    service
        .create_entry(
            EditAccess::granted(),
            fields(
                s.class_a,
                s.teacher_t,
                s.math,
                slot(Weekday::Monday, "09:00:00", "10:00:00"),
            ),
        )
        .await
        .unwrap();
}
