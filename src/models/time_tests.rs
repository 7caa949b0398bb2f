use proptest::prelude::*;

use super::time::{TimeError, TimeOfDay, TimeSlot, Weekday};

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(day, t(start), t(end)).unwrap()
}

#[test]
fn parse_accepts_wire_form() {
    let time = t("09:30:15");
    assert_eq!(time.to_string(), "09:30:15");
    assert_eq!(time.short(), "09:30");
}

#[test]
fn parse_rejects_malformed_strings() {
    for bad in ["", "09:30", "25:00:00", "09:61:00", "nine", "09:00:00Z"] {
        assert!(
            matches!(TimeOfDay::parse(bad), Err(TimeError::InvalidTime(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn ordering_is_by_hms_triple() {
    assert!(t("08:59:59") < t("09:00:00"));
    assert!(t("09:00:00") < t("09:00:01"));
    assert_eq!(t("12:00:00"), t("12:00:00"));
}

#[test]
fn seconds_precision_is_preserved() {
    // A truncating "HH:MM" comparison would call these equal.
    assert_ne!(t("09:00:00"), t("09:00:30"));
    assert!(t("09:00:00") < t("09:00:30"));
}

#[test]
fn time_of_day_serde_round_trip() {
    let json = serde_json::to_string(&t("14:05:00")).unwrap();
    assert_eq!(json, "\"14:05:00\"");
    let back: TimeOfDay = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t("14:05:00"));
}

#[test]
fn weekday_convention_is_sunday_zero() {
    assert_eq!(Weekday::Sunday.number(), 0);
    assert_eq!(Weekday::Monday.number(), 1);
    assert_eq!(Weekday::Saturday.number(), 6);
    assert_eq!(Weekday::try_from(0).unwrap(), Weekday::Sunday);
    assert_eq!(Weekday::try_from(6).unwrap(), Weekday::Saturday);
}

#[test]
fn weekday_rejects_out_of_range() {
    assert_eq!(Weekday::try_from(7), Err(TimeError::InvalidDay(7)));
    let parsed: Result<Weekday, _> = serde_json::from_str("9");
    assert!(parsed.is_err());
}

#[test]
fn weekday_serde_uses_numbers() {
    assert_eq!(serde_json::to_string(&Weekday::Tuesday).unwrap(), "2");
    let day: Weekday = serde_json::from_str("5").unwrap();
    assert_eq!(day, Weekday::Friday);
}

#[test]
fn slot_rejects_empty_or_inverted_range() {
    let at = t("10:00:00");
    assert!(matches!(
        TimeSlot::new(Weekday::Monday, at, at),
        Err(TimeError::EmptyRange { .. })
    ));
    assert!(matches!(
        TimeSlot::new(Weekday::Monday, t("11:00:00"), t("10:00:00")),
        Err(TimeError::EmptyRange { .. })
    ));
}

#[test]
fn slot_deserialization_enforces_range() {
    let inverted = serde_json::json!({
        "day": 1,
        "start": "11:00:00",
        "end": "10:00:00"
    });
    assert!(serde_json::from_value::<TimeSlot>(inverted).is_err());

    let valid = serde_json::json!({
        "day": 1,
        "start": "09:00:00",
        "end": "10:00:00"
    });
    let slot: TimeSlot = serde_json::from_value(valid).unwrap();
    assert_eq!(slot.day(), Weekday::Monday);
}

#[test]
fn touching_boundaries_do_not_overlap() {
    let morning = slot(Weekday::Monday, "09:00:00", "10:00:00");
    let next = slot(Weekday::Monday, "10:00:00", "11:00:00");
    assert!(!morning.overlaps(&next));
    assert!(!next.overlaps(&morning));
}

#[test]
fn identical_slots_overlap() {
    let a = slot(Weekday::Monday, "09:00:00", "10:00:00");
    assert!(a.overlaps(&a));
}

#[test]
fn partial_overlap_from_either_side() {
    let existing = slot(Weekday::Monday, "09:00:00", "11:00:00");
    assert!(existing.overlaps(&slot(Weekday::Monday, "10:00:00", "12:00:00")));
    assert!(existing.overlaps(&slot(Weekday::Monday, "08:00:00", "09:30:00")));
}

#[test]
fn containment_overlaps_both_directions() {
    let outer = slot(Weekday::Monday, "09:00:00", "12:00:00");
    let inner = slot(Weekday::Monday, "10:00:00", "11:00:00");
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn different_days_never_overlap() {
    let monday = slot(Weekday::Monday, "09:00:00", "10:00:00");
    let tuesday = slot(Weekday::Tuesday, "09:00:00", "10:00:00");
    assert!(!monday.overlaps(&tuesday));
}

#[test]
fn one_second_overlap_counts() {
    let a = slot(Weekday::Friday, "09:00:00", "10:00:01");
    let b = slot(Weekday::Friday, "10:00:00", "11:00:00");
    assert!(a.overlaps(&b));
}

fn monday_slot() -> impl Strategy<Value = TimeSlot> {
    (0u32..86399).prop_flat_map(|start| {
        ((start + 1)..86400).prop_map(move |end| {
            TimeSlot::new(
                Weekday::Monday,
                TimeOfDay::from_seconds(start).unwrap(),
                TimeOfDay::from_seconds(end).unwrap(),
            )
            .unwrap()
        })
    })
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in monday_slot(), b in monday_slot()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn overlap_matches_interval_arithmetic(a in monday_slot(), b in monday_slot()) {
        // Half-open intervals share an instant iff max(start) < min(end).
        let expected = a.start().max(b.start()) < a.end().min(b.end());
        prop_assert_eq!(a.overlaps(&b), expected);
    }
}
