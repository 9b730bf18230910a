use cancha_booking::data::booking::BookingFlow;
use cancha_booking::data::courts::CourtCatalog;
use cancha_booking::data::payment::PaymentForm;
use cancha_booking::data::selection::{SelectionError, SelectionRules, SlotSelection};
use cancha_booking::data::shared_booking::{AvailabilityMap, DaySchedule};
use cancha_booking::settings::Settings;
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

struct Day {
    schedule: DaySchedule,
    availability: AvailabilityMap,
    rules: SelectionRules,
}

impl Day {
    fn clicks(&self, labels: &[&str]) -> (SlotSelection, Option<SelectionError>) {
        labels
            .iter()
            .fold((SlotSelection::empty(), None), |(selection, _), label| {
                selection.click(&self.schedule, &self.availability, self.rules, label)
            })
    }

    fn range_of(&self, selection: SlotSelection) -> Option<String> {
        selection.time_range(&self.schedule)
    }
}

#[fixture]
fn hourly_day() -> Day {
    let settings = Settings::default();
    let schedule = settings.day_schedule().unwrap();
    Day {
        availability: settings.mock_availability(&schedule),
        rules: settings.selection_rules(&schedule),
        schedule,
    }
}

#[fixture]
fn half_hour_day() -> Day {
    let schedule = DaySchedule::from_labels("09:00", "16:00", 30).unwrap();
    Day {
        availability: AvailabilityMap::from_occupied(&schedule, ["11:00"]),
        rules: SelectionRules::for_schedule(&schedule, 60),
        schedule,
    }
}

#[rstest]
#[case(&["09:00"], Some("09:00 - 10:00"))]
#[case(&["13:00", "14:00"], Some("13:00 - 15:00"))]
#[case(&["14:00", "13:00"], Some("13:00 - 15:00"))]
#[case(&["22:00"], Some("22:00 - 23:00"))]
#[case(&["13:00", "22:00"], Some("13:00 - 23:00"))]
#[case(&["13:00", "13:00"], None)]
fn hourly_clicks_commit_expected_ranges(
    hourly_day: Day,
    #[case] labels: &[&str],
    #[case] expected: Option<&str>,
) {
    let (selection, error) = hourly_day.clicks(labels);
    assert_eq!(error, None);
    assert_eq!(hourly_day.range_of(selection).as_deref(), expected);
}

#[rstest]
#[case(&["09:00", "13:00"], "range includes an occupied slot")]
#[case(&["10:00"], "slot unavailable")]
#[case(&["13:00", "12:00"], "slot unavailable")]
#[case(&["23:00"], "slot unavailable")]
#[case(&["07:00"], "slot unavailable")]
fn hourly_rejections_clear_the_selection(
    hourly_day: Day,
    #[case] labels: &[&str],
    #[case] message: &str,
) {
    let (selection, error) = hourly_day.clicks(labels);
    assert!(selection.is_empty());
    let view = selection.view(&hourly_day.schedule, error.as_ref());
    assert_eq!(view.error_message.as_deref(), Some(message));
}

#[rstest]
fn half_hour_first_click_takes_the_minimum_block(half_hour_day: Day) {
    let (selection, error) = half_hour_day.clicks(&["09:00"]);
    assert_eq!(error, None);
    assert_eq!(selection.duration_units(), 2);
    assert_eq!(half_hour_day.range_of(selection).as_deref(), Some("09:00 - 10:00"));
}

#[rstest]
fn half_hour_block_before_occupied_slot_is_rejected(half_hour_day: Day) {
    let (selection, error) = half_hour_day.clicks(&["10:30"]);
    assert!(selection.is_empty());
    assert!(matches!(error, Some(SelectionError::IncludesOccupied { label }) if label == "11:00"));
}

#[rstest]
fn half_hour_last_slot_cannot_open_a_block(half_hour_day: Day) {
    let (selection, error) = half_hour_day.clicks(&["15:30"]);
    assert!(selection.is_empty());
    assert!(matches!(error, Some(SelectionError::ExceedsClosingTime { .. })));
}

#[rstest]
fn span_shorter_than_minimum_block_is_rejected(half_hour_day: Day) {
    let day = Day {
        rules: SelectionRules::for_schedule(&half_hour_day.schedule, 90),
        ..half_hour_day
    };
    let (selection, error) = day.clicks(&["13:00", "13:30"]);
    assert!(selection.is_empty());
    assert_eq!(
        error,
        Some(SelectionError::BelowMinimumBlock {
            required: 3,
            selected: 2,
        })
    );
}

#[rstest]
fn every_click_pair_matches_the_availability_map(hourly_day: Day) {
    let day = &hourly_day;
    let slots = day.schedule.slots().len();
    let free = |position: usize| {
        day.schedule.successor(position).is_some()
            && day
                .schedule
                .label_at(position)
                .is_some_and(|label| day.availability.is_available(&label))
    };

    let mut committed = 0;
    let mut rejected = 0;
    for a in 0..slots {
        let first = day.schedule.label_at(a).unwrap();
        let (after_first, first_error) = day.clicks(&[first.as_str()]);
        if !free(a) {
            assert!(after_first.is_empty(), "{first} opened a selection");
            assert_eq!(
                first_error,
                Some(SelectionError::SlotUnavailable { label: first.clone() })
            );
            continue;
        }
        assert_eq!(first_error, None);
        assert_eq!(after_first.range().map(|r| (r.start, r.end)), Some((a, a + 1)));

        for b in 0..slots {
            let second = day.schedule.label_at(b).unwrap();
            let (selection, error) = day.clicks(&[first.as_str(), second.as_str()]);

            if b == a {
                assert!(selection.is_empty(), "{first} twice did not toggle off");
                assert_eq!(error, None);
            } else if !free(b) {
                assert!(selection.is_empty());
                assert_eq!(error, Some(SelectionError::SlotUnavailable { label: second }));
                rejected += 1;
            } else if (a.min(b)..=a.max(b)).all(free) {
                assert_eq!(error, None, "{first} then {second}");
                let range = selection.range().unwrap();
                assert_eq!((range.start, range.end), (a.min(b), a.max(b) + 1));
                committed += 1;
            } else {
                assert!(selection.is_empty(), "{first} then {second} kept a selection");
                assert!(
                    matches!(error, Some(SelectionError::IncludesOccupied { .. })),
                    "{first} then {second} gave {error:?}"
                );
                rejected += 1;
            }
        }
    }
    assert!(committed > 0 && rejected > 0);
}

#[rstest]
fn confirmed_selection_pays_through_the_flow(hourly_day: Day) {
    let catalog = CourtCatalog::bundled().unwrap();
    let court = catalog.get(2).cloned().unwrap();
    let (selection, _) = hourly_day.clicks(&["13:00", "14:00"]);

    let request = selection
        .confirm(&hourly_day.schedule, court.price_per_hour)
        .unwrap();
    assert_eq!(request.derived_price, Decimal::new(16000, 2));

    let mut flow = BookingFlow::default();
    flow.choose_court(court);
    flow.choose_date(NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());
    let summary = flow.confirm_reservation(&request).unwrap().clone();
    assert_eq!(summary.time_range, "13:00 - 15:00");

    let form = PaymentForm {
        card_number: "4111111111111234".into(),
        expiry_date: "08/27".into(),
        cvv: "123".into(),
        full_name: "Lucía Fernández".into(),
        document_id: "45678912".into(),
        email: "lucia@correo.pe".into(),
        phone: "987654321".into(),
    };
    let receipt = flow.pay(&form).unwrap();
    assert_eq!(receipt.reservation_number, summary.reservation_number);
    assert_eq!(receipt.method, "Credit card (**** 1234)");
    assert_eq!(receipt.operation.len(), 12);
}
