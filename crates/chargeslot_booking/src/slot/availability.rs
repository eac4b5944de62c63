use jiff::civil::Date;
use tracing::debug;

use crate::{booking::Booking, settings::SlotSettings, slot::interval::CivilInterval};

use super::{catalog::SlotCatalog, time_window::TimeWindow};

/// Returns the catalog windows on `date` that no booking overlaps, in catalog
/// order.
///
/// `bookings` must already be scoped to one resource and one date. Without a
/// date or without bookings every window is considered free.
pub fn available_slots<'a>(
    catalog: &'a SlotCatalog,
    date: Option<Date>,
    bookings: &[Booking],
    settings: &SlotSettings,
) -> Vec<&'a TimeWindow> {
    let Some(date) = date else {
        return catalog.iter().collect();
    };

    if bookings.is_empty() {
        return catalog.iter().collect();
    }

    let booked = bookings
        .iter()
        .map(|booking| booking.civil_interval(&settings.time_zone))
        .collect::<Vec<CivilInterval>>();

    let available = catalog
        .iter()
        .filter(|window| {
            let interval = window.interval_on(date, settings.rollover);
            !booked.iter().any(|booking| interval.overlaps(booking))
        })
        .collect::<Vec<_>>();

    debug!(
        %date,
        bookings = bookings.len(),
        available = available.len(),
        "Computed available slots"
    );

    available
}

#[cfg(test)]
mod tests {
    use jiff::{
        Timestamp,
        civil::{Date, date},
        tz::{self, TimeZone},
    };

    use crate::{
        booking::{Booking, ResourceId},
        slot::time_window::MidnightRollover,
    };

    use super::*;

    fn utc_settings(rollover: MidnightRollover) -> SlotSettings {
        SlotSettings {
            time_zone: TimeZone::UTC,
            rollover,
        }
    }

    fn booking(start: &str, end: &str) -> Booking {
        Booking::new(
            start.parse::<Timestamp>().unwrap(),
            end.parse::<Timestamp>().unwrap(),
        )
        .with_resource(ResourceId::new(5))
    }

    fn labels(windows: &[&TimeWindow]) -> Vec<String> {
        windows
            .iter()
            .map(|window| window.label().to_owned())
            .collect()
    }

    fn all_labels(catalog: &SlotCatalog) -> Vec<String> {
        catalog
            .iter()
            .map(|window| window.label().to_owned())
            .collect()
    }

    const DAY: Date = date(2024, 6, 1);

    #[test]
    fn test_empty_bookings_returns_catalog() {
        let catalog = SlotCatalog::standard();
        let available = available_slots(
            &catalog,
            Some(DAY),
            &[],
            &utc_settings(MidnightRollover::NextDay),
        );

        assert_eq!(labels(&available), all_labels(&catalog));
    }

    #[test]
    fn test_missing_date_returns_catalog() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T09:00:00Z", "2024-06-01T12:00:00Z")];
        let available = available_slots(
            &catalog,
            None,
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        );

        assert_eq!(available.len(), 8);
    }

    #[test]
    fn test_full_day_booking_blocks_everything() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T00:00:00Z", "2024-06-02T00:00:00Z")];
        let available = available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        );

        assert!(available.is_empty());
    }

    #[test]
    fn test_full_day_booking_with_same_day_rollover_keeps_late_window() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T00:00:00Z", "2024-06-02T00:00:00Z")];
        let available = available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::SameDay),
        );

        assert_eq!(labels(&available), vec!["21:00 - 00:00"]);
    }

    #[test]
    fn test_touching_boundaries_are_not_overlaps() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T09:00:00Z", "2024-06-01T12:00:00Z")];
        let available = labels(&available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        ));

        assert!(available.contains(&"06:00 - 09:00".to_owned()));
        assert!(available.contains(&"12:00 - 15:00".to_owned()));
        assert!(!available.contains(&"09:00 - 12:00".to_owned()));
    }

    #[test]
    fn test_partial_overlap_excludes_window() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T10:00:00Z", "2024-06-01T11:00:00Z")];
        let available = labels(&available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        ));

        assert_eq!(available.len(), 7);
        assert!(!available.contains(&"09:00 - 12:00".to_owned()));
    }

    #[test]
    fn test_booking_straddling_two_windows_excludes_both() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T14:00:00Z", "2024-06-01T16:00:00Z")];
        let available = labels(&available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        ));

        assert_eq!(
            available,
            vec![
                "06:00 - 09:00",
                "09:00 - 12:00",
                "18:00 - 21:00",
                "21:00 - 00:00",
                "00:00 - 03:00",
                "03:00 - 06:00",
            ]
        );
    }

    #[test]
    fn test_output_is_ordered_subsequence_of_catalog() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![
            booking("2024-06-01T03:00:00Z", "2024-06-01T06:00:00Z"),
            booking("2024-06-01T18:30:00Z", "2024-06-01T19:00:00Z"),
            booking("2024-06-01T07:00:00Z", "2024-06-01T08:00:00Z"),
        ];
        let available = labels(&available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        ));

        let catalog_labels = all_labels(&catalog);
        let positions = available
            .iter()
            .map(|label| catalog_labels.iter().position(|l| l == label).unwrap())
            .collect::<Vec<_>>();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(
            available,
            vec![
                "09:00 - 12:00",
                "12:00 - 15:00",
                "15:00 - 18:00",
                "21:00 - 00:00",
                "00:00 - 03:00",
            ]
        );
    }

    #[test]
    fn test_late_booking_crossing_midnight() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T23:00:00Z", "2024-06-02T01:00:00Z")];

        let next_day = labels(&available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        ));
        assert!(!next_day.contains(&"21:00 - 00:00".to_owned()));

        let same_day = labels(&available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::SameDay),
        ));
        assert!(same_day.contains(&"21:00 - 00:00".to_owned()));
    }

    #[test]
    fn test_bookings_compared_in_station_time_zone() {
        let catalog = SlotCatalog::standard();
        // 02:00Z is 09:00 in a +07:00 station.
        let bookings = vec![booking("2024-06-01T02:00:00Z", "2024-06-01T05:00:00Z")];
        let settings = SlotSettings {
            time_zone: TimeZone::fixed(tz::offset(7)),
            rollover: MidnightRollover::NextDay,
        };

        let available = labels(&available_slots(&catalog, Some(DAY), &bookings, &settings));

        assert_eq!(available.len(), 7);
        assert!(!available.contains(&"09:00 - 12:00".to_owned()));
    }

    #[test]
    fn test_scenario_single_morning_booking() {
        let catalog = SlotCatalog::standard();
        let bookings = vec![booking("2024-06-01T09:00:00Z", "2024-06-01T12:00:00Z")];
        let available = labels(&available_slots(
            &catalog,
            Some(DAY),
            &bookings,
            &utc_settings(MidnightRollover::NextDay),
        ));

        assert_eq!(
            available,
            vec![
                "06:00 - 09:00",
                "12:00 - 15:00",
                "15:00 - 18:00",
                "18:00 - 21:00",
                "21:00 - 00:00",
                "00:00 - 03:00",
                "03:00 - 06:00",
            ]
        );
    }

    #[test]
    fn test_booking_from_previous_evening_blocks_early_window() {
        let catalog = SlotCatalog::standard();
        let available = available_slots(
            &catalog,
            Some(DAY),
            &[booking("2024-05-31T23:00:00Z", "2024-06-01T02:00:00Z")],
            &utc_settings(MidnightRollover::NextDay),
        );

        assert_eq!(available.len(), 7);
        assert!(!labels(&available).contains(&String::from("00:00 - 03:00")));
    }
}
