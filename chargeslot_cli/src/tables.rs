use chargeslot_booking::{
    booking::{Booking, history::HistoryEntry},
    settings::SlotSettings,
    slot::time_window::TimeWindow,
};
use comfy_table::{Table, presets::UTF8_FULL};
use jiff::Timestamp;

fn format_instant(timestamp: Timestamp, settings: &SlotSettings) -> String {
    settings
        .time_zone
        .to_datetime(timestamp)
        .strftime("%Y-%m-%d %H:%M")
        .to_string()
}

fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

pub fn slots_table<'a>(slots: impl Iterator<Item = (&'a TimeWindow, bool)>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Slot", "Status"]);

    for (slot, available) in slots {
        table.add_row(vec![
            slot.label(),
            if available { "available" } else { "booked" },
        ]);
    }

    table
}

pub fn bookings_table(bookings: &[Booking], settings: &SlotSettings) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Cabinet", "User", "Start", "End"]);

    for booking in bookings {
        table.add_row(vec![
            format_optional(booking.id),
            format_optional(booking.resource_id),
            booking
                .user_name
                .clone()
                .unwrap_or_else(|| format_optional(booking.user_id)),
            format_instant(booking.start, settings),
            format_instant(booking.end, settings),
        ]);
    }

    table
}

pub fn history_table(entries: &[HistoryEntry], settings: &SlotSettings) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Cabinet", "Start", "End", "Status"]);

    for entry in entries {
        table.add_row(vec![
            format_optional(entry.booking.id),
            format_optional(entry.booking.resource_id),
            format_instant(entry.booking.start, settings),
            format_instant(entry.booking.end, settings),
            entry.status.to_string(),
        ]);
    }

    table
}
