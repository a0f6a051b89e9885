use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::price_level::PriceLevel, ics::CalendarEvent};

#[must_use]
pub fn build_events_table(events: &[CalendarEvent]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Start", "End", "Rate", "Level"]);
    for event in events {
        table.add_row(vec![
            Cell::new(&event.interval.start),
            Cell::new(&event.interval.end).add_attribute(Attribute::Dim),
            Cell::new(&event.summary).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:?}", event.price_level)).fg(match event.price_level {
                PriceLevel::Negative => Color::Blue,
                PriceLevel::Cheap => Color::Green,
                PriceLevel::Moderate => Color::DarkYellow,
                PriceLevel::Expensive => Color::Red,
                PriceLevel::VeryExpensive => Color::Magenta,
            }),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use chrono_tz::Tz;

    use super::*;
    use crate::{
        api::octopus::UnitRate,
        ics::uid::UidGenerator,
        prelude::*,
        quantity::PencePerKilowattHour,
    };

    #[test]
    fn build_events_table_ok() -> Result {
        let unit_rate = UnitRate {
            valid_from: "2024-03-01T00:00:00Z".parse()?,
            valid_to: "2024-03-01T00:30:00Z".parse()?,
            value: PencePerKilowattHour(-1.5),
        };
        let event = CalendarEvent::from_unit_rate(
            &unit_rate,
            unit_rate.interval().to_floating(Tz::Europe__London),
            &mut UidGenerator::default(),
            unit_rate.valid_from,
        );
        let table = build_events_table(&[event]);
        assert_eq!(table.row_count(), 1);
        let rendered = table.to_string();
        assert!(rendered.contains("20240301T000000"));
        assert!(rendered.contains("Negative"));
        Ok(())
    }
}
