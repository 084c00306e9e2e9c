use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        advice::{Advice, Outcome},
        optimizer::Recommendation,
        table::HOURS_PER_DAY,
        verdict::Verdict,
    },
    quantity::price::KilowattHourPrice,
};

const BAR_WIDTH: f64 = 32.0;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Hourly prices of the day as a bar chart, with the current hour and the best window marked.
#[must_use]
pub fn build_price_table(advice: &Advice, currency: &str) -> Table {
    let mean_price = advice.table.mean().unwrap_or(KilowattHourPrice::ZERO);
    let max_price = advice.table.max().unwrap_or(KilowattHourPrice::ZERO);
    let best_window = match &advice.outcome {
        Outcome::Recommended { recommendation, verdict: Verdict::Wait { .. } } => {
            Some(recommendation.best.start_hour..recommendation.best.end_hour)
        }
        _ => None,
    };

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Hour"),
        Cell::new(format!("Price, {currency}")),
        Cell::new(""),
        Cell::new(""),
    ]);
    for hour in 0..HOURS_PER_DAY {
        let is_past = hour < advice.current_hour;
        let is_best = best_window.as_ref().is_some_and(|window| window.contains(&hour));

        let mut markers = Vec::new();
        if hour == advice.current_hour {
            markers.push("◀ now");
        }
        if is_best {
            markers.push("★ best");
        }

        let mut hour_cell = Cell::new(format!("{hour:02}:00"));
        if is_past {
            hour_cell = hour_cell.add_attribute(Attribute::Dim);
        }
        let (price_cell, bar_cell) = advice.table.get(hour).map_or_else(
            || (Cell::new("—").add_attribute(Attribute::Dim), Cell::new("")),
            |price| {
                let color = if price >= mean_price { Color::Red } else { Color::Green };
                (
                    Cell::new(price).fg(color).set_alignment(CellAlignment::Right),
                    Cell::new(bar(price, max_price)).fg(color),
                )
            },
        );
        table.add_row(vec![
            hour_cell,
            price_cell,
            bar_cell,
            Cell::new(markers.join(" ")).fg(if is_best { Color::Green } else { Color::Reset }),
        ]);
    }
    table
}

fn bar(price: KilowattHourPrice, max_price: KilowattHourPrice) -> String {
    if max_price <= KilowattHourPrice::ZERO || price <= KilowattHourPrice::ZERO {
        return String::new();
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let width = (price.0 / max_price.0 * BAR_WIDTH).round() as usize;
    "█".repeat(width.max(1))
}

/// Costs of running now and at the best hour, savings, and their fuel equivalent.
#[must_use]
pub fn build_summary_table(recommendation: &Recommendation, currency: &str) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Start", "Mean price", "Cost"]);
    table.add_row(vec![
        Cell::new("Now"),
        Cell::new(format!("{:02}:00", recommendation.now.start_hour)),
        Cell::new(recommendation.now.mean_price).set_alignment(CellAlignment::Right),
        Cell::new(format!("{} {currency}", recommendation.cost_now))
            .fg(Color::Red)
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Best"),
        Cell::new(format!("{:02}:00", recommendation.best_hour)),
        Cell::new(recommendation.best.mean_price).set_alignment(CellAlignment::Right),
        Cell::new(format!("{} {currency}", recommendation.cost_best))
            .fg(Color::Green)
            .set_alignment(CellAlignment::Right),
    ]);
    if recommendation.is_beneficial {
        table.add_row(vec![
            Cell::new("Savings"),
            Cell::new(""),
            Cell::new(format!("{}, {}", recommendation.fuel_liters, recommendation.distance_km))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{} {currency}", recommendation.savings))
                .fg(Color::Green)
                .set_alignment(CellAlignment::Right),
        ]);
    } else {
        table.add_row(vec![
            Cell::new("Savings"),
            Cell::new(""),
            Cell::new("no benefit").add_attribute(Attribute::Dim),
            Cell::new(format!("{} {currency}", recommendation.savings))
                .add_attribute(Attribute::Dim)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// The verdict along with its fuel equivalent and a warning when prices are incomplete.
#[must_use]
pub fn build_verdict_table(verdict: Verdict, recommendation: &Recommendation, currency: &str) -> Table {
    let mut table = new_table();
    let text = match verdict {
        Verdict::Wait { .. } => format!(
            "{verdict} to save {} {currency}: {} of fuel or {} of driving",
            recommendation.savings, recommendation.fuel_liters, recommendation.distance_km,
        ),
        Verdict::RunNow if recommendation.is_beneficial && recommendation.best.is_fallback => {
            format!(
                "Run now, prices from {:02}:00 on are not published yet",
                recommendation.best_hour,
            )
        }
        Verdict::RunNow => verdict.to_string(),
    };
    table.add_row(vec![Cell::new(text).fg(verdict.color()).add_attribute(Attribute::Bold)]);
    if recommendation.is_estimate() {
        table.add_row(vec![
            Cell::new("Estimate based on incomplete price data").add_attribute(Attribute::Dim),
        ]);
    }
    table
}
