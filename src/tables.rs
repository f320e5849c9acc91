use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use tariff_compare::{
    core::{
        crossover::Crossover,
        curve::CostCurve,
        partition::OptimalRange,
        ranking::Ranking,
        tariff::{Tariff, TariffId},
    },
    quantity::cost::Cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Display name of the tariff, falling back to the bare identifier for unknown ones.
fn tariff_name(tariffs: &[Tariff], id: &TariffId) -> String {
    tariffs.iter().find(|tariff| &tariff.id == id).map_or_else(
        || id.to_string(),
        |tariff| match &tariff.provider {
            Some(provider) => format!("{provider} – {}", tariff.name),
            None => tariff.name.clone(),
        },
    )
}

pub fn build_ranking_table(tariffs: &[Tariff], ranking: &Ranking) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "#",
        "Tariff",
        "Unit price",
        "Base price",
        "Bonus",
        "Annual cost",
        "Extra",
    ]);
    for ranked in ranking {
        let Some(tariff) = tariffs.iter().find(|tariff| tariff.id == ranked.tariff_id) else {
            continue;
        };
        let is_cheapest = ranked.rank == 1;
        table.add_row(vec![
            Cell::new(ranked.rank).add_attribute(Attribute::Dim),
            Cell::new(tariff_name(tariffs, &ranked.tariff_id))
                .fg(if is_cheapest { Color::Green } else { Color::Reset }),
            Cell::new(tariff.unit_price).set_alignment(CellAlignment::Right),
            Cell::new(tariff.base_price).set_alignment(CellAlignment::Right),
            Cell::new(tariff.bonus)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(ranked.cost)
                .set_alignment(CellAlignment::Right)
                .fg(if is_cheapest { Color::Green } else { Color::Reset }),
            Cell::new(ranked.cost_above_cheapest).set_alignment(CellAlignment::Right).fg(
                if ranked.cost_above_cheapest >= Cost::ONE_CENT {
                    Color::Red
                } else {
                    Color::Green
                },
            ),
        ]);
    }
    table
}

pub fn build_crossovers_table(tariffs: &[Tariff], crossovers: &[Crossover]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Consumption", "Tariff", "Tariff", "Annual cost"]);
    for crossover in crossovers {
        table.add_row(vec![
            Cell::new(crossover.consumption).set_alignment(CellAlignment::Right),
            Cell::new(tariff_name(tariffs, &crossover.tariffs.0)),
            Cell::new(tariff_name(tariffs, &crossover.tariffs.1)),
            Cell::new(crossover.cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_ranges_table(tariffs: &[Tariff], ranges: &[OptimalRange]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["From", "To", "Cheapest tariff"]);
    for range in ranges {
        table.add_row(vec![
            Cell::new(range.from).set_alignment(CellAlignment::Right),
            Cell::new(range.to).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(tariff_name(tariffs, &range.tariff_id)).fg(Color::Green),
        ]);
    }
    table
}

/// One row per tariff, one column per sampled consumption, the cheapest cost in each column is
/// highlighted.
pub fn build_curves_table(tariffs: &[Tariff], curves: &[CostCurve]) -> Table {
    let mut table = new_table();
    let Some(first) = curves.first() else {
        return table;
    };
    table.set_header(
        std::iter::once(Cell::new("Tariff"))
            .chain(first.points.iter().map(|(consumption, _)| Cell::new(consumption)))
            .collect_vec(),
    );
    let column_minimums = (0..first.points.len())
        .map(|index| curves.iter().map(|curve| curve.points[index].1).min().unwrap_or(Cost::ZERO))
        .collect_vec();
    for curve in curves {
        table.add_row(
            std::iter::once(Cell::new(tariff_name(tariffs, &curve.tariff_id)))
                .chain(curve.points.iter().zip(&column_minimums).map(|((_, cost), minimum)| {
                    Cell::new(format!("{:.0}", cost.0))
                        .set_alignment(CellAlignment::Right)
                        .fg(if cost <= minimum { Color::Green } else { Color::Reset })
                }))
                .collect_vec(),
        );
    }
    table
}
