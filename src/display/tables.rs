//! Table formatting for search results and snapshot summaries.

use crate::record::PersonRecord;
use crate::search::{OwnedImmediateFamily, SearchHit, SnapshotStats};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn bold_cells(headers: Vec<&str>) -> Vec<Cell> {
    headers
        .into_iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
        .collect()
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

fn person_row(record: &PersonRecord) -> Vec<Cell> {
    vec![
        Cell::new(&record.person_id),
        Cell::new(or_dash(record.full_name().as_deref())),
        Cell::new(&record.family_line_id),
        Cell::new(
            record
                .generation
                .as_ref()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "-".to_string()),
        )
        .set_alignment(CellAlignment::Right),
        Cell::new(or_dash(record.nature_of_person.as_deref())),
    ]
}

/// Create a table of search hits. A score column is added when any hit is scored.
pub fn create_results_table(hits: &[SearchHit]) -> String {
    let scored = hits.iter().any(|hit| hit.similarity_score.is_some());

    let mut table = styled_table();
    let mut headers = vec!["ID", "Name", "Family", "Gen", "Nature"];
    if scored {
        headers.push("Score");
    }
    table.set_header(bold_cells(headers));

    for hit in hits {
        let mut row = person_row(&hit.record);
        if let Some(score) = hit.similarity_score {
            // Weak matches in yellow
            let color = if score >= 0.5 { Color::Green } else { Color::Yellow };
            row.push(
                Cell::new(format!("{score:.3}"))
                    .fg(color)
                    .set_alignment(CellAlignment::Right),
            );
        } else if scored {
            row.push(Cell::new("-"));
        }
        table.add_row(row);
    }

    table.to_string()
}

/// Create a per-family member count table with a total row.
pub fn create_stats_table(stats: &SnapshotStats) -> String {
    let mut table = styled_table();
    table.set_header(bold_cells(vec!["Family", "Members"]));

    for (family, members) in &stats.families {
        table.add_row(vec![
            Cell::new(family),
            Cell::new(members).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new(format!("TOTAL ({} families)", stats.total_families))
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_members)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    table.to_string()
}

/// Create a table of a person's immediate family with a relation column.
pub fn create_family_table(family: &OwnedImmediateFamily) -> String {
    let mut table = styled_table();
    table.set_header(bold_cells(vec!["Relation", "ID", "Name", "Family", "Gen", "Nature"]));

    let mut add = |relation: &str, record: &PersonRecord| {
        let mut row = vec![Cell::new(relation).add_attribute(Attribute::Bold)];
        row.extend(person_row(record));
        table.add_row(row);
    };

    add("self", &family.person);
    if let Some(spouse) = &family.spouse {
        add("spouse", spouse);
    }
    for child in &family.children {
        add("child", child);
    }

    table.to_string()
}
