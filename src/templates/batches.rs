use chrono::NaiveDate;

use super::{html_escape, layout, species::step_summary, Nav};
use crate::services::{BatchWithSpecies, SpeciesWithSteps};

pub fn list_page(batches: &[BatchWithSpecies]) -> String {
    let body = if batches.is_empty() {
        r#"    <p>No batches yet. Create your first batch to get started!</p>
    <p>Note: You need to <a href="/species">create at least one species</a> before you can create a batch.</p>"#
            .to_string()
    } else {
        let rows: String = batches.iter().map(list_row).collect();
        format!(
            r#"    <table>
        <thead>
            <tr>
                <th>Species</th>
                <th>Cells</th>
                <th>Seeds/Cell</th>
                <th>Total Seeds</th>
                <th>Date</th>
                <th>Actions</th>
            </tr>
        </thead>
        <tbody>
{}        </tbody>
    </table>"#,
            rows
        )
    };

    let content = format!(
        r#"    <div class="header">
        <h1>Germination Batches</h1>
        <a href="/batches/new" class="btn btn-primary">+ New Batch</a>
    </div>
{}"#,
        body
    );
    layout("Germination Batches", Nav::Batches, &content)
}

fn list_row(entry: &BatchWithSpecies) -> String {
    let b = &entry.batch;
    let total = b
        .total_seeds
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        r#"            <tr>
                <td>{species}</td>
                <td>{cells}</td>
                <td>{per_cell}</td>
                <td>{total}</td>
                <td>{date}</td>
                <td>
                    <div class="actions">
                        <a href="/batches/edit?id={id}" class="btn btn-secondary">Edit</a>
                        <form method="POST" action="/batches/delete">
                            <input type="hidden" name="id" value="{id}">
                            <button type="submit" class="btn btn-danger" onclick="return confirm('Delete this batch?')">Delete</button>
                        </form>
                    </div>
                </td>
            </tr>
"#,
        species = html_escape(&entry.species_name),
        cells = b.num_cells,
        per_cell = b.seeds_per_cell,
        total = total,
        date = b.date_created.format("%Y-%m-%d"),
        id = b.id,
    )
}

/// Empty batch form; the date defaults to `today`
pub fn new_page(species: &[SpeciesWithSteps], today: NaiveDate) -> String {
    let content = if species.is_empty() {
        r#"    <h1>New Germination Batch</h1>
    <p>You need to <a href="/species/new">create at least one species</a> before you can create a batch.</p>
    <a href="/species/new" class="btn btn-primary">Create Species</a>"#
            .to_string()
    } else {
        let fields = BatchFields {
            id: None,
            species_id: None,
            num_cells: String::new(),
            seeds_per_cell: String::new(),
            total_seeds: String::new(),
            date_created: today,
        };
        format!(
            "    <h1>New Germination Batch</h1>\n{}",
            form(&fields, species, "/batches/create", "Create Batch")
        )
    };
    layout("New Batch", Nav::Batches, &content)
}

pub fn edit_page(entry: &BatchWithSpecies, species: &[SpeciesWithSteps]) -> String {
    let b = &entry.batch;
    let fields = BatchFields {
        id: Some(b.id),
        species_id: Some(b.species_id),
        num_cells: b.num_cells.to_string(),
        seeds_per_cell: b.seeds_per_cell.to_string(),
        total_seeds: b.total_seeds.map(|t| t.to_string()).unwrap_or_default(),
        date_created: b.date_created,
    };
    let content = format!(
        "    <h1>Edit Germination Batch</h1>\n{}",
        form(&fields, species, "/batches/update", "Update Batch")
    );
    layout("Edit Batch", Nav::Batches, &content)
}

struct BatchFields {
    id: Option<i64>,
    species_id: Option<i64>,
    num_cells: String,
    seeds_per_cell: String,
    total_seeds: String,
    date_created: NaiveDate,
}

fn form(fields: &BatchFields, species: &[SpeciesWithSteps], action: &str, submit: &str) -> String {
    let id_input = fields
        .id
        .map(|id| format!(r#"        <input type="hidden" name="id" value="{}">"#, id))
        .unwrap_or_default();

    let options: String = species
        .iter()
        .map(|s| {
            let selected = if Some(s.species.id) == fields.species_id {
                " selected"
            } else {
                ""
            };
            let summary = step_summary(&s.steps);
            let label = if summary == "-" {
                s.species.name.clone()
            } else {
                format!("{} ({})", s.species.name, summary)
            };
            format!(
                "                <option value=\"{}\"{}>{}</option>\n",
                s.species.id,
                selected,
                html_escape(&label)
            )
        })
        .collect();

    format!(
        r#"    <form class="record" method="POST" action="{action}">
{id_input}
        <div class="form-group">
            <label for="species_id">Species *</label>
            <select id="species_id" name="species_id" required>
                <option value="">Select a species...</option>
{options}            </select>
        </div>

        <div class="form-group">
            <label for="num_cells">Number of Cells *</label>
            <input type="number" id="num_cells" name="num_cells" value="{num_cells}" min="1" required>
        </div>

        <div class="form-group">
            <label for="seeds_per_cell">Seeds per Cell *</label>
            <input type="number" id="seeds_per_cell" name="seeds_per_cell" value="{seeds_per_cell}" min="1" required>
        </div>

        <div class="form-group">
            <label for="total_seeds">Total Seeds (optional)</label>
            <input type="number" id="total_seeds" name="total_seeds" value="{total_seeds}">
        </div>

        <div class="form-group">
            <label for="date_created">Date *</label>
            <input type="date" id="date_created" name="date_created" value="{date}" required>
        </div>

        <div class="form-actions">
            <button type="submit" class="btn btn-primary">{submit}</button>
            <a href="/" class="btn btn-muted">Cancel</a>
        </div>
    </form>"#,
        action = action,
        id_input = id_input,
        options = options,
        num_cells = html_escape(&fields.num_cells),
        seeds_per_cell = html_escape(&fields.seeds_per_cell),
        total_seeds = html_escape(&fields.total_seeds),
        date = fields.date_created.format("%Y-%m-%d"),
        submit = submit,
    )
}
