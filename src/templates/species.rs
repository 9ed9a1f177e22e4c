use sea_orm::Iterable;

use super::{html_escape, layout, Nav};
use crate::models::{stratification_step, StepType};
use crate::services::SpeciesWithSteps;

/// Adds and removes step rows. Moist checkboxes carry their row index as
/// value, so indexes are renumbered after every change.
const STEP_SCRIPT: &str = r#"
        function renumberSteps() {
            document.querySelectorAll('#steps .step-row').forEach(function (row, i) {
                row.querySelector('input[type="checkbox"]').value = i;
            });
        }
        function addStep() {
            var template = document.getElementById('step-template');
            var row = template.content.firstElementChild.cloneNode(true);
            document.getElementById('steps').appendChild(row);
            renumberSteps();
        }
        function removeStep(button) {
            button.closest('.step-row').remove();
            renumberSteps();
        }
"#;

/// Human-readable step list, e.g. `Cold, moist 30d → Warm 7d`
pub fn step_summary(steps: &[stratification_step::Model]) -> String {
    if steps.is_empty() {
        return "-".to_string();
    }

    steps
        .iter()
        .map(|s| {
            if s.moist {
                format!("{}, moist {}d", s.step_type, s.days)
            } else {
                format!("{} {}d", s.step_type, s.days)
            }
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

pub fn list_page(species: &[SpeciesWithSteps]) -> String {
    let body = if species.is_empty() {
        "    <p>No species yet. Add a species to start tracking batches.</p>".to_string()
    } else {
        let rows: String = species.iter().map(list_row).collect();
        format!(
            r#"    <table>
        <thead>
            <tr>
                <th>Name</th>
                <th>Stratification</th>
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
        <h1>Species</h1>
        <a href="/species/new" class="btn btn-primary">+ New Species</a>
    </div>
{}"#,
        body
    );
    layout("Species", Nav::Species, &content)
}

fn list_row(entry: &SpeciesWithSteps) -> String {
    format!(
        r#"            <tr>
                <td>{name}</td>
                <td>{summary}</td>
                <td>
                    <div class="actions">
                        <a href="/species/edit?id={id}" class="btn btn-secondary">Edit</a>
                        <form method="POST" action="/species/delete">
                            <input type="hidden" name="id" value="{id}">
                            <button type="submit" class="btn btn-danger" onclick="return confirm('Delete this species? All of its batches will be deleted too.')">Delete</button>
                        </form>
                    </div>
                </td>
            </tr>
"#,
        name = html_escape(&entry.species.name),
        summary = html_escape(&step_summary(&entry.steps)),
        id = entry.species.id,
    )
}

/// Create form when `existing` is `None`, edit form otherwise
pub fn form_page(existing: Option<&SpeciesWithSteps>) -> String {
    let (title, action, submit) = match existing {
        Some(_) => ("Edit Species", "/species/update", "Update Species"),
        None => ("New Species", "/species/create", "Create Species"),
    };

    let id_input = existing
        .map(|s| {
            format!(
                r#"        <input type="hidden" name="id" value="{}">"#,
                s.species.id
            )
        })
        .unwrap_or_default();
    let name = existing
        .map(|s| html_escape(&s.species.name))
        .unwrap_or_default();
    let rows: String = existing
        .map(|s| s.steps.as_slice())
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, step)| step_row(i, Some(step)))
        .collect();

    let content = format!(
        r#"    <h1>{title}</h1>
    <form class="record" method="POST" action="{action}">
{id_input}
        <div class="form-group">
            <label for="name">Name *</label>
            <input type="text" id="name" name="name" value="{name}" required>
        </div>

        <div class="form-group">
            <label>Stratification Steps</label>
            <div id="steps">
{rows}            </div>
            <button type="button" class="btn btn-secondary" onclick="addStep()">+ Add Step</button>
        </div>

        <div class="form-actions">
            <button type="submit" class="btn btn-primary">{submit}</button>
            <a href="/species" class="btn btn-muted">Cancel</a>
        </div>
    </form>
    <template id="step-template">
{template_row}    </template>
    <script>{script}</script>"#,
        title = title,
        action = action,
        id_input = id_input,
        name = name,
        rows = rows,
        submit = submit,
        template_row = step_row(0, None),
        script = STEP_SCRIPT,
    );
    layout(title, Nav::Species, &content)
}

fn step_row(index: usize, step: Option<&stratification_step::Model>) -> String {
    let options: String = StepType::iter()
        .map(|t| {
            let selected = if step.map(|s| s.step_type) == Some(t) {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{t}"{selected}>{t}</option>"#)
        })
        .collect();
    let checked = if step.is_some_and(|s| s.moist) {
        " checked"
    } else {
        ""
    };
    let days = step.map(|s| s.days.to_string()).unwrap_or_default();

    format!(
        r#"                <div class="step-row">
                    <select name="step_type[]">{options}</select>
                    <label><input type="checkbox" name="step_moist[]" value="{index}"{checked}> Moist</label>
                    <input type="number" name="step_days[]" value="{days}" min="1" placeholder="Days" required>
                    <button type="button" class="btn btn-danger" onclick="removeStep(this)">Remove</button>
                </div>
"#
    )
}
