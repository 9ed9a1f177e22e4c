use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use axum_extra::extract::{Form, WithRejection};

use crate::endpoints::forms::{parse_record_id, IdForm, IdQuery, SpeciesForm};
use crate::error::{AppError, Result};
use crate::services::species;
use crate::state::AppState;
use crate::templates;

pub fn species_routes(state: AppState) -> Router {
    Router::new()
        .route("/species", get(list_species))
        .route("/species/new", get(new_species))
        .route("/species/create", post(create_species).fallback(redirect_to_list))
        .route("/species/edit", get(edit_species))
        .route("/species/update", post(update_species).fallback(redirect_to_list))
        .route("/species/delete", post(delete_species).fallback(redirect_to_list))
        .with_state(state)
}

async fn list_species(State(state): State<AppState>) -> Result<Html<String>> {
    let all_species = species::list_species(&state.db).await?;
    Ok(Html(templates::species::list_page(&all_species)))
}

async fn new_species() -> Html<String> {
    Html(templates::species::form_page(None))
}

// Step rows post repeated `step_type[]` keys, which needs the axum-extra form extractor
async fn create_species(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<SpeciesForm>, AppError>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    species::create_species(&state.db, input).await?;
    Ok(Redirect::to("/species"))
}

async fn edit_species(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Html<String>> {
    let id = query
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| AppError::NotFound("Species not found".to_string()))?;

    let found = species::get_species(&state.db, id).await?;
    Ok(Html(templates::species::form_page(Some(&found))))
}

async fn update_species(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<SpeciesForm>, AppError>,
) -> Result<Redirect> {
    let id = parse_record_id(&form.id)?;
    let input = form.into_input()?;
    species::update_species(&state.db, id, input).await?;
    Ok(Redirect::to("/species"))
}

/// Deleting a species also deletes its batches and steps
async fn delete_species(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<IdForm>, AppError>,
) -> Result<Redirect> {
    let id = parse_record_id(&form.id)?;
    species::delete_species(&state.db, id).await?;
    Ok(Redirect::to("/species"))
}

async fn redirect_to_list() -> Redirect {
    Redirect::to("/species")
}
