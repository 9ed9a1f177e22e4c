use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::WithRejection;

use crate::endpoints::forms::{parse_record_id, BatchForm, IdForm, IdQuery};
use crate::error::{AppError, Result};
use crate::services::{batches, species};
use crate::state::AppState;
use crate::templates;

/// Batch pages. The batch list is the site root.
pub fn batches_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_batches))
        .route("/batches/new", get(new_batch))
        .route("/batches/create", post(create_batch).fallback(redirect_to_list))
        .route("/batches/edit", get(edit_batch))
        .route("/batches/update", post(update_batch).fallback(redirect_to_list))
        .route("/batches/delete", post(delete_batch).fallback(redirect_to_list))
        .with_state(state)
}

async fn list_batches(State(state): State<AppState>) -> Result<Html<String>> {
    let batches = batches::list_batches(&state.db).await?;
    Ok(Html(templates::batches::list_page(&batches)))
}

async fn new_batch(State(state): State<AppState>) -> Result<Html<String>> {
    let all_species = species::list_species(&state.db).await?;
    let today = chrono::Local::now().date_naive();
    Ok(Html(templates::batches::new_page(&all_species, today)))
}

async fn create_batch(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<BatchForm>, AppError>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    batches::create_batch(&state.db, input).await?;
    Ok(Redirect::to("/"))
}

async fn edit_batch(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Html<String>> {
    let id = query
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| AppError::NotFound("Batch not found".to_string()))?;

    let batch = batches::get_batch(&state.db, id).await?;
    let all_species = species::list_species(&state.db).await?;
    Ok(Html(templates::batches::edit_page(&batch, &all_species)))
}

async fn update_batch(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<BatchForm>, AppError>,
) -> Result<Redirect> {
    let id = parse_record_id(&form.id)?;
    let input = form.into_input()?;
    batches::update_batch(&state.db, id, input).await?;
    Ok(Redirect::to("/"))
}

async fn delete_batch(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<IdForm>, AppError>,
) -> Result<Redirect> {
    let id = parse_record_id(&form.id)?;
    batches::delete_batch(&state.db, id).await?;
    Ok(Redirect::to("/"))
}

async fn redirect_to_list() -> Redirect {
    Redirect::to("/")
}
