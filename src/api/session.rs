//! Session endpoints: navigation, inputs, generation and the content views.

use axum::extract::{Multipart, State};
use serde::Deserialize;

use super::{success, ApiJson, ApiResult};
use crate::errors::AppError;
use crate::generation::FileSource;
use crate::models::{ActivePage, SavedGame};
use crate::session::{run_generation, GameSource, InputsUpdate, SessionSnapshot};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub page: ActivePage,
}

#[derive(Debug, Deserialize)]
pub struct SubjectRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRequest {
    pub option_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub source: GameSource,
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRequest {
    pub country_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationChoiceRequest {
    pub choice_index: usize,
}

/// GET /api/session - Current session snapshot.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    success(state.session.lock().await.snapshot())
}

/// PUT /api/session/page - Switch the top-level tab.
pub async fn select_page(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PageRequest>,
) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.select_page(request.page);
    success(controller.snapshot())
}

/// POST /api/session/subject - Pick a subject and open the inputs view.
pub async fn select_subject(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubjectRequest>,
) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.select_subject(&request.title)?;
    success(controller.snapshot())
}

/// POST /api/session/back - Pop one view level.
pub async fn go_back(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.back();
    success(controller.snapshot())
}

/// PUT /api/session/inputs - Set url, learned or goal text.
pub async fn update_inputs(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<InputsUpdate>,
) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.update_inputs(request)?;
    success(controller.snapshot())
}

/// POST /api/session/inputs/file - Upload the source PDF (multipart field `file`).
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<SessionSnapshot> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e)))?;
        upload = Some(FileSource {
            name,
            mime_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let file =
        upload.ok_or_else(|| AppError::Validation("Missing multipart field 'file'".to_string()))?;
    tracing::info!(name = %file.name, mime_type = %file.mime_type, size = file.bytes.len(), "File received");

    let mut controller = state.session.lock().await;
    controller.attach_file(file)?;
    success(controller.snapshot())
}

/// DELETE /api/session/inputs/file - Remove the uploaded file.
pub async fn clear_file(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.clear_file()?;
    success(controller.snapshot())
}

/// POST /api/session/generate - Turn the current inputs into a game.
pub async fn generate(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let snapshot = run_generation(&state.session, &state.orchestrator, &state.scenarios).await?;
    success(snapshot)
}

/// POST /api/session/rpg/choice - Pick an option in the current scene.
pub async fn choose_option(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChoiceRequest>,
) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.choose_option(request.option_index)?;
    success(controller.snapshot())
}

/// POST /api/session/rpg/continue - Acknowledge feedback.
pub async fn continue_lesson(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.continue_lesson()?;
    success(controller.snapshot())
}

/// POST /api/session/exit - Leave the game without saving.
pub async fn exit_game(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.exit_game()?;
    success(controller.snapshot())
}

/// POST /api/session/save - Save the open lesson or app to the library.
pub async fn save_game(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SaveRequest>,
) -> ApiResult<SavedGame> {
    let mut controller = state.session.lock().await;
    let game = controller.save_current(&request.name).await?;
    success(game)
}

/// POST /api/session/play - Open a saved, community or top-rated game.
pub async fn play_game(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PlayRequest>,
) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.play_game(request.source, &request.id)?;
    success(controller.snapshot())
}

/// POST /api/session/simulation/country
pub async fn simulation_country(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CountryRequest>,
) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.simulation_select_country(&request.country_id)?;
    success(controller.snapshot())
}

/// POST /api/session/simulation/choice
pub async fn simulation_choice(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SimulationChoiceRequest>,
) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.simulation_choose(request.choice_index)?;
    success(controller.snapshot())
}

/// POST /api/session/simulation/continue
pub async fn simulation_continue(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.simulation_continue()?;
    success(controller.snapshot())
}

/// POST /api/session/simulation/restart
pub async fn simulation_restart(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let mut controller = state.session.lock().await;
    controller.simulation_restart()?;
    success(controller.snapshot())
}
