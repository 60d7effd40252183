//! The session controller: the one stateful orchestrator of the app.
//!
//! It owns the view router, the pending input draft, the active content and the user's persisted
//! collections. Every mutation of a collection is written back through the injected
//! [`KeyValueStore`] before the operation returns.

mod generate;
mod inputs;
mod library;
mod playthrough;

pub use generate::*;
pub use inputs::*;
pub use library::*;
pub use playthrough::*;

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::{find_top_rated, initial_community_games};
use crate::errors::AppError;
use crate::generation::FileSource;
use crate::models::{
    ActivePage, Analysis, CommunityGame, GamePayload, GameStatus, RpgData, RpgProgress, SavedGame,
    UserSettings, View, WebAppData,
};
use crate::persistence::{load_or_default, save_json, KeyValueStore, StorageKey};
use crate::simulation::{HistoricalSimulation, SimulationSnapshot};

/// Controller shared between request handlers.
pub type SharedSession = Arc<Mutex<SessionController>>;

/// Content currently shown in one of the content views.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveContent {
    Lesson(Playthrough),
    App(WebAppData),
    Simulation(HistoricalSimulation),
}

/// Transient state of one running client.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    active_page: ActivePage,
    view: View,
    selected_subject: Option<String>,
    inputs: InputDraft,
    is_loading: bool,
    loading_message: Option<String>,
    input_error: Option<String>,
    content: Option<ActiveContent>,
    analysis: Option<Analysis>,
    /// Bumped whenever interest in an in-flight generation is abandoned.
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            active_page: ActivePage::Generate,
            view: View::Subjects,
            selected_subject: None,
            inputs: InputDraft::default(),
            is_loading: false,
            loading_message: None,
            input_error: None,
            content: None,
            analysis: None,
            epoch: 0,
        }
    }
}

impl Session {
    pub fn active_page(&self) -> ActivePage {
        self.active_page
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_subject(&self) -> Option<&str> {
        self.selected_subject.as_deref()
    }

    pub fn inputs(&self) -> &InputDraft {
        &self.inputs
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn content(&self) -> Option<&ActiveContent> {
        self.content.as_ref()
    }

    #[cfg(test)]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn abandon_generation(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
        self.epoch += 1;
    }

    fn clear_content(&mut self) {
        self.content = None;
        self.analysis = None;
    }
}

/// Content part of a [`SessionSnapshot`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ContentSnapshot {
    Rpg { game: RpgData, progress: RpgProgress },
    WebApp(WebAppData),
    Simulation(SimulationSnapshot),
}

/// What a client renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub active_page: ActivePage,
    pub view: View,
    pub selected_subject: Option<String>,
    pub inputs: DraftSnapshot,
    pub is_loading: bool,
    pub loading_message: Option<String>,
    pub input_error: Option<String>,
    pub content: Option<ContentSnapshot>,
    /// Shown on the lesson completion screen.
    pub analysis: Option<Analysis>,
}

/// Where a game to play comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameSource {
    Saved,
    Community,
    TopRated,
}

/// A draft field update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputsUpdate {
    pub url: Option<String>,
    pub learned: Option<String>,
    pub goal: Option<String>,
}

pub struct SessionController {
    store: Arc<dyn KeyValueStore>,
    session: Session,
    data: UserData,
}

impl SessionController {
    /// Start a session, loading every persisted collection.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let favorites: Vec<String> = load_or_default(store.as_ref(), StorageKey::Favorites).await;
        let saved_games: Vec<SavedGame> =
            load_or_default(store.as_ref(), StorageKey::SavedGames).await;
        let mut community_games: Vec<CommunityGame> =
            load_or_default(store.as_ref(), StorageKey::CommunityGames).await;
        if community_games.is_empty() {
            community_games = initial_community_games();
            tracing::info!(count = community_games.len(), "Seeded the community feed");
        }
        let user_ratings = load_or_default(store.as_ref(), StorageKey::UserRatings).await;
        let settings: UserSettings = load_or_default(store.as_ref(), StorageKey::UserSettings).await;

        tracing::info!(
            saved_games = saved_games.len(),
            favorites = favorites.len(),
            "Session loaded"
        );

        Self {
            store,
            session: Session::default(),
            data: UserData {
                favorites,
                saved_games,
                community_games,
                user_ratings,
                settings: settings.normalized(),
            },
        }
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = &self.session;
        let content = session.content.as_ref().map(|content| match content {
            ActiveContent::Lesson(play) => ContentSnapshot::Rpg {
                game: play.data().clone(),
                progress: play.progress().clone(),
            },
            ActiveContent::App(app) => ContentSnapshot::WebApp(app.clone()),
            ActiveContent::Simulation(sim) => ContentSnapshot::Simulation(sim.snapshot()),
        });

        SessionSnapshot {
            active_page: session.active_page,
            view: session.view,
            selected_subject: session.selected_subject.clone(),
            inputs: session.inputs.snapshot(),
            is_loading: session.is_loading,
            loading_message: session.loading_message.clone(),
            input_error: session.input_error.clone(),
            content,
            analysis: session.analysis.clone(),
        }
    }

    // Navigation

    pub fn select_page(&mut self, page: ActivePage) {
        tracing::debug!(?page, "Page selected");
        self.session.active_page = page;
    }

    /// subjects → inputs.
    pub fn select_subject(&mut self, title: &str) -> Result<(), AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Subject title is required".to_string()));
        }
        if self.session.view != View::Subjects {
            return Err(AppError::InvalidState(
                "A subject can only be picked from the subject list".to_string(),
            ));
        }

        self.session.selected_subject = Some(title.to_string());
        self.session.inputs.clear();
        self.session.input_error = None;
        self.session.view = View::Inputs;
        self.session.active_page = ActivePage::Generate;
        Ok(())
    }

    /// Pop one level, discarding transient input and generation state.
    pub fn back(&mut self) {
        self.session.inputs.clear();
        self.session.input_error = None;
        self.session.abandon_generation();

        match self.session.view {
            View::Subjects => {}
            View::Inputs => {
                self.session.view = View::Subjects;
                self.session.selected_subject = None;
            }
            View::Game | View::Webapp | View::Ww2game => {
                self.session.view = View::Inputs;
                self.session.clear_content();
            }
        }
        tracing::debug!(view = ?self.session.view, "Navigated back");
    }

    /// Leave a content view for the inputs view without saving.
    pub fn exit_game(&mut self) -> Result<(), AppError> {
        if !self.session.view.is_content() {
            return Err(AppError::InvalidState("No game is open".to_string()));
        }
        self.session.view = View::Inputs;
        self.session.clear_content();
        Ok(())
    }

    /// Open a payload in its content view.
    fn open_payload(&mut self, subject: &str, payload: GamePayload) {
        self.session.selected_subject = Some(subject.to_string());
        self.session.analysis = None;
        match payload {
            GamePayload::Rpg(data) => {
                self.session.content = Some(ActiveContent::Lesson(Playthrough::new(data)));
                self.session.view = View::Game;
            }
            GamePayload::WebApp(app) => {
                self.session.content = Some(ActiveContent::App(app));
                self.session.view = View::Webapp;
            }
        }
        self.session.active_page = ActivePage::Generate;
    }

    fn open_simulation(&mut self) {
        self.session.content = Some(ActiveContent::Simulation(HistoricalSimulation::new()));
        self.session.analysis = None;
        self.session.view = View::Ww2game;
        self.session.active_page = ActivePage::Generate;
    }

    /// Play a saved, shared or curated game.
    pub fn play_game(&mut self, source: GameSource, id: &str) -> Result<(), AppError> {
        let (subject, payload) = match source {
            GameSource::Saved => self
                .data
                .find_saved(id)
                .map(|game| (game.subject.clone(), game.payload.clone())),
            GameSource::Community => self
                .data
                .find_community(id)
                .map(|game| (game.game.subject.clone(), game.game.payload.clone())),
            GameSource::TopRated => find_top_rated(id).map(|game| (game.subject, game.payload)),
        }
        .ok_or_else(|| AppError::NotFound(format!("Game {} not found", id)))?;

        self.session.abandon_generation();
        self.session.input_error = None;
        self.open_payload(&subject, payload);
        tracing::info!(?source, id, "Playing game");
        Ok(())
    }

    // Inputs

    fn ensure_idle(&self) -> Result<(), AppError> {
        if self.session.is_loading {
            return Err(AppError::Busy);
        }
        Ok(())
    }

    fn ensure_inputs_view(&self) -> Result<(), AppError> {
        if self.session.view != View::Inputs {
            return Err(AppError::InvalidState(
                "Inputs can only be edited on the inputs screen".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the present fields in order url, learned, goal. The draft only changes if every
    /// field is accepted.
    pub fn update_inputs(&mut self, update: InputsUpdate) -> Result<(), AppError> {
        self.ensure_idle()?;
        self.ensure_inputs_view()?;
        let mut inputs = self.session.inputs.clone();
        if let Some(url) = update.url {
            inputs.set_url(url)?;
        }
        if let Some(learned) = update.learned {
            inputs.set_learned(learned)?;
        }
        if let Some(goal) = update.goal {
            inputs.set_goal(goal)?;
        }
        self.session.inputs = inputs;
        self.session.input_error = None;
        Ok(())
    }

    pub fn attach_file(&mut self, file: FileSource) -> Result<(), AppError> {
        self.ensure_idle()?;
        self.ensure_inputs_view()?;
        match self.session.inputs.attach_file(file) {
            Ok(()) => {
                self.session.input_error = None;
                Ok(())
            }
            Err(e) => {
                if matches!(e, AppError::InvalidSource(_)) {
                    self.session.input_error = Some(e.inline_message());
                }
                Err(e)
            }
        }
    }

    pub fn clear_file(&mut self) -> Result<(), AppError> {
        self.ensure_idle()?;
        self.session.inputs.clear_file();
        Ok(())
    }

    // Content views

    fn lesson_mut(&mut self) -> Result<&mut Playthrough, AppError> {
        match (self.session.view, self.session.content.as_mut()) {
            (View::Game, Some(ActiveContent::Lesson(play))) => Ok(play),
            _ => Err(AppError::InvalidState("No lesson is being played".to_string())),
        }
    }

    fn simulation_mut(&mut self) -> Result<&mut HistoricalSimulation, AppError> {
        match (self.session.view, self.session.content.as_mut()) {
            (View::Ww2game, Some(ActiveContent::Simulation(sim))) => Ok(sim),
            _ => Err(AppError::InvalidState("No simulation is running".to_string())),
        }
    }

    pub fn choose_option(&mut self, option_index: usize) -> Result<(), AppError> {
        self.lesson_mut()?.choose(option_index)
    }

    pub fn continue_lesson(&mut self) -> Result<(), AppError> {
        self.lesson_mut()?.continue_on()
    }

    pub fn simulation_select_country(&mut self, country_id: &str) -> Result<(), AppError> {
        self.simulation_mut()?.select_country(country_id)
    }

    pub fn simulation_choose(&mut self, choice_index: usize) -> Result<(), AppError> {
        self.simulation_mut()?.choose(choice_index)
    }

    pub fn simulation_continue(&mut self) -> Result<(), AppError> {
        self.simulation_mut()?.continue_timeline()
    }

    pub fn simulation_restart(&mut self) -> Result<(), AppError> {
        self.simulation_mut()?.restart();
        Ok(())
    }

    // Library

    /// Save the open lesson (once won) or app. Saving a lesson also leaves the game view.
    pub async fn save_current(&mut self, name: &str) -> Result<SavedGame, AppError> {
        let payload = match (&self.session.view, &self.session.content) {
            (View::Game, Some(ActiveContent::Lesson(play))) => {
                if play.progress().status != GameStatus::Victory {
                    return Err(AppError::InvalidState(
                        "Finish the lesson before saving it".to_string(),
                    ));
                }
                GamePayload::Rpg(play.data().clone())
            }
            (View::Webapp, Some(ActiveContent::App(app))) => GamePayload::WebApp(app.clone()),
            _ => return Err(AppError::InvalidState("There is nothing to save".to_string())),
        };

        let subject = self.session.selected_subject.clone();
        let game = self.data.save_game(
            name,
            subject.as_deref(),
            payload,
            Utc::now().timestamp_millis(),
        )?;
        self.persist(StorageKey::SavedGames).await;
        tracing::info!(id = %game.id, kind = game.payload.kind(), "Game saved");

        if matches!(game.payload, GamePayload::Rpg(_)) {
            self.session.view = View::Inputs;
            self.session.clear_content();
        }
        Ok(game)
    }

    pub async fn toggle_visibility(&mut self, id: &str) -> Result<SavedGame, AppError> {
        let game = self.data.toggle_visibility(id)?;
        self.persist(StorageKey::SavedGames).await;
        self.persist(StorageKey::CommunityGames).await;
        self.persist(StorageKey::UserRatings).await;
        Ok(game)
    }

    pub async fn delete_game(&mut self, id: &str) -> Result<(), AppError> {
        self.data.delete_game(id)?;
        self.persist(StorageKey::SavedGames).await;
        self.persist(StorageKey::CommunityGames).await;
        self.persist(StorageKey::UserRatings).await;
        tracing::info!(id, "Game deleted");
        Ok(())
    }

    pub async fn rate_game(
        &mut self,
        id: &str,
        rating: u8,
    ) -> Result<CommunityGame, AppError> {
        let game = self.data.rate_game(id, rating)?;
        self.persist(StorageKey::CommunityGames).await;
        self.persist(StorageKey::UserRatings).await;
        Ok(game)
    }

    pub fn search_community(&self, term: &str) -> Vec<CommunityListing> {
        self.data.search_community(term)
    }

    pub async fn toggle_favorite(&mut self, title: &str) -> Result<bool, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Subject title is required".to_string()));
        }
        let is_favorite = self.data.toggle_favorite(title);
        self.persist(StorageKey::Favorites).await;
        Ok(is_favorite)
    }

    pub async fn update_settings(&mut self, settings: UserSettings) -> UserSettings {
        self.data.settings = settings.normalized();
        self.persist(StorageKey::UserSettings).await;
        self.data.settings.clone()
    }

    /// Write one collection back. Failures are logged and the in-memory state is kept.
    async fn persist(&self, key: StorageKey) {
        let store = self.store.as_ref();
        let result = match key {
            StorageKey::Favorites => save_json(store, key, &self.data.favorites).await,
            StorageKey::SavedGames => save_json(store, key, &self.data.saved_games).await,
            StorageKey::UserSettings => save_json(store, key, &self.data.settings).await,
            StorageKey::CommunityGames => save_json(store, key, &self.data.community_games).await,
            StorageKey::UserRatings => save_json(store, key, &self.data.user_ratings).await,
        };
        if result.is_err() {
            tracing::warn!("Keeping unsaved {} changes in memory", key.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::fake::two_scene_lesson;
    use crate::generation::PDF_MIME_TYPE;
    use crate::models::DEFAULT_PROMPT;
    use crate::persistence::MemoryStore;

    async fn controller() -> (SessionController, MemoryStore) {
        let store = MemoryStore::new();
        let controller = SessionController::load(Arc::new(store.clone())).await;
        (controller, store)
    }

    fn open_lesson(controller: &mut SessionController) {
        controller.select_subject("Physics").unwrap();
        controller.open_payload("Physics", GamePayload::Rpg(two_scene_lesson()));
    }

    fn win_lesson(controller: &mut SessionController) {
        controller.choose_option(0).unwrap();
        controller.continue_lesson().unwrap();
        controller.choose_option(1).unwrap();
        controller.continue_lesson().unwrap();
    }

    #[tokio::test]
    async fn test_subject_then_back_restores_initial_state() {
        let (mut controller, _) = controller().await;
        for title in ["Physics", "Chemistry", "Statistics"] {
            controller.select_subject(title).unwrap();
            controller
                .update_inputs(InputsUpdate {
                    learned: Some("limits".into()),
                    ..InputsUpdate::default()
                })
                .unwrap();
            controller.back();

            let session = controller.session();
            assert_eq!(session.view(), View::Subjects);
            assert!(session.selected_subject().is_none());
            assert_eq!(session.inputs(), &InputDraft::default());
            assert!(session.input_error().is_none());
        }
    }

    #[tokio::test]
    async fn test_back_from_game_returns_to_inputs_and_keeps_collections() {
        let (mut controller, _) = controller().await;
        controller.data.favorites.push("Physics".into());
        open_lesson(&mut controller);
        let epoch = controller.session().epoch();

        controller.back();
        assert_eq!(controller.session().view(), View::Inputs);
        assert!(controller.session().content().is_none());
        assert_eq!(controller.session().selected_subject(), Some("Physics"));
        assert!(controller.session().epoch() > epoch);
        assert_eq!(controller.data().favorites, vec!["Physics".to_string()]);
    }

    #[tokio::test]
    async fn test_save_requires_victory_then_exits_to_inputs() {
        let (mut controller, store) = controller().await;
        open_lesson(&mut controller);
        assert!(matches!(
            controller.save_current("Mine").await,
            Err(AppError::InvalidState(_))
        ));

        win_lesson(&mut controller);
        let game = controller.save_current("Mine").await.unwrap();

        assert_eq!(game.subject, "Physics");
        assert_eq!(controller.session().view(), View::Inputs);
        let raw = store.get_raw(StorageKey::SavedGames).await.unwrap();
        assert!(raw.contains(&game.id));
    }

    #[tokio::test]
    async fn test_saving_app_stays_in_webapp_view() {
        let (mut controller, _) = controller().await;
        controller.open_payload(
            "Physics",
            GamePayload::WebApp(WebAppData {
                spec: "s".into(),
                code: "c".into(),
            }),
        );
        controller.save_current("App").await.unwrap();
        assert_eq!(controller.session().view(), View::Webapp);
    }

    #[tokio::test]
    async fn test_victory_is_sticky_until_exit() {
        let (mut controller, _) = controller().await;
        open_lesson(&mut controller);
        win_lesson(&mut controller);

        assert!(controller.choose_option(0).is_err());
        assert!(controller.continue_lesson().is_err());
        match controller.snapshot().content {
            Some(ContentSnapshot::Rpg { progress, .. }) => {
                assert_eq!(progress.status, GameStatus::Victory)
            }
            other => panic!("unexpected content {:?}", other),
        }

        controller.exit_game().unwrap();
        assert_eq!(controller.session().view(), View::Inputs);
        assert!(controller.exit_game().is_err());
    }

    #[tokio::test]
    async fn test_busy_session_rejects_input_changes() {
        let (mut controller, _) = controller().await;
        controller.select_subject("Physics").unwrap();
        controller.session.is_loading = true;

        let update = InputsUpdate {
            url: Some("https://youtu.be/dQw4w9WgXcQ".into()),
            ..InputsUpdate::default()
        };
        assert_eq!(controller.update_inputs(update), Err(AppError::Busy));
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_draft_untouched() {
        let (mut controller, _) = controller().await;
        controller.select_subject("Physics").unwrap();

        let update = InputsUpdate {
            url: Some("https://youtu.be/dQw4w9WgXcQ".into()),
            learned: Some("algebra".into()),
            ..InputsUpdate::default()
        };
        assert!(matches!(
            controller.update_inputs(update),
            Err(AppError::InputLocked(_))
        ));
        assert_eq!(controller.session().inputs(), &InputDraft::default());
    }

    #[tokio::test]
    async fn test_non_pdf_upload_sets_inline_error() {
        let (mut controller, _) = controller().await;
        controller.select_subject("Physics").unwrap();
        let err = controller
            .attach_file(FileSource {
                name: "notes.txt".into(),
                mime_type: "text/plain".into(),
                bytes: vec![1, 2],
            })
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidSource(_)));
        assert_eq!(
            controller.session().input_error(),
            Some("Please upload a PDF file.")
        );

        controller
            .attach_file(FileSource {
                name: "notes.pdf".into(),
                mime_type: PDF_MIME_TYPE.into(),
                bytes: vec![1, 2],
            })
            .unwrap();
        assert!(controller.session().input_error().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_storage_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.put_raw(StorageKey::SavedGames, "[{\"id\":").await;
        store.put_raw(StorageKey::UserSettings, "{\"name\":\"Ada\",\"customPrompt\":\"  \"}").await;
        store.put_raw(StorageKey::UserRatings, "not json").await;

        let controller = SessionController::load(Arc::new(store)).await;
        assert!(controller.data().saved_games.is_empty());
        assert!(controller.data().user_ratings.is_empty());
        assert_eq!(controller.data().settings.name, "Ada");
        assert_eq!(controller.data().settings.custom_prompt, DEFAULT_PROMPT);
    }

    #[tokio::test]
    async fn test_first_run_seeds_community_feed() {
        let (controller, _) = controller().await;
        assert_eq!(controller.data().community_games, initial_community_games());

        let store = MemoryStore::new();
        store.put_raw(StorageKey::CommunityGames, "[]").await;
        let controller = SessionController::load(Arc::new(store)).await;
        assert_eq!(controller.data().community_games, initial_community_games());
    }

    #[tokio::test]
    async fn test_corrupt_community_storage_is_reseeded() {
        let store = MemoryStore::new();
        store.put_raw(StorageKey::CommunityGames, "{\"oops\"").await;

        let mut controller = SessionController::load(Arc::new(store)).await;
        let seeded = initial_community_games();
        assert_eq!(controller.data().community_games, seeded);

        let rated = controller.rate_game(seeded[0].id(), 5).await.unwrap();
        assert_eq!(rated.ratings.count, seeded[0].ratings.count + 1);
        assert_eq!(rated.ratings.total, seeded[0].ratings.total + 5);
    }

    #[tokio::test]
    async fn test_collections_survive_reload() {
        let (mut controller, store) = controller().await;
        controller.toggle_favorite("Biology").await.unwrap();
        controller.open_payload(
            "Biology",
            GamePayload::WebApp(WebAppData {
                spec: "s".into(),
                code: "c".into(),
            }),
        );
        let game = controller.save_current("Cells").await.unwrap();
        controller.toggle_visibility(&game.id).await.unwrap();
        controller.rate_game(&game.id, 5).await.unwrap();

        let reloaded = SessionController::load(Arc::new(store)).await;
        assert_eq!(reloaded.data(), controller.data());
    }

    #[tokio::test]
    async fn test_play_top_rated_switches_to_generate_page() {
        let (mut controller, _) = controller().await;
        controller.select_page(ActivePage::TopRated);
        controller
            .play_game(GameSource::TopRated, "top-gravity-sling")
            .unwrap();

        assert_eq!(controller.session().active_page(), ActivePage::Generate);
        assert_eq!(controller.session().view(), View::Webapp);
        assert_eq!(controller.session().selected_subject(), Some("Physics"));
        assert!(matches!(
            controller.play_game(GameSource::Saved, "missing"),
            Err(AppError::NotFound(_))
        ));
    }
}
