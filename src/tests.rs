//! Integration tests for the G2L backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::db::{init_database, SqliteStore};
use crate::generation::fake::FakeGenerativeApi;
use crate::generation::{Orchestrator, PDF_MIME_TYPE};
use crate::persistence::{KeyValueStore, StorageKey};
use crate::scenarios::{ScenarioMatcher, SIMULATION_VIDEO_URL};
use crate::session::SessionController;
use crate::{create_router, AppState};

const VIDEO: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    api: Arc<FakeGenerativeApi>,
    temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with(FakeGenerativeApi::narrative(), &[]).await
    }

    async fn with(api: FakeGenerativeApi, seed: &[(StorageKey, &str)]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self::start(temp_dir, api, seed).await
    }

    /// Boot a server over the database in `temp_dir`.
    async fn start(temp_dir: TempDir, api: FakeGenerativeApi, seed: &[(StorageKey, &str)]) -> Self {
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let store = Arc::new(SqliteStore::new(pool));
        for (key, raw) in seed {
            store
                .save(*key, raw.to_string())
                .await
                .expect("Failed to seed store");
        }

        let api = Arc::new(api);
        let state = AppState {
            session: SessionController::load(store).await.into_shared(),
            orchestrator: Arc::new(Orchestrator::new(api.clone())),
            scenarios: Arc::new(ScenarioMatcher::with_demo_rules(true, Duration::ZERO)),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            api,
            temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (u16, Value) {
        let resp = self.client.delete(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn open_inputs(&self, subject: &str) {
        let (status, _) = self
            .post("/api/session/subject", json!({ "title": subject }))
            .await;
        assert_eq!(status, 200);
    }

    /// Generate the fake two-scene lesson from text and win it.
    async fn win_lesson(&self, subject: &str) {
        self.open_inputs(subject).await;
        self.put(
            "/api/session/inputs",
            json!({ "learned": "cells", "goal": "mitosis" }),
        )
        .await;
        let (status, body) = self.post("/api/session/generate", json!({})).await;
        assert_eq!(status, 200, "{}", body);

        for option in [0, 1] {
            self.post("/api/session/rpg/choice", json!({ "optionIndex": option }))
                .await;
            self.post("/api/session/rpg/continue", json!({})).await;
        }
    }

    /// Win and save a lesson, returning the saved game id.
    async fn save_lesson(&self, subject: &str, name: &str) -> String {
        self.win_lesson(subject).await;
        let (status, body) = self
            .post("/api/session/save", json!({ "name": name }))
            .await;
        assert_eq!(status, 200, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_initial_session() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/session").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["activePage"], "generate");
    assert_eq!(body["data"]["view"], "subjects");
    assert_eq!(body["data"]["isLoading"], false);
    assert!(body["data"]["content"].is_null());
}

#[tokio::test]
async fn test_select_page() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .put("/api/session/page", json!({ "page": "top-rated" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["activePage"], "top-rated");
}

#[tokio::test]
async fn test_subject_then_back_clears_everything() {
    let fixture = TestFixture::new().await;

    fixture.open_inputs("Physics").await;
    let (_, body) = fixture
        .put("/api/session/inputs", json!({ "url": VIDEO }))
        .await;
    assert_eq!(body["data"]["view"], "inputs");
    assert_eq!(body["data"]["inputs"]["url"], VIDEO);
    assert_eq!(body["data"]["inputs"]["locked"]["text"], true);

    let (status, body) = fixture.post("/api/session/back", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "subjects");
    assert!(body["data"]["selectedSubject"].is_null());
    assert_eq!(body["data"]["inputs"]["url"], "");
}

#[tokio::test]
async fn test_second_input_channel_is_rejected() {
    let fixture = TestFixture::new().await;
    fixture.open_inputs("Physics").await;
    fixture
        .put("/api/session/inputs", json!({ "learned": "limits" }))
        .await;

    let (status, body) = fixture
        .put("/api/session/inputs", json!({ "url": VIDEO }))
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], "INPUT_LOCKED");

    let (_, body) = fixture.get("/api/session").await;
    assert_eq!(body["data"]["inputs"]["url"], "");
    assert_eq!(body["data"]["inputs"]["learned"], "limits");
}

#[tokio::test]
async fn test_generate_without_input() {
    let fixture = TestFixture::new().await;
    fixture.open_inputs("Physics").await;

    let (status, body) = fixture.post("/api/session/generate", json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "MISSING_INPUT");
    assert!(body["error"]["details"]["inputError"].is_string());
    assert!(fixture.api.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_url_makes_no_analysis_call() {
    let fixture = TestFixture::new().await;
    fixture.open_inputs("Physics").await;
    fixture
        .put(
            "/api/session/inputs",
            json!({ "url": "https://vimeo.com/12345" }),
        )
        .await;

    let (status, body) = fixture.post("/api/session/generate", json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "INVALID_SOURCE");
    assert_eq!(fixture.api.calls(), vec!["validate_url".to_string()]);

    let (_, body) = fixture.get("/api/session").await;
    assert_eq!(body["data"]["view"], "inputs");
    assert_eq!(body["data"]["isLoading"], false);
}

#[tokio::test]
async fn test_narrative_playthrough_to_victory() {
    let fixture = TestFixture::new().await;
    fixture.open_inputs("Biology").await;
    fixture
        .put(
            "/api/session/inputs",
            json!({ "learned": "cells", "goal": "mitosis" }),
        )
        .await;

    let (status, body) = fixture.post("/api/session/generate", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "game");
    assert_eq!(body["data"]["content"]["type"], "rpg");
    assert_eq!(body["data"]["analysis"]["learningGoal"], "mitosis");

    // Wrong answer: feedback, then back to the same scene.
    let (_, body) = fixture
        .post("/api/session/rpg/choice", json!({ "optionIndex": 1 }))
        .await;
    let progress = &body["data"]["content"]["data"]["progress"];
    assert_eq!(progress["feedback"], "wrong feedback");
    assert_eq!(progress["currentSceneIndex"], 0);
    let (_, body) = fixture.post("/api/session/rpg/continue", json!({})).await;
    let progress = &body["data"]["content"]["data"]["progress"];
    assert_eq!(progress["currentSceneIndex"], 0);
    assert!(progress["feedback"].is_null());

    // Right answers through to the end.
    fixture
        .post("/api/session/rpg/choice", json!({ "optionIndex": 0 }))
        .await;
    let (_, body) = fixture.post("/api/session/rpg/continue", json!({})).await;
    assert_eq!(body["data"]["content"]["data"]["progress"]["currentSceneIndex"], 1);

    fixture
        .post("/api/session/rpg/choice", json!({ "optionIndex": 1 }))
        .await;
    let (_, body) = fixture.post("/api/session/rpg/continue", json!({})).await;
    assert_eq!(body["data"]["content"]["data"]["progress"]["status"], "victory");

    let (status, body) = fixture
        .post("/api/session/rpg/choice", json!({ "optionIndex": 0 }))
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_non_narrative_video_becomes_webapp() {
    let fixture = TestFixture::with(FakeGenerativeApi::non_narrative(), &[]).await;
    fixture.open_inputs("Physics").await;
    fixture
        .put("/api/session/inputs", json!({ "url": VIDEO }))
        .await;

    let (status, body) = fixture.post("/api/session/generate", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "webapp");
    assert_eq!(body["data"]["content"]["type"], "webapp");
    assert!(body["data"]["content"]["data"]["code"]
        .as_str()
        .unwrap()
        .starts_with("<html>"));

    // Saving an app keeps it open.
    let (status, body) = fixture
        .post("/api/session/save", json!({ "name": "Waves" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["type"], "webapp");
    assert_eq!(body["data"]["subject"], "Physics");
    assert_eq!(body["data"]["isPublic"], false);
    let (_, body) = fixture.get("/api/session").await;
    assert_eq!(body["data"]["view"], "webapp");
}

#[tokio::test]
async fn test_non_narrative_text_is_unsupported() {
    let fixture = TestFixture::with(FakeGenerativeApi::non_narrative(), &[]).await;
    fixture.open_inputs("Mathematics").await;
    fixture
        .put(
            "/api/session/inputs",
            json!({ "learned": "vectors", "goal": "matrices" }),
        )
        .await;

    let (status, body) = fixture.post("/api/session/generate", json!({})).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_SYNTHESIS");

    let (_, body) = fixture.get("/api/session").await;
    assert_eq!(body["data"]["view"], "inputs");
    assert!(body["data"]["inputError"]
        .as_str()
        .unwrap()
        .starts_with("This topic is not sequential"));
}

#[tokio::test]
async fn test_generation_failure_is_reported_inline() {
    let fixture = TestFixture::with(FakeGenerativeApi::failing("analyze"), &[]).await;
    fixture.open_inputs("Physics").await;
    fixture
        .put("/api/session/inputs", json!({ "url": VIDEO }))
        .await;

    let (status, body) = fixture.post("/api/session/generate", json!({})).await;
    assert_eq!(status, 502);
    assert_eq!(
        body["error"]["details"]["inputError"],
        "An error occurred: analyze exploded"
    );

    let (_, body) = fixture.get("/api/session").await;
    assert_eq!(body["data"]["isLoading"], false);
    assert!(body["data"]["content"].is_null());
}

#[tokio::test]
async fn test_pdf_upload_and_rejection() {
    let fixture = TestFixture::new().await;
    fixture.open_inputs("Physics").await;

    let text_part = reqwest::multipart::Part::bytes(b"hello".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .unwrap();
    let resp = fixture
        .client
        .post(fixture.url("/api/session/inputs/file"))
        .multipart(reqwest::multipart::Form::new().part("file", text_part))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Please upload a PDF file.");

    let pdf_part = reqwest::multipart::Part::bytes(b"%PDF-1.4".to_vec())
        .file_name("lecture.pdf")
        .mime_str(PDF_MIME_TYPE)
        .unwrap();
    let resp = fixture
        .client
        .post(fixture.url("/api/session/inputs/file"))
        .multipart(reqwest::multipart::Form::new().part("file", pdf_part))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["inputs"]["file"]["name"], "lecture.pdf");
    assert_eq!(body["data"]["inputs"]["locked"]["url"], true);
    assert!(body["data"]["inputError"].is_null());

    let (status, body) = fixture.delete("/api/session/inputs/file").await;
    assert_eq!(status, 200);
    assert!(body["data"]["inputs"]["file"].is_null());
}

#[tokio::test]
async fn test_demo_url_opens_simulation() {
    let fixture = TestFixture::new().await;
    fixture.open_inputs("History").await;
    fixture
        .put("/api/session/inputs", json!({ "url": SIMULATION_VIDEO_URL }))
        .await;

    let (status, body) = fixture.post("/api/session/generate", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "ww2game");
    assert_eq!(body["data"]["content"]["data"]["phase"], "select_country");
    assert!(fixture.api.calls().is_empty());

    let (status, body) = fixture
        .post(
            "/api/session/simulation/country",
            json!({ "countryId": "uk" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["content"]["data"]["phase"], "event");
    assert_eq!(body["data"]["content"]["data"]["playerCountry"]["id"], "uk");

    let (_, body) = fixture
        .post("/api/session/simulation/restart", json!({}))
        .await;
    assert_eq!(body["data"]["content"]["data"]["phase"], "select_country");
}

#[tokio::test]
async fn test_save_visibility_and_delete() {
    let fixture = TestFixture::new().await;
    let id = fixture.save_lesson("Biology", "Mitosis Quest").await;

    let (_, body) = fixture.get("/api/session").await;
    assert_eq!(body["data"]["view"], "inputs");

    let (_, body) = fixture.get("/api/library").await;
    assert_eq!(body["data"]["savedGames"].as_array().unwrap().len(), 1);

    // Share
    let (status, body) = fixture
        .post(&format!("/api/library/{}/visibility", id), json!({}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["isPublic"], true);
    let (_, body) = fixture.get("/api/community?q=mitosis").await;
    let shared = body["data"].as_array().unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0]["id"], id.as_str());
    assert_eq!(shared[0]["authorName"], "Anonymous");
    assert_eq!(shared[0]["averageRating"], 0.0);

    // Delete cascades to the community copy
    let (status, _) = fixture.delete(&format!("/api/library/{}", id)).await;
    assert_eq!(status, 200);
    let (_, body) = fixture.get("/api/community?q=mitosis").await;
    assert!(body["data"].as_array().unwrap().is_empty());
    let (_, body) = fixture.get("/api/library").await;
    assert!(body["data"]["savedGames"].as_array().unwrap().is_empty());

    let (status, body) = fixture.delete(&format!("/api/library/{}", id)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_rerating_replaces_previous_rating() {
    let fixture = TestFixture::new().await;
    let id = fixture.save_lesson("Biology", "Mitosis Quest").await;
    fixture
        .post(&format!("/api/library/{}/visibility", id), json!({}))
        .await;

    let (status, body) = fixture
        .post(&format!("/api/community/{}/rating", id), json!({ "rating": 4 }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["ratings"], json!({ "total": 4, "count": 1 }));
    assert_eq!(body["data"]["averageRating"], 4.0);

    let (_, body) = fixture
        .post(&format!("/api/community/{}/rating", id), json!({ "rating": 2 }))
        .await;
    assert_eq!(body["data"]["ratings"], json!({ "total": 2, "count": 1 }));
    assert_eq!(body["data"]["averageRating"], 2.0);

    let (_, body) = fixture.get("/api/community?q=mitosis").await;
    assert_eq!(body["data"][0]["userRating"], 2);

    let (status, _) = fixture
        .post(&format!("/api/community/{}/rating", id), json!({ "rating": 9 }))
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let fixture = TestFixture::new().await;
    let id = fixture.save_lesson("Biology", "Mitosis Quest").await;
    fixture
        .post(&format!("/api/library/{}/visibility", id), json!({}))
        .await;

    let (status, body) = fixture
        .post(&format!("/api/community/{}/rating", id), json!({ "rating": 300 }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = fixture.put("/api/session/page", json!({ "page": 7 })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, body) = fixture.get("/api/community?q=mitosis").await;
    assert_eq!(body["data"][0]["ratings"], json!({ "total": 0, "count": 0 }));
}

#[tokio::test]
async fn test_play_saved_and_top_rated_games() {
    let fixture = TestFixture::new().await;
    let id = fixture.save_lesson("Biology", "Mitosis Quest").await;
    fixture
        .put("/api/session/page", json!({ "page": "library" }))
        .await;

    let (status, body) = fixture
        .post("/api/session/play", json!({ "source": "saved", "id": id }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["activePage"], "generate");
    assert_eq!(body["data"]["view"], "game");
    assert_eq!(body["data"]["content"]["data"]["progress"]["status"], "playing");

    let (_, body) = fixture.get("/api/catalog/top-rated").await;
    let top_id = body["data"][0]["id"].as_str().unwrap().to_string();
    let (status, body) = fixture
        .post(
            "/api/session/play",
            json!({ "source": "top-rated", "id": top_id }),
        )
        .await;
    assert_eq!(status, 200);
    assert!(body["data"]["content"].is_object());

    let (status, _) = fixture
        .post(
            "/api/session/play",
            json!({ "source": "community", "id": "nope" }),
        )
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_favorites_and_settings_persist_across_restart() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture
        .post("/api/favorites/toggle", json!({ "title": "Chemistry" }))
        .await;
    assert_eq!(body["data"]["isFavorite"], true);

    let (_, body) = fixture
        .put(
            "/api/settings",
            json!({ "name": "Linus", "college": "Rice", "customPrompt": "" }),
        )
        .await;
    assert_eq!(body["data"]["name"], "Linus");
    assert!(!body["data"]["customPrompt"].as_str().unwrap().is_empty());

    // Reopen the same database in a fresh server.
    let TestFixture { temp_dir, .. } = fixture;
    let restarted = TestFixture::start(temp_dir, FakeGenerativeApi::narrative(), &[]).await;

    let (_, body) = restarted.get("/api/library").await;
    assert_eq!(body["data"]["favorites"], json!(["Chemistry"]));
    let (_, body) = restarted.get("/api/settings").await;
    assert_eq!(body["data"]["college"], "Rice");
}

#[tokio::test]
async fn test_corrupt_storage_starts_with_defaults() {
    let fixture = TestFixture::with(
        FakeGenerativeApi::narrative(),
        &[
            (StorageKey::SavedGames, "{\"broken\":"),
            (StorageKey::CommunityGames, "42"),
            (StorageKey::Favorites, "[\"Physics\"]"),
        ],
    )
    .await;

    let (status, body) = fixture.get("/api/library").await;
    assert_eq!(status, 200);
    assert!(body["data"]["savedGames"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["favorites"], json!(["Physics"]));

    let (_, body) = fixture.get("/api/community").await;
    let seeded: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|game| game["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        seeded,
        ["community-monsters-bounty", "community-gravity-sling", "community-cell-siege"]
    );
}

#[tokio::test]
async fn test_legacy_saved_game_without_visibility_flag() {
    let legacy = json!([{
        "id": "game-1",
        "name": "Old",
        "subject": "Physics",
        "type": "webapp",
        "data": { "spec": "s", "code": "c" }
    }])
    .to_string();
    let fixture = TestFixture::with(
        FakeGenerativeApi::narrative(),
        &[(StorageKey::SavedGames, legacy.as_str())],
    )
    .await;

    let (_, body) = fixture.get("/api/library").await;
    assert_eq!(body["data"]["savedGames"][0]["isPublic"], false);
}

#[tokio::test]
async fn test_catalog_subjects() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/catalog/subjects").await;
    assert_eq!(status, 200);
    let categories = body["data"].as_array().unwrap();
    assert!(!categories.is_empty());
    assert!(categories[0]["subjects"][0]["imageUrl"].is_string());
}
