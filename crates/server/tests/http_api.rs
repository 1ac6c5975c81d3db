use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use server::{AppState, build_router};
use services::{HttpTriviaApi, HttpTriviaConfig, TriviaApi};
use storage::Storage;
use storage::seed::{default_drafts, seed_default_questions};
use trivia_core::model::NewGameSession;
use trivia_core::time::fixed_clock;

async fn spawn_app(seed: bool) -> SocketAddr {
    let storage = Storage::in_memory();
    if seed {
        seed_default_questions(storage.questions.as_ref(), &fixed_clock())
            .await
            .expect("seed");
    }
    let app = build_router(AppState::new(fixed_clock(), &storage));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}

fn question_body(category: &str) -> Value {
    json!({
        "category": category,
        "text": "Which city did she return to?",
        "optionA": "Mumbai, India",
        "optionB": "Delhi, India",
        "optionC": "London, UK",
        "optionD": "Dubai, UAE",
        "correctAnswer": "A"
    })
}

#[tokio::test]
async fn question_crud_status_codes() {
    let addr = spawn_app(false).await;
    let client = Client::new();

    let created = client
        .post(url(addr, "/api/questions"))
        .json(&question_body("Personal"))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["difficulty"], "medium");
    let id = created["id"].as_str().unwrap().to_owned();

    client
        .post(url(addr, "/api/questions"))
        .json(&question_body("Career"))
        .send()
        .await
        .unwrap();

    let personal: Vec<Value> = client
        .get(url(addr, "/api/questions?category=Personal"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(personal.len(), 1);

    let updated = client
        .put(url(addr, &format!("/api/questions/{id}")))
        .json(&json!({ "correctAnswer": "C", "difficulty": "hard" }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["correctAnswer"], "C");
    assert_eq!(updated["text"], "Which city did she return to?");

    let deleted = client
        .delete(url(addr, &format!("/api/questions/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = client
        .delete(url(addr, &format!("/api/questions/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["message"], "Question not found");
}

#[tokio::test]
async fn invalid_payloads_are_bad_requests() {
    let addr = spawn_app(false).await;
    let client = Client::new();

    let mut blank = question_body("Career");
    blank["optionB"] = json!("   ");
    let response = client
        .post(url(addr, "/api/questions"))
        .json(&blank)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "optionB");

    let response = client
        .post(url(addr, "/api/questions"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(url(addr, &format!("/api/questions/{}", uuid_like())))
        .json(&json!({ "id": "sneaky" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(url(addr, "/api/questions/42"))
        .json(&json!({ "text": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(url(addr, &format!("/api/questions/{}", uuid_like())))
        .json(&json!({ "text": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .post(url(addr, "/api/game-sessions"))
        .json(&json!({ "playerName": "", "score": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "playerName");

    let response = client
        .get(url(addr, "/api/leaderboard?limit=lots"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn uuid_like() -> &'static str {
    "5b6f2c1e-8a4d-4b7e-9c3a-1d2e3f4a5b6c"
}

#[tokio::test]
async fn leaderboard_and_analytics_reflect_recorded_games() {
    let addr = spawn_app(true).await;
    let client = Client::new();

    for (name, score) in [("Aarav", 300), ("Meera", 900), ("Kabir", 300)] {
        let response = client
            .post(url(addr, "/api/game-sessions"))
            .json(&json!({
                "playerName": name,
                "score": score,
                "correctAnswers": score / 100,
                "totalQuestions": 18
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let top: Vec<Value> = client
        .get(url(addr, "/api/leaderboard?limit=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = top.iter().map(|e| e["playerName"].clone()).collect();
    assert_eq!(names, vec![json!("Meera"), json!("Aarav")]);

    let analytics: Value = client
        .get(url(addr, "/api/analytics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["totalQuestions"], default_drafts().len());
    assert_eq!(analytics["totalPlayers"], 3);
}

#[tokio::test]
async fn http_client_round_trips_against_live_server() {
    let addr = spawn_app(true).await;
    let api = HttpTriviaApi::new(&HttpTriviaConfig::new(format!("http://{addr}"))).unwrap();

    let questions = api.fetch_questions().await.unwrap();
    assert_eq!(questions.len(), default_drafts().len());

    let tally = NewGameSession {
        player_name: "Ishita".into(),
        score: 500,
        correct_answers: 5,
        total_questions: u32::try_from(questions.len()).unwrap(),
    };
    let record = api.submit_session(&tally).await.unwrap();
    assert_eq!(record.player_name, "Ishita");

    let top = api.leaderboard(Some(5)).await.unwrap();
    assert_eq!(top, vec![record]);
    assert_eq!(api.analytics().await.unwrap().total_players, 1);

    let rejected = NewGameSession {
        player_name: "  ".into(),
        ..tally
    };
    assert!(api.submit_session(&rejected).await.is_err());
}
