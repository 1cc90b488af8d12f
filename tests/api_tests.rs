//! API integration tests over the in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_server::{
    api,
    config::{AppConfig, StoreBackend},
    repository::{MemoryStore, Repository},
    services::Services,
    AppState,
};

fn app() -> Router {
    let repository: Repository = Arc::new(MemoryStore::new());
    let mut config = AppConfig::default();
    config.database.backend = StoreBackend::Memory;
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(repository)),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn create_author(app: &Router, first: &str, last: &str) -> String {
    let (status, body) = post(
        app,
        "/author/create",
        json!({ "first_name": first, "last_name": last, "date_of_birth": "1920-10-08" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["author"]["id"].as_str().unwrap().to_string()
}

async fn create_book(app: &Router, title: &str, author: &str, genre: Value) -> String {
    let (status, body) = post(
        app,
        "/book/create",
        json!({
            "title": title,
            "summary": "A summary",
            "author": author,
            "isbn": "9780441013593",
            "genre": genre,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["book"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_book_with_free_text_genre() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;

    let (status, body) = post(
        &app,
        "/book/create",
        json!({
            "title": "Dune",
            "summary": "Spice",
            "author": author,
            "isbn": "9780441013593",
            "genre": "SciFi",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["title"], "Dune");
    assert_eq!(body["book"]["genre"], json!(["SciFi"]));
    assert_eq!(body["book"]["author"], author.as_str());

    let id = body["book"]["id"].as_str().unwrap();
    let (status, detail) = get(&app, &format!("/book/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["book"]["author"]["name"], "Herbert, Frank");
    assert_eq!(detail["book"]["genre"], json!([]));
    assert_eq!(detail["bookInstances"], json!([]));
}

#[tokio::test]
async fn test_book_detail_expands_genres() {
    let app = app();
    let author = create_author(&app, "Ursula", "LeGuin").await;
    let (_, genre) = post(&app, "/genre/create", json!({ "name": "Fantasy" })).await;
    let genre_id = genre["genre"]["id"].as_str().unwrap().to_string();

    let book = create_book(&app, "Earthsea", &author, json!([genre_id])).await;

    let (_, detail) = get(&app, &format!("/book/{}", book)).await;
    assert_eq!(detail["book"]["genre"][0]["name"], "Fantasy");
    assert_eq!(detail["book"]["genre"][0]["url"], format!("/genre/{}", genre_id));

    let (_, genre_detail) = get(&app, &format!("/genre/{}", genre_id)).await;
    assert_eq!(genre_detail["genreBooks"][0]["title"], "Earthsea");
}

#[tokio::test]
async fn test_book_list_sorted_by_title() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;
    for title in ["dune", "Children of Dune", "Dune", "another"] {
        create_book(&app, title, &author, json!([])).await;
    }

    let (status, body) = get(&app, "/books").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["another", "Children of Dune", "dune", "Dune"]);
    assert_eq!(body[0]["author"]["name"], "Herbert, Frank");
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let app = app();
    let author = create_author(&app, "Isaac", "Asimov").await;
    create_book(&app, "Foundation", &author, json!([])).await;

    let (status, body) = post(&app, "/author/delete", json!({ "id": author })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["author"],
        "Unable to delete author, Author has books associated with it"
    );

    let (status, detail) = get(&app, &format!("/author/{}", author)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["author_books"][0]["title"], "Foundation");
}

#[tokio::test]
async fn test_genre_with_books_cannot_be_deleted() {
    let app = app();
    let author = create_author(&app, "Isaac", "Asimov").await;
    let (_, genre) = post(&app, "/genre/create", json!({ "name": "SciFi" })).await;
    let genre_id = genre["genre"]["id"].as_str().unwrap().to_string();
    create_book(&app, "Foundation", &author, json!(genre_id)).await;

    let (status, body) = post(&app, "/genre/delete", json!({ "id": genre_id })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["genre"],
        "Unable to delete genre, Genre has books associated with it"
    );

    let (_, genres) = get(&app, "/genres").await;
    assert_eq!(genres.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_book_delete_guard_and_not_found() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;
    let book = create_book(&app, "Dune", &author, json!([])).await;

    let (_, copy) = post(
        &app,
        "/bookinstance/create",
        json!({ "book": book, "imprint": "Chilton, 1965", "status": "Available" }),
    )
    .await;
    let copy_id = copy["bookInstance"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, "/book/delete", json!({ "id": book })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["book"], "Unable to delete book, this book has copies");

    let (status, body) = post(&app, "/bookinstance/delete", json!({ "id": copy_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookInstance"], "Book copy has been deleted");

    let (status, body) = post(&app, "/book/delete", json!({ "id": book })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"], "Book deleted");

    let (status, body) = get(&app, &format!("/book/{}", book)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_duplicate_genre_conflict() {
    let app = app();

    let (status, _) = post(&app, "/genre/create", json!({ "name": "Poetry" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/genre/create", json!({ "name": "  Poetry " })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": { "name": "Genre Already exists" } }));

    let (_, genres) = get(&app, "/genres").await;
    assert_eq!(genres.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_author_is_echoed_and_not_saved() {
    let app = app();

    let (status, body) = post(
        &app,
        "/author/create",
        json!({ "first_name": "Isaac", "last_name": "Asimov", "date_of_birth": "not-a-date" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!({ "date_of_birth": "Invalid date of birth" }));
    assert_eq!(body["author"]["first_name"], "Isaac");
    assert_eq!(body["author"]["date_of_birth"], "Invalid date");

    let (_, authors) = get(&app, "/authors").await;
    assert_eq!(authors, json!([]));
}

#[tokio::test]
async fn test_author_update_keeps_id() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;

    let (status, body) = post(
        &app,
        &format!("/author/{}/update", author),
        json!({
            "first_name": "Frank",
            "last_name": "Herbert",
            "date_of_birth": "1920-10-08",
            "date_of_death": "1986-02-11",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["id"], author.as_str());
    assert_eq!(body["author"]["date_of_death"], "1986-02-11");

    let (_, authors) = get(&app, "/authors").await;
    assert_eq!(authors[0]["lifespan"], "1920-10-08 - 1986-02-11");
}

#[tokio::test]
async fn test_book_instance_date_formats() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;
    let book = create_book(&app, "Dune", &author, json!([])).await;

    let (status, body) = post(
        &app,
        "/bookinstance/create",
        json!({ "book": book, "imprint": "Chilton, 1965", "status": "Loaned", "due_back": "2021-06-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookInstance"]["status"], "Loaned");
    let id = body["bookInstance"]["id"].as_str().unwrap().to_string();

    let (_, list) = get(&app, "/bookinstances").await;
    assert_eq!(list[0]["due_back"], "June 1st 2021");
    assert_eq!(list[0]["book"]["title"], "Dune");

    let (_, detail) = get(&app, &format!("/bookinstance/{}", id)).await;
    assert_eq!(detail["bookInstance"]["due_back"], "2021-06-01");
    assert_eq!(detail["bookInstance"]["book"]["title"], "Dune");
}

#[tokio::test]
async fn test_book_instance_status_defaults_to_maintenance() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;
    let book = create_book(&app, "Dune", &author, json!([])).await;

    let (status, body) = post(
        &app,
        "/bookinstance/create",
        json!({ "book": book, "imprint": "Ace, 1990" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookInstance"]["status"], "Maintenance");
    assert_eq!(body["bookInstance"]["due_back"], "");

    let (status, body) = post(
        &app,
        "/bookinstance/create",
        json!({ "book": book, "imprint": "Ace, 1990", "status": "Lost" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], "Invalid status");
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;
    let book = create_book(&app, "Dune", &author, json!([])).await;
    post(&app, "/genre/create", json!({ "name": "SciFi" })).await;
    for status in ["Available", "Loaned", "Available"] {
        post(
            &app,
            "/bookinstance/create",
            json!({ "book": book, "imprint": "Ace", "status": status }),
        )
        .await;
    }

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "bookCount": 1,
            "bookInstanceCount": 3,
            "bookInstanceAvailableCount": 2,
            "authorCount": 1,
            "genreCount": 1,
        })
    );
}

#[tokio::test]
async fn test_malformed_id_is_a_server_error() {
    let app = app();

    let (status, body) = get(&app, "/author/not-a-uuid").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_author_delete_then_not_found() {
    let app = app();
    let author = create_author(&app, "Isaac", "Asimov").await;

    let (status, body) = post(&app, "/author/delete", json!({ "id": author })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"], "Author deleted");

    let (status, body) = get(&app, &format!("/author/{}", author)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Author not found");
}

#[tokio::test]
async fn test_genre_delete_then_not_found() {
    let app = app();
    let (_, genre) = post(&app, "/genre/create", json!({ "name": "Poetry" })).await;
    let genre_id = genre["genre"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, "/genre/delete", json!({ "id": genre_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genre"], "Genre deleted");

    let (status, body) = get(&app, &format!("/genre/{}", genre_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Genre not found");
}

#[tokio::test]
async fn test_book_instance_update_changes_status() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;
    let book = create_book(&app, "Dune", &author, json!([])).await;
    let (_, copy) = post(
        &app,
        "/bookinstance/create",
        json!({ "book": book, "imprint": "Ace, 1990", "status": "Available" }),
    )
    .await;
    let id = copy["bookInstance"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(
        &app,
        &format!("/bookinstance/{}/update", id),
        json!({ "book": book, "imprint": "Ace, 1990", "status": "Loaned", "due_back": "2021-06-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookInstance"]["id"], id.as_str());
    assert_eq!(body["bookInstance"]["status"], "Loaned");
    assert_eq!(body["bookInstance"]["due_back"], "2021-06-01");

    let (_, detail) = get(&app, &format!("/bookinstance/{}", id)).await;
    assert_eq!(detail["bookInstance"]["status"], "Loaned");

    let (_, counts) = get(&app, "/").await;
    assert_eq!(counts["bookInstanceAvailableCount"], 0);
}

#[tokio::test]
async fn test_book_update_wraps_scalar_genre() {
    let app = app();
    let author = create_author(&app, "Frank", "Herbert").await;
    let (_, genre) = post(&app, "/genre/create", json!({ "name": "SciFi" })).await;
    let genre_id = genre["genre"]["id"].as_str().unwrap().to_string();
    let book = create_book(&app, "Dune", &author, json!([])).await;

    let (status, body) = post(
        &app,
        &format!("/book/{}/update", book),
        json!({
            "title": "Dune",
            "summary": "Spice",
            "author": author,
            "isbn": "9780441013593",
            "genre": genre_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["id"], book.as_str());
    assert_eq!(body["book"]["genre"], json!([genre_id]));

    let (_, detail) = get(&app, &format!("/book/{}", book)).await;
    assert_eq!(detail["book"]["genre"][0]["name"], "SciFi");
}

#[tokio::test]
async fn test_reduced_precision_birth_date() {
    let app = app();

    let (status, body) = post(
        &app,
        "/author/create",
        json!({ "first_name": "Frank", "last_name": "Herbert", "date_of_birth": "1920" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["author"]["date_of_birth"], "1920-01-01");

    let (status, body) = post(
        &app,
        "/author/create",
        json!({ "first_name": "Frank", "last_name": "Herbert", "date_of_birth": "1920-6-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["date_of_birth"], "Invalid date of birth");
}

#[tokio::test]
async fn test_mistyped_body_is_a_json_bad_request() {
    let app = app();

    let (status, body) = post(
        &app,
        "/author/create",
        json!({ "first_name": 5, "last_name": "Herbert", "date_of_birth": "1920-10-08" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].as_str().unwrap().contains("first_name"));

    let (_, authors) = get(&app, "/authors").await;
    assert_eq!(authors, json!([]));
}
