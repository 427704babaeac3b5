//! `TmdbFetcher` against a local catalog double.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use series_contracts::MediaFetcher;
use series_core::TmdbFetcher;
use series_model::MediaType;

async fn serve() -> String {
    let app = Router::new()
        .route(
            "/3/movie/{id}",
            get(
                |Path(id): Path<String>,
                 Query(query): Query<HashMap<String, String>>| async move {
                    if query.get("api_key").map(String::as_str) != Some("secret") {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    if id == "404" {
                        return Err(StatusCode::NOT_FOUND);
                    }
                    Ok(Json(json!({
                        "id": id,
                        "title": "Dune",
                        "language": query.get("language"),
                    })))
                },
            ),
        )
        .route(
            "/3/tv/{id}/season/{season}/episode/{episode}",
            get(|Path((id, season, episode)): Path<(String, u32, u32)>| async move {
                Json(json!({"show": id, "season_number": season, "episode_number": episode, "name": "Pilot"}))
            }),
        )
        .route("/3/tv/{id}", get(|| async { "not json" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind catalog double");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}/3")
}

fn fetcher() -> TmdbFetcher {
    TmdbFetcher::new(Some("secret".into()), Some("es-ES".into())).expect("client")
}

#[tokio::test]
async fn movie_details_carry_credentials_and_language() {
    let base = serve().await;

    let metadata = fetcher()
        .fetch_media_details(&base, Some(&MediaType::Movie), Some("438631"), None, None, None)
        .await
        .expect("movie metadata");

    assert_eq!(metadata.title(), Some("Dune"));
    assert_eq!(metadata.raw()["language"], Value::from("es-ES"));
}

#[tokio::test]
async fn episode_details_use_nested_path() {
    let base = serve().await;

    let metadata = fetcher()
        .fetch_media_details(&base, Some(&MediaType::Tv), Some("1399"), Some(1), Some(1), Some("standard"))
        .await
        .expect("episode metadata");

    assert_eq!(metadata.raw()["show"], Value::from("1399"));
    assert_eq!(metadata.raw()["season_number"], Value::from(1));
    assert_eq!(metadata.title(), Some("Pilot"));
}

#[tokio::test]
async fn failures_collapse_to_none() {
    let base = serve().await;

    let not_found = fetcher()
        .fetch_media_details(&base, Some(&MediaType::Movie), Some("404"), None, None, None)
        .await;
    assert!(not_found.is_none());

    let unauthorized = TmdbFetcher::new(None, None)
        .expect("client")
        .fetch_media_details(&base, Some(&MediaType::Movie), Some("1"), None, None, None)
        .await;
    assert!(unauthorized.is_none());

    let bad_body = fetcher()
        .fetch_media_details(&base, Some(&MediaType::Tv), Some("1"), None, None, None)
        .await;
    assert!(bad_body.is_none());
}
