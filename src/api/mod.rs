//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All directory endpoints are mounted under `/api/v1`; `/health` sits at
//! the root. With the `swagger-ui` feature the generated OpenAPI document
//! is browsable at `/swagger-ui`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "gigboard", description = "Venue and artist booking directory"),
    paths(
        handlers::venue::list_venues,
        handlers::venue::create_venue,
        handlers::venue::search_venues,
        handlers::venue::get_venue,
        handlers::venue::delete_venue,
        handlers::artist::list_artists,
        handlers::artist::create_artist,
        handlers::artist::search_artists,
        handlers::artist::get_artist,
        handlers::show::list_shows,
        handlers::show::create_show,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Venues", description = "Venue listing, search and booking pages"),
        (name = "Artists", description = "Artist listing, search and booking pages"),
        (name = "Shows", description = "Bookings of artists at venues"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::persistence::MemoryStore;
    use crate::service::DirectoryService;

    fn app() -> Router {
        let service = DirectoryService::new(Arc::new(MemoryStore::new()));
        build_router().with_state(AppState::new(service))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        };
        let Ok(request) = request else {
            panic!("bad request");
        };
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router failed");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::DELETE, uri, None).await
    }

    fn venue_body(name: &str) -> Value {
        json!({
            "name": name,
            "city": "San Francisco",
            "state": "CA",
            "address": "1015 Folsom Street",
            "genres": ["Jazz", "Reggae", "Swing"],
            "website": "https://www.themusicalhop.com",
            "seeking_talent": true,
        })
    }

    fn artist_body(name: &str) -> Value {
        json!({
            "name": name,
            "city": "San Francisco",
            "state": "CA",
            "genres": ["Rock n Roll"],
        })
    }

    fn show_body(venue_id: i64, artist_id: i64, start_time: &str) -> Value {
        json!({"venue_id": venue_id, "artist_id": artist_id, "start_time": start_time})
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = app();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn booking_flow_end_to_end() {
        let app = app();

        let (status, venue) = post(&app, "/api/v1/venues", venue_body("The Musical Hop")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(venue["id"], 1);
        assert_eq!(venue["genres"], json!(["Jazz", "Reggae", "Swing"]));

        let (status, artist) = post(&app, "/api/v1/artists", artist_body("Guns N Petals")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(artist["id"], 1);

        for start in ["2019-05-21T21:30:00Z", "2035-04-01T20:00:00Z"] {
            let (status, _) = post(&app, "/api/v1/shows", show_body(1, 1, start)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, detail) = get(&app, "/api/v1/venues/1?at=2030-01-01T00:00:00Z").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["past_shows_count"], 1);
        assert_eq!(detail["upcoming_shows_count"], 1);
        assert_eq!(detail["upcoming_shows"][0]["artist_name"], "Guns N Petals");

        let (status, groups) = get(&app, "/api/v1/venues?at=2030-01-01T00:00:00Z").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(groups[0]["city"], "San Francisco");
        assert_eq!(groups[0]["venues"][0]["upcoming_show_count"], 1);

        let (status, shows) = get(&app, "/api/v1/shows").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shows.as_array().map(Vec::len), Some(2));
        assert_eq!(shows[0]["venue_name"], "The Musical Hop");

        let (status, artists) = get(&app, "/api/v1/artists").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(artists, json!([{"id": 1, "name": "Guns N Petals"}]));
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let app = app();
        for name in [
            "The Musical Hop",
            "The Dueling Pianos Bar",
            "Park Square Live Music & Coffee",
        ] {
            let (status, _) = post(&app, "/api/v1/venues", venue_body(name)).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (status, body) = get(&app, "/api/v1/venues/search?search_term=Music").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);

        let (_, body) = get(&app, "/api/v1/venues/search?search_term=hop").await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["name"], "The Musical Hop");

        let (_, body) = get(&app, "/api/v1/venues/search").await;
        assert_eq!(body["count"], 3);

        let (_, body) = get(&app, "/api/v1/artists/search?search_term=band").await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn error_statuses_map_from_directory_errors() {
        let app = app();

        let (status, body) = post(&app, "/api/v1/venues", json!({"city": "Nowhere"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);

        let (status, body) = post(&app, "/api/v1/shows", show_body(1, 1, "next tuesday")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1002);

        let (status, body) =
            post(&app, "/api/v1/shows", show_body(9, 9, "2035-04-01T20:00:00Z")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 1003);

        let (status, body) = get(&app, "/api/v1/venues/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 2001);

        let (status, _) = get(&app, "/api/v1/artists/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_requests_are_validation_errors() {
        let app = app();

        let wrong_type = json!({
            "venue_id": "1",
            "artist_id": 1,
            "start_time": "2035-04-01T20:00:00Z",
        });
        let (status, body) = post(&app, "/api/v1/shows", wrong_type).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);

        let mut venue = venue_body("The Musical Hop");
        venue["seeking_talent"] = json!("yes");
        let (status, body) = post(&app, "/api/v1/venues", venue).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);

        let (status, body) = get(&app, "/api/v1/venues/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);

        let (status, body) = delete(&app, "/api/v1/venues/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);

        let (status, body) = get(&app, "/api/v1/artists/1?at=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);
    }

    #[tokio::test]
    async fn delete_venue_statuses() {
        let app = app();
        post(&app, "/api/v1/venues", venue_body("The Musical Hop")).await;
        post(&app, "/api/v1/venues", venue_body("Park Square")).await;
        post(&app, "/api/v1/artists", artist_body("Matt Quevedo")).await;
        post(&app, "/api/v1/shows", show_body(1, 1, "2035-04-01 20:00:00")).await;

        let (status, body) = delete(&app, "/api/v1/venues/1").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], 2003);

        let (status, _) = delete(&app, "/api/v1/venues/2").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = delete(&app, "/api/v1/venues/2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn openapi_lists_every_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/venues",
            "/api/v1/venues/search",
            "/api/v1/venues/{id}",
            "/api/v1/artists",
            "/api/v1/artists/search",
            "/api/v1/artists/{id}",
            "/api/v1/shows",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
