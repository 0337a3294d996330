use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{self, SecurityConfig};
use crate::database::models::{Lookup, Product, Role, Service, Status};
use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    let cfg = config::config();

    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(DefaultBodyLimit::max(cfg.api.max_request_size_bytes))
        .layer(cors_layer(&cfg.security, crate::is_development!()));

    with_request_logging(router, cfg.api.enable_request_logging).with_state(state)
}

/// Per-request spans and status logging, switched by `api.enable_request_logging`
fn with_request_logging<S>(router: Router<S>, enabled: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if enabled {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/auth/login", post(public::auth::login))
        .route("/auth/register", post(public::auth::register))
}

fn protected_routes() -> Router<AppState> {
    use protected::{auth, board, tickets, users};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/board", get(board::board))
        .route("/api/tickets", get(tickets::list).post(tickets::create))
        .route("/api/tickets/new", get(tickets::form))
        .route("/api/tickets/:id", get(tickets::show).delete(tickets::delete))
        .route("/api/users/:id", get(users::show).delete(users::delete))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn admin_routes() -> Router<AppState> {
    use elevated::{board, notes, tickets, users};

    let router = Router::new()
        .route("/api/admin", get(board::board))
        .route("/api/admin/users", get(users::list))
        .route("/api/admin/users/:id", get(users::show))
        .route("/api/admin/tickets", get(tickets::list))
        .route(
            "/api/admin/tickets/:id",
            get(tickets::show).put(tickets::update).delete(tickets::delete),
        )
        .route("/api/admin/tickets/:id/notes", post(notes::create))
        .route("/api/admin/notes", get(notes::list))
        .route("/api/admin/notes/:id", axum::routing::delete(notes::delete));

    let router = lookup_routes::<Product>(router);
    let router = lookup_routes::<Service>(router);
    let router = lookup_routes::<Role>(router);
    let router = lookup_routes::<Status>(router);

    // Layers run bottom-up: authenticate first, then check the admin claim
    router
        .route_layer(from_fn(require_admin_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

/// `/api/admin/<table>` collection and member routes for one reference kind
fn lookup_routes<T: Lookup>(router: Router<AppState>) -> Router<AppState> {
    use elevated::lookups;

    let collection = format!("/api/admin/{}", T::TABLE);
    let member = format!("{}/:id", collection);

    router
        .route(&collection, get(lookups::list::<T>).post(lookups::create::<T>))
        .route(
            &member,
            get(lookups::show::<T>)
                .put(lookups::update::<T>)
                .delete(lookups::delete::<T>),
        )
}

fn cors_layer(security: &SecurityConfig, development: bool) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn ping(enabled: bool) -> StatusCode {
        let router: Router =
            with_request_logging(Router::new().route("/", get(|| async { "ok" })), enabled);
        router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn serves_with_and_without_request_logging() {
        assert_eq!(ping(true).await, StatusCode::OK);
        assert_eq!(ping(false).await, StatusCode::OK);
    }
}
