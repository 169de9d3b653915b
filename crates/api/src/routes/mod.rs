pub mod admin;
pub mod auth;
pub mod health;
pub mod intake;
pub mod posts;
pub mod projects;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
///
/// /home                                landing page aggregate
/// /search?q=                           projects, posts, services
/// /settings                            site settings singleton
/// /projects?sort=                     completed projects (paginated)
/// /projects/tags                       tag cloud
/// /projects/{slug}                     detail, counts a view
/// /projects/{slug}/related             up to three related projects
/// /projects/{slug}/like                add a like (POST)
/// /posts?sort=                        published posts (paginated)
/// /posts/tags                          tag cloud
/// /posts/{slug}                        detail, counts a view
/// /posts/{slug}/related                up to three related posts
/// /posts/{slug}/like                   add a like (POST)
/// /posts/{slug}/comments               approved thread (GET), submit (POST)
/// /skills                              active skills
/// /experiences                         experience with derived duration
/// /testimonials                        approved testimonials
/// /services                            active services
/// /achievements                        achievements, newest first
///
/// /contact                             contact form intake (POST)
/// /newsletter/subscribe                subscribe (POST)
/// /newsletter/unsubscribe              unsubscribe (POST)
/// /newsletter/verify/{token}           confirm address (GET)
///
/// /admin/...                           admin CRUD, see `admin::router`
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/home", get(handlers::home::home))
        .route("/search", get(handlers::home::search))
        .route("/settings", get(handlers::settings::get_public))
        .nest("/projects", projects::router())
        .nest("/posts", posts::router())
        .route("/skills", get(handlers::skills::list_public))
        .route("/experiences", get(handlers::experiences::list_public))
        .route("/testimonials", get(handlers::testimonials::list_public))
        .route("/services", get(handlers::services::list_public))
        .route("/achievements", get(handlers::achievements::list_public))
        .merge(intake::router())
        .nest("/admin", admin::router())
}
