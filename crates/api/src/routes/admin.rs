//! Admin CRUD routes. Every handler behind these requires an admin JWT.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{
    achievements, comments, experiences, messages, newsletter, posts, projects, services, settings,
    skills, testimonials,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET, PUT          /settings
/// GET, POST         /{resource}
/// GET, PUT, DELETE  /{resource}/{id}
///     resource = skills | experiences | projects | posts
///              | testimonials | services | achievements
/// GET               /messages?unread_only=&page=
/// GET, DELETE       /messages/{id}
/// PUT               /messages/{id}/read
/// GET               /comments?pending_only=&page=
/// DELETE            /comments/{id}
/// PUT               /comments/{id}/approval
/// GET               /subscribers?active_only=&page=
/// DELETE            /subscribers/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings::get).put(settings::update))
        // Skills
        .route("/skills", get(skills::list).post(skills::create))
        .route(
            "/skills/{id}",
            get(skills::get_by_id)
                .put(skills::update)
                .delete(skills::delete),
        )
        // Experiences
        .route("/experiences", get(experiences::list).post(experiences::create))
        .route(
            "/experiences/{id}",
            get(experiences::get_by_id)
                .put(experiences::update)
                .delete(experiences::delete),
        )
        // Projects
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        // Posts
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::get_by_id)
                .put(posts::update)
                .delete(posts::delete),
        )
        // Testimonials
        .route(
            "/testimonials",
            get(testimonials::list).post(testimonials::create),
        )
        .route(
            "/testimonials/{id}",
            get(testimonials::get_by_id)
                .put(testimonials::update)
                .delete(testimonials::delete),
        )
        // Services
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/{id}",
            get(services::get_by_id)
                .put(services::update)
                .delete(services::delete),
        )
        // Achievements
        .route(
            "/achievements",
            get(achievements::list).post(achievements::create),
        )
        .route(
            "/achievements/{id}",
            get(achievements::get_by_id)
                .put(achievements::update)
                .delete(achievements::delete),
        )
        // Inbox
        .route("/messages", get(messages::list))
        .route(
            "/messages/{id}",
            get(messages::get_by_id).delete(messages::delete),
        )
        .route("/messages/{id}/read", put(messages::mark_read))
        // Comments
        .route("/comments", get(comments::list))
        .route("/comments/{id}", delete(comments::delete))
        .route("/comments/{id}/approval", put(comments::set_approval))
        // Subscribers
        .route("/subscribers", get(newsletter::list))
        .route("/subscribers/{id}", delete(newsletter::delete))
}
