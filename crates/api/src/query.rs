//! Shared query parameter types for API handlers.
//!
//! Raw strings from the query string are parsed into repository filters here
//! so that an unknown category or status is a 400 before any SQL runs.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use folio_core::content::{PostStatus, ProjectCategory, ProjectStatus};
use folio_core::error::CoreError;
use folio_core::ordering::ListSort;
use folio_core::pagination::clamp_page;
use folio_core::search::{normalize_query, parse_tag_param};
use folio_db::models::blog_post::PostFilter;
use folio_db::models::project::ProjectFilter;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// Query string extractor whose failures use the JSON error body.
///
/// `?page=abc` becomes a 400 `BAD_REQUEST` instead of axum's plain-text
/// rejection.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Listing parameters (`?page=&tag=a,b&category=&q=&status=&sort=`).
///
/// Public endpoints ignore `status`; the visibility gate is fixed for them.
/// `sort` accepts `-views`, `-created_at`, `-published_at`, `title`, and
/// `-likes`; anything else keeps the default order.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    /// Comma-separated tag list. Rows match when they carry any of them.
    pub tag: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    /// The clamped 1-based page number.
    pub fn page(&self) -> i64 {
        clamp_page(self.page)
    }

    /// Build a project filter. `public` pins the status to `completed`.
    pub fn project_filter(&self, public: bool) -> Result<ProjectFilter, CoreError> {
        let status = if public {
            ProjectFilter::public().status
        } else {
            parse_optional(self.status.as_deref(), ProjectStatus::from_str_db)?
        };
        Ok(ProjectFilter {
            status,
            category: parse_optional(self.category.as_deref(), ProjectCategory::from_str_db)?,
            tags: parse_tag_param(self.tag.as_deref()),
            q: normalize_query(self.q.as_deref()),
            sort: ListSort::from_param(self.sort.as_deref()),
        })
    }

    /// Build a post filter. `public` pins the status to `published`.
    pub fn post_filter(&self, public: bool) -> Result<PostFilter, CoreError> {
        let status = if public {
            PostFilter::public().status
        } else {
            parse_optional(self.status.as_deref(), PostStatus::from_str_db)?
        };
        Ok(PostFilter {
            status,
            tags: parse_tag_param(self.tag.as_deref()),
            q: normalize_query(self.q.as_deref()),
            sort: ListSort::from_param(self.sort.as_deref()),
        })
    }
}

/// Parse an optional query value, treating blank as absent.
fn parse_optional<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, CoreError>,
) -> Result<Option<T>, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => parse(value).map(Some),
        None => Ok(None),
    }
}

/// Comment moderation listing (`?pending_only=true&page=`).
#[derive(Debug, Default, Deserialize)]
pub struct PendingOnlyParams {
    #[serde(default)]
    pub pending_only: bool,
    pub page: Option<i64>,
}

/// Admin inbox listing (`?unread_only=true&page=`).
#[derive(Debug, Default, Deserialize)]
pub struct UnreadOnlyParams {
    #[serde(default)]
    pub unread_only: bool,
    pub page: Option<i64>,
}

/// Admin subscriber listing (`?active_only=true&page=`).
#[derive(Debug, Default, Deserialize)]
pub struct ActiveOnlyParams {
    #[serde(default)]
    pub active_only: bool,
    pub page: Option<i64>,
}

/// Global search (`?q=`).
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}
