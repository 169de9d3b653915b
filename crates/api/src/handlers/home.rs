//! Aggregate reads: the home page payload and global search.

use axum::extract::State;
use axum::Json;
use folio_core::search::{
    normalize_query, SEARCH_POST_LIMIT, SEARCH_PROJECT_LIMIT, SEARCH_SERVICE_LIMIT,
};
use folio_db::models::blog_post::{BlogPostView, PostFilter};
use folio_db::models::project::{Project, ProjectFilter};
use folio_db::models::service::Service;
use folio_db::models::site_settings::SiteSettings;
use folio_db::models::skill::Skill;
use folio_db::models::testimonial::Testimonial;
use folio_db::repositories::{
    BlogPostRepo, ProjectRepo, ServiceRepo, SiteSettingsRepo, SkillRepo, TestimonialRepo,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{QueryParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

const HOME_FEATURED_PROJECTS: i64 = 6;
const HOME_RECENT_POSTS: i64 = 3;

#[derive(Debug, Serialize)]
pub struct HomeStats {
    pub total_projects: i64,
    pub total_posts: i64,
}

/// Everything the landing page renders, in one response.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub settings: SiteSettings,
    pub featured_projects: Vec<Project>,
    pub featured_skills: Vec<Skill>,
    /// Empty when `enable_testimonials` is off.
    pub testimonials: Vec<Testimonial>,
    pub services: Vec<Service>,
    /// Empty when `enable_blog` is off.
    pub recent_posts: Vec<BlogPostView>,
    pub stats: HomeStats,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: Option<String>,
    pub projects: Vec<Project>,
    pub posts: Vec<BlogPostView>,
    pub services: Vec<Service>,
    pub total_results: usize,
}

/// GET /api/v1/home
pub async fn home(State(state): State<AppState>) -> AppResult<Json<DataResponse<HomePage>>> {
    let pool = &state.pool;
    let settings = SiteSettingsRepo::get_or_create(pool).await?;

    let testimonials = if settings.enable_testimonials {
        TestimonialRepo::list_approved(pool).await?
    } else {
        Vec::new()
    };
    let recent_posts = if settings.enable_blog {
        BlogPostRepo::list_recent(pool, HOME_RECENT_POSTS)
            .await?
            .into_iter()
            .map(BlogPostView::from)
            .collect()
    } else {
        Vec::new()
    };

    let stats = HomeStats {
        total_projects: ProjectRepo::count(pool, &ProjectFilter::public()).await?,
        total_posts: BlogPostRepo::count(pool, &PostFilter::public()).await?,
    };

    let page = HomePage {
        featured_projects: ProjectRepo::list_featured(pool, HOME_FEATURED_PROJECTS).await?,
        featured_skills: SkillRepo::list_featured(pool).await?,
        testimonials,
        services: ServiceRepo::list_active(pool).await?,
        recent_posts,
        stats,
        settings,
    };

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/search?q=
///
/// Searches public projects, published posts, and active services. A blank
/// query returns empty result sets rather than everything.
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<Json<DataResponse<SearchResults>>> {
    let Some(q) = normalize_query(params.q.as_deref()) else {
        return Ok(Json(DataResponse {
            data: SearchResults {
                query: None,
                projects: Vec::new(),
                posts: Vec::new(),
                services: Vec::new(),
                total_results: 0,
            },
        }));
    };

    let pool = &state.pool;
    let project_filter = ProjectFilter {
        q: Some(q.clone()),
        ..ProjectFilter::public()
    };
    let post_filter = PostFilter {
        q: Some(q.clone()),
        ..PostFilter::public()
    };

    let projects = ProjectRepo::list(pool, &project_filter, SEARCH_PROJECT_LIMIT, 0).await?;
    let posts: Vec<BlogPostView> = BlogPostRepo::list(pool, &post_filter, SEARCH_POST_LIMIT, 0)
        .await?
        .into_iter()
        .map(BlogPostView::from)
        .collect();
    let services = ServiceRepo::search(pool, &q, SEARCH_SERVICE_LIMIT).await?;

    let total_results = projects.len() + posts.len() + services.len();
    tracing::debug!(query = %q, total_results, "Search executed");

    Ok(Json(DataResponse {
        data: SearchResults {
            query: Some(q),
            projects,
            posts,
            services,
            total_results,
        },
    }))
}
