//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

mod listing;

pub mod achievement_repo;
pub mod blog_comment_repo;
pub mod blog_post_repo;
pub mod contact_message_repo;
pub mod experience_repo;
pub mod newsletter_repo;
pub mod project_repo;
pub mod service_repo;
pub mod site_settings_repo;
pub mod skill_repo;
pub mod testimonial_repo;

pub use achievement_repo::AchievementRepo;
pub use blog_comment_repo::BlogCommentRepo;
pub use blog_post_repo::BlogPostRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use experience_repo::ExperienceRepo;
pub use newsletter_repo::{NewsletterRepo, SubscribeParams};
pub use project_repo::ProjectRepo;
pub use service_repo::ServiceRepo;
pub use site_settings_repo::SiteSettingsRepo;
pub use skill_repo::SkillRepo;
pub use testimonial_repo::TestimonialRepo;
