//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod achievement;
pub mod blog_comment;
pub mod blog_post;
pub mod contact_message;
pub mod experience;
pub mod newsletter;
pub mod project;
pub mod service;
pub mod site_settings;
pub mod skill;
pub mod tag;
pub mod testimonial;
