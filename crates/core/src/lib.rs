//! Domain rules for the portfolio content service.
//!
//! Pure logic with no database or network access: closed enumerations,
//! derived values (reading time, slugs, experience duration), listing order,
//! pagination, and intake validation. Used by the `db`, `events`, and `api`
//! crates alike.

pub mod content;
pub mod error;
pub mod experience;
pub mod ordering;
pub mod pagination;
pub mod reading_time;
pub mod search;
pub mod slug;
pub mod types;
pub mod validation;
pub mod views;
