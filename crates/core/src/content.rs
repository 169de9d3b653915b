//! Closed enumerations for portfolio content.
//!
//! Every enum here is stored as `TEXT` in Postgres (guarded by a `CHECK`
//! constraint in the migrations) and serialized as `snake_case` on the wire.
//! [`as_str`](ProjectStatus::as_str) and
//! [`from_str_db`](ProjectStatus::from_str_db) are the only conversions the
//! repository and handler layers use.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Declares a closed, string-backed enumeration with `as_str`, `from_str_db`,
/// `ALL`, and `Display`.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Convert to the database / wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value ),+
                }
            }

            /// Parse a value read from the database or a query string.
            pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
                match s {
                    $( $value => Ok(Self::$variant), )+
                    _ => Err(CoreError::Validation(format!(
                        "Invalid {} '{s}'. Must be one of: {}",
                        $label,
                        Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set! {
    /// Lifecycle of a portfolio project. Only `Completed` is publicly listed.
    ProjectStatus, "project status" {
        Planned => "planned",
        InProgress => "in_progress",
        Completed => "completed",
        Archived => "archived",
    }
}

closed_set! {
    ProjectCategory, "project category" {
        WebApp => "web_app",
        MobileApp => "mobile_app",
        Api => "api",
        Frontend => "frontend",
        Fullstack => "fullstack",
        Design => "design",
        Other => "other",
    }
}

closed_set! {
    /// Visibility gate for blog posts. Only `Published` is publicly listed.
    PostStatus, "post status" {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

closed_set! {
    SkillCategory, "skill category" {
        Frontend => "frontend",
        Backend => "backend",
        Database => "database",
        Devops => "devops",
        Mobile => "mobile",
        Design => "design",
        Tools => "tools",
        SoftSkills => "soft_skills",
        Other => "other",
    }
}

closed_set! {
    EmploymentType, "employment type" {
        FullTime => "full_time",
        PartTime => "part_time",
        Contract => "contract",
        Freelance => "freelance",
        Internship => "internship",
    }
}

closed_set! {
    AchievementCategory, "achievement category" {
        Award => "award",
        Certification => "certification",
        Milestone => "milestone",
        Recognition => "recognition",
        Publication => "publication",
    }
}

impl ProjectStatus {
    /// Whether projects in this status appear in public listings.
    pub fn is_public(self) -> bool {
        self == Self::Completed
    }
}

impl PostStatus {
    /// Whether posts in this status appear in public listings.
    pub fn is_public(self) -> bool {
        self == Self::Published
    }
}

// ---------------------------------------------------------------------------
// Bounded numeric fields
// ---------------------------------------------------------------------------

/// Inclusive bounds for `skills.proficiency`.
pub const PROFICIENCY_RANGE: (i32, i32) = (0, 100);

/// Inclusive bounds for `testimonials.rating`.
pub const RATING_RANGE: (i32, i32) = (1, 5);

/// Check that `value` lies within an inclusive range.
pub fn validate_bounded(field: &str, value: i32, (min, max): (i32, i32)) -> Result<(), CoreError> {
    if value < min || value > max {
        return Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
