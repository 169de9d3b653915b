//! View-counter milestones.

/// View counts that trigger an owner notification when reached.
pub const VIEW_MILESTONES: &[i64] = &[100, 500, 1000, 5000, 10000];

/// Whether a freshly incremented counter value is a milestone.
///
/// Each increment returns a distinct value, so a milestone fires exactly once.
pub fn is_view_milestone(view_count: i64) -> bool {
    VIEW_MILESTONES.contains(&view_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones() {
        assert!(is_view_milestone(100));
        assert!(is_view_milestone(10000));
        assert!(!is_view_milestone(99));
        assert!(!is_view_milestone(101));
        assert!(!is_view_milestone(0));
    }
}
