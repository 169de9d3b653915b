//! Reading-time estimate for blog post bodies.
//!
//! The estimate is a pure function of the body text and is computed whenever
//! a post is read, so it can never disagree with the stored body.

use std::sync::LazyLock;

use regex::Regex;

/// Average reading speed used for the estimate.
pub const READING_SPEED_WPM: usize = 200;

/// Shortest estimate ever reported, including for empty bodies.
pub const MIN_READING_MINUTES: i32 = 1;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Count whitespace-separated words after stripping HTML tags.
///
/// Tags are replaced by a space so `foo<br>bar` counts as two words.
pub fn word_count(body: &str) -> usize {
    HTML_TAG_RE.replace_all(body, " ").split_whitespace().count()
}

/// Estimated minutes to read `body`.
///
/// `ceil(words / READING_SPEED_WPM)`, never below [`MIN_READING_MINUTES`].
///
/// ```
/// use folio_core::reading_time::reading_time_minutes;
/// assert_eq!(reading_time_minutes(""), 1);
/// assert_eq!(reading_time_minutes(&"word ".repeat(400)), 2);
/// assert_eq!(reading_time_minutes(&"word ".repeat(401)), 3);
/// ```
pub fn reading_time_minutes(body: &str) -> i32 {
    let minutes = word_count(body).div_ceil(READING_SPEED_WPM);
    i32::try_from(minutes)
        .unwrap_or(i32::MAX)
        .max(MIN_READING_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["lorem"; n].join(" ")
    }

    #[test]
    fn empty_body_is_one_minute() {
        assert_eq!(reading_time_minutes(""), 1);
        assert_eq!(reading_time_minutes("   \n\t "), 1);
    }

    #[test]
    fn exact_multiples_of_reading_speed() {
        for n in 1..=5 {
            assert_eq!(reading_time_minutes(&words(READING_SPEED_WPM * n)), n as i32);
        }
    }

    #[test]
    fn partial_minutes_round_up() {
        assert_eq!(reading_time_minutes(&words(1)), 1);
        assert_eq!(reading_time_minutes(&words(READING_SPEED_WPM + 1)), 2);
    }

    #[test]
    fn html_tags_are_not_words() {
        assert_eq!(word_count("<p>Hello <strong>rich</strong> text</p>"), 3);
        assert_eq!(word_count("line<br/>break"), 2);
    }

    #[test]
    fn longer_body_changes_estimate() {
        let short = words(150);
        let long = format!("{short} {}", words(300));
        assert!(reading_time_minutes(&long) > reading_time_minutes(&short));
    }
}
