//! View parameters and the projection they produce.

use std::fmt;
use std::str::FromStr;

use crate::models::{star_string, Rating, Review, EMPTY_STAR, MAX_RATING};

/// Which ratings are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Only(Rating),
}

impl RatingFilter {
    pub fn admits(self, rating: Rating) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Only(wanted) => wanted == rating,
        }
    }
}

impl FromStr for RatingFilter {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(RatingFilter::All);
        }
        s.parse::<i64>()
            .ok()
            .and_then(|n| Rating::try_from(n).ok())
            .map(RatingFilter::Only)
            .ok_or_else(|| ParseViewError::Filter(s.to_string()))
    }
}

impl fmt::Display for RatingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingFilter::All => f.write_str("all"),
            RatingFilter::Only(r) => write!(f, "{}", r),
        }
    }
}

/// Display ordering of the visible reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Descending `created_at`.
    #[default]
    Newest,
    /// Ascending `created_at`.
    Oldest,
    /// Descending rating, then newest first.
    Highest,
    /// Ascending rating, then newest first.
    Lowest,
}

impl FromStr for SortMode {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "highest" => Ok(SortMode::Highest),
            "lowest" => Ok(SortMode::Lowest),
            other => Err(ParseViewError::Sort(other.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::Highest => "highest",
            SortMode::Lowest => "lowest",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseViewError {
    #[error("unknown rating filter {0:?} (expected all or 1-5)")]
    Filter(String),
    #[error("unknown sort mode {0:?} (expected newest, oldest, highest or lowest)")]
    Sort(String),
}

/// The three independent UI controls feeding the projector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewParams {
    pub search_text: String,
    pub filter: RatingFilter,
    pub sort: SortMode,
}

/// Aggregate over the full, unfiltered collection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    /// Arithmetic mean of all ratings, `0.0` when `count == 0`.
    pub average: f64,
}

impl Summary {
    /// "1 review", "3 reviews", "0 reviews".
    pub fn label(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!("{} review{}", self.count, plural)
    }

    /// One decimal, halves rounded up ("2.25" shows as "2.3").
    pub fn average_display(&self) -> String {
        format!("{:.1}", (self.average * 10.0 + 0.5).floor() / 10.0)
    }

    /// The average rounded to the nearest star (halves round up).
    ///
    /// An empty collection shows five empty stars rather than a full row.
    pub fn average_stars(&self) -> String {
        if self.count == 0 {
            return std::iter::repeat(EMPTY_STAR)
                .take(MAX_RATING as usize)
                .collect();
        }
        let rounded = (self.average + 0.5).floor().clamp(0.0, f64::from(MAX_RATING));
        star_string(rounded as u8)
    }
}

/// Output of one projection pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub visible: Vec<Review>,
    pub summary: Summary,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_all_and_digits() {
        assert_eq!("all".parse::<RatingFilter>().unwrap(), RatingFilter::All);
        assert_eq!(
            " 4 ".parse::<RatingFilter>().unwrap(),
            RatingFilter::Only(Rating::try_from(4u8).unwrap())
        );
        assert!("0".parse::<RatingFilter>().is_err());
        assert!("six".parse::<RatingFilter>().is_err());
    }

    #[test]
    fn sort_parses_control_values() {
        assert_eq!("Highest".parse::<SortMode>().unwrap(), SortMode::Highest);
        assert_eq!("oldest".parse::<SortMode>().unwrap(), SortMode::Oldest);
        assert!(matches!(
            "random".parse::<SortMode>(),
            Err(ParseViewError::Sort(_))
        ));
    }

    #[test]
    fn defaults_match_initial_controls() {
        let params = ViewParams::default();
        assert_eq!(params.filter, RatingFilter::All);
        assert_eq!(params.sort, SortMode::Newest);
        assert!(params.search_text.is_empty());
    }

    #[test]
    fn summary_label_pluralizes() {
        let mut s = Summary::default();
        assert_eq!(s.label(), "0 reviews");
        s.count = 1;
        assert_eq!(s.label(), "1 review");
        s.count = 2;
        assert_eq!(s.label(), "2 reviews");
    }

    #[test]
    fn average_stars_round_half_up() {
        let s = Summary { count: 2, average: 3.5 };
        assert_eq!(s.average_stars(), "★★★★☆");
        let s = Summary { count: 3, average: 2.333 };
        assert_eq!(s.average_stars(), "★★☆☆☆");
        assert_eq!(s.average_display(), "2.3");
        // Quarter averages sit exactly on a tie at one decimal.
        let s = Summary { count: 4, average: 2.25 };
        assert_eq!(s.average_display(), "2.3");
        let s = Summary { count: 4, average: 1.25 };
        assert_eq!(s.average_display(), "1.3");
    }

    #[test]
    fn empty_summary_shows_empty_stars() {
        let s = Summary::default();
        assert_eq!(s.average_display(), "0.0");
        assert_eq!(s.average_stars(), "☆☆☆☆☆");
    }
}
