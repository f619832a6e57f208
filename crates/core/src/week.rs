//! Week identifiers and the rotation distance metric.
//!
//! Weeks are stored as free text in the form `<year>-W<nn>`. Older records
//! use an `S` prefix (`2025-S50`); both prefixes name the same week.
//!
//! Ordering and distance use a linear index of `year * 52 + week`. This does
//! not match ISO calendars with 53 weeks, so distances that straddle such a
//! year boundary are off by one. Rotation fairness is tuned against this
//! metric and it must not be replaced by calendar arithmetic.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Matches `2025-W07`, `2025-S7`, `2025-w07`.
static WEEK_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\s*(\d{4})-([SsWw])(\d{1,2})\s*$").expect("valid regex"));

/// Weeks per year used by the linear index.
pub const WEEKS_PER_YEAR: i64 = 52;

/// Number of weeks after a participation during which an entrepreneur is
/// not picked by the automatic scheduler.
pub const COOLDOWN_WEEKS: i64 = 3;

// ---------------------------------------------------------------------------
// WeekKey
// ---------------------------------------------------------------------------

/// Parsed `(year, week number)` pair.
///
/// Field order gives the total order used everywhere: year first, then week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub year: i32,
    pub number: u32,
}

impl WeekKey {
    /// Parse a week identifier. Returns `None` for anything malformed; callers
    /// treat an unparseable week as matching nothing.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = WEEK_RE.captures(raw)?;
        let year = caps[1].parse().ok()?;
        let number = caps[3].parse().ok()?;
        Some(Self { year, number })
    }

    /// Linear index `year * 52 + week`.
    pub fn linear_index(self) -> i64 {
        i64::from(self.year) * WEEKS_PER_YEAR + i64::from(self.number)
    }

    /// Signed distance in weeks from `self` to `later`.
    pub fn weeks_until(self, later: WeekKey) -> i64 {
        later.linear_index() - self.linear_index()
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.number)
    }
}

// ---------------------------------------------------------------------------
// String-level helpers
// ---------------------------------------------------------------------------

/// Whether two week identifiers name the same week (`W` and `S` prefixes are
/// equivalent). Unparseable identifiers only match an identical string.
pub fn same_week(a: &str, b: &str) -> bool {
    match (WeekKey::parse(a), WeekKey::parse(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

/// Total order over week identifiers.
///
/// Parsed weeks compare by `(year, number)`. Unparseable identifiers sort
/// before every parseable one and compare among themselves as strings.
pub fn compare_weeks(a: &str, b: &str) -> Ordering {
    match (WeekKey::parse(a), WeekKey::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Weeks elapsed from `last` to `target`, or `None` if either is malformed.
pub fn week_distance(last: &str, target: &str) -> Option<i64> {
    let last = WeekKey::parse(last)?;
    let target = WeekKey::parse(target)?;
    Some(last.weeks_until(target))
}

/// Whether a participation in `last` puts the entrepreneur on cooldown for
/// `target`: the distance is in `1..=COOLDOWN_WEEKS`.
pub fn within_cooldown(last: &str, target: &str) -> bool {
    matches!(week_distance(last, target), Some(d) if (1..=COOLDOWN_WEEKS).contains(&d))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parses_both_prefixes() {
        let w = WeekKey::parse("2025-W50").unwrap();
        let s = WeekKey::parse("2025-S50").unwrap();
        assert_eq!(w, s);
        assert_eq!(w.year, 2025);
        assert_eq!(w.number, 50);
    }

    #[test]
    fn parses_single_digit_and_lowercase() {
        assert_eq!(
            WeekKey::parse("2025-w7"),
            Some(WeekKey { year: 2025, number: 7 })
        );
    }

    #[test]
    fn rejects_malformed() {
        assert!(WeekKey::parse("").is_none());
        assert!(WeekKey::parse("2025-50").is_none());
        assert!(WeekKey::parse("W50-2025").is_none());
        assert!(WeekKey::parse("2025-X10").is_none());
    }

    #[test]
    fn display_is_canonical_w_prefix() {
        let key = WeekKey::parse("2025-S3").unwrap();
        assert_eq!(key.to_string(), "2025-W03");
    }

    // -----------------------------------------------------------------------
    // Ordering / matching
    // -----------------------------------------------------------------------

    #[test]
    fn same_week_treats_prefixes_as_equal() {
        assert!(same_week("2025-W10", "2025-S10"));
        assert!(!same_week("2025-W10", "2025-W11"));
        assert!(same_week("garbage", "garbage"));
        assert!(!same_week("garbage", "2025-W10"));
    }

    #[test]
    fn compare_orders_by_year_then_week() {
        assert_eq!(compare_weeks("2024-W52", "2025-W01"), Ordering::Less);
        assert_eq!(compare_weeks("2025-W09", "2025-S10"), Ordering::Less);
        assert_eq!(compare_weeks("2025-S10", "2025-W10"), Ordering::Equal);
        assert_eq!(compare_weeks("bad", "2025-W01"), Ordering::Less);
    }

    // -----------------------------------------------------------------------
    // Distance / cooldown
    // -----------------------------------------------------------------------

    #[test]
    fn distance_is_linear_index_difference() {
        assert_eq!(week_distance("2025-W08", "2025-W10"), Some(2));
        assert_eq!(week_distance("2024-W51", "2025-W02"), Some(3));
        assert_eq!(week_distance("2025-W10", "2025-W08"), Some(-2));
        assert_eq!(week_distance("bad", "2025-W08"), None);
    }

    #[test]
    fn cooldown_window_is_one_to_three_weeks() {
        assert!(!within_cooldown("2025-W10", "2025-W10"));
        assert!(within_cooldown("2025-W09", "2025-W10"));
        assert!(within_cooldown("2025-W07", "2025-W10"));
        assert!(!within_cooldown("2025-W06", "2025-W10"));
        assert!(!within_cooldown("2025-W12", "2025-W10"));
        assert!(!within_cooldown("not-a-week", "2025-W10"));
    }

    #[test]
    fn fifty_two_week_approximation_is_kept() {
        // 2020 has an ISO week 53; the linear index treats it as week 1 of 2021.
        assert_eq!(week_distance("2020-W53", "2021-W01"), Some(0));
    }
}
