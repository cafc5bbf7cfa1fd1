use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Freshness bucket; declaration order is the pantry listing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryState {
    Expired,
    Today,
    Soon,
    Ok,
    Unknown,
}

impl ExpiryState {
    pub fn of(status: Option<&ExpiryStatus>) -> Self {
        status.map(|status| status.state).unwrap_or(Self::Unknown)
    }

    pub fn sort_rank(self) -> u8 {
        match self {
            Self::Expired => 0,
            Self::Today => 1,
            Self::Soon => 2,
            Self::Ok => 3,
            Self::Unknown => 4,
        }
    }

    pub fn needs_attention(self) -> bool {
        matches!(self, Self::Expired | Self::Today | Self::Soon)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryStatus {
    pub state: ExpiryState,
    pub label: String,
    pub days_until: i64,
}

/// Number of days after which an item stops being "soon".
pub const SOON_WINDOW_DAYS: i64 = 3;

/// Classifies an expiry date against `today`. Items without an expiry date get no status.
pub fn classify(expires_on: Option<NaiveDate>, today: NaiveDate) -> Option<ExpiryStatus> {
    let expires_on = expires_on?;
    let days_until = (expires_on - today).num_days();

    let (state, label) = match days_until {
        days if days < 0 => (ExpiryState::Expired, format!("Expired {}d ago", days.abs())),
        0 => (ExpiryState::Today, "Expires today".to_string()),
        days if days <= SOON_WINDOW_DAYS => (ExpiryState::Soon, format!("Expires in {days}d")),
        _ => (ExpiryState::Ok, format!("Expires {}", expires_on.format("%b %-d"))),
    };

    Some(ExpiryStatus { state, label, days_until })
}

/// Listing order: freshness bucket first, then name in dictionary order.
///
/// Names compare on their base letters ignoring case and accents, then accented after
/// unaccented, then lowercase before uppercase.
pub fn compare_for_listing(
    left_name: &str,
    left: Option<&ExpiryStatus>,
    right_name: &str,
    right: Option<&ExpiryStatus>,
) -> Ordering {
    ExpiryState::of(left)
        .sort_rank()
        .cmp(&ExpiryState::of(right).sort_rank())
        .then_with(|| base_letters(left_name).cmp(&base_letters(right_name)))
        .then_with(|| left_name.to_lowercase().cmp(&right_name.to_lowercase()))
        .then_with(|| right_name.cmp(left_name))
}

fn base_letters(name: &str) -> String {
    name.nfd().filter(|ch| !is_combining_mark(*ch)).flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use chrono::NaiveDate;

    use super::{classify, compare_for_listing, ExpiryState};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn missing_expiry_has_no_status() {
        assert_eq!(classify(None, date(2024, 1, 10)), None);
        assert_eq!(ExpiryState::of(None), ExpiryState::Unknown);
    }

    #[test]
    fn boundaries_around_today() {
        let today = date(2024, 1, 10);

        let same_day = classify(Some(date(2024, 1, 10)), today).expect("status");
        assert_eq!(same_day.state, ExpiryState::Today);
        assert_eq!(same_day.label, "Expires today");

        let three_days = classify(Some(date(2024, 1, 13)), today).expect("status");
        assert_eq!(three_days.state, ExpiryState::Soon);
        assert_eq!(three_days.label, "Expires in 3d");

        let four_days = classify(Some(date(2024, 1, 14)), today).expect("status");
        assert_eq!(four_days.state, ExpiryState::Ok);
        assert_eq!(four_days.label, "Expires Jan 14");

        let yesterday = classify(Some(date(2024, 1, 9)), today).expect("status");
        assert_eq!(yesterday.state, ExpiryState::Expired);
        assert_eq!(yesterday.label, "Expired 1d ago");
        assert_eq!(yesterday.days_until, -1);
    }

    #[test]
    fn day_count_spans_month_boundaries() {
        let status = classify(Some(date(2024, 3, 1)), date(2024, 2, 28)).expect("status");
        assert_eq!(status.days_until, 2);
        assert_eq!(status.state, ExpiryState::Soon);

        let long_gone = classify(Some(date(2023, 12, 31)), date(2024, 1, 30)).expect("status");
        assert_eq!(long_gone.label, "Expired 30d ago");
    }

    #[test]
    fn ok_label_uses_unpadded_day() {
        let status = classify(Some(date(2024, 2, 5)), date(2024, 1, 1)).expect("status");
        assert_eq!(status.label, "Expires Feb 5");
    }

    #[test]
    fn listing_order_ranks_state_then_name() {
        let today = date(2024, 1, 10);
        let expired = classify(Some(date(2024, 1, 1)), today);
        let soon = classify(Some(date(2024, 1, 12)), today);

        assert_eq!(
            compare_for_listing("zucchini", expired.as_ref(), "apple", soon.as_ref()),
            Ordering::Less
        );
        assert_eq!(compare_for_listing("Basil", None, "apple", None), Ordering::Greater);
        assert_eq!(
            compare_for_listing("flour", None, "milk", soon.as_ref()),
            Ordering::Greater
        );
    }

    #[test]
    fn accented_names_sort_with_their_base_letters() {
        assert_eq!(compare_for_listing("Éclair", None, "Zucchini", None), Ordering::Less);
        assert_eq!(compare_for_listing("crème fraîche", None, "Cumin", None), Ordering::Less);
        assert_eq!(compare_for_listing("Ñora", None, "nutmeg", None), Ordering::Less);
        assert_eq!(compare_for_listing("eclair", None, "Éclair", None), Ordering::Less);
        assert_eq!(compare_for_listing("apple", None, "Apple", None), Ordering::Less);
        assert_eq!(compare_for_listing("Apple", None, "Apple", None), Ordering::Equal);
    }

    #[test]
    fn attention_states() {
        assert!(ExpiryState::Expired.needs_attention());
        assert!(ExpiryState::Soon.needs_attention());
        assert!(!ExpiryState::Ok.needs_attention());
        assert!(!ExpiryState::Unknown.needs_attention());
    }
}
