use chrono::Utc;

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Listings only show jobs posted within this window; after it a post
/// silently ages out of the board.
pub const ACTIVE_WINDOW_MS: i64 = 7 * DAY_MS;

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole days left before a post ages out of the 7-day listing window,
/// floored at zero. Display-only: nothing is ever written back.
pub fn days_until_expiry(timestamp_ms: i64, now_ms: i64) -> i64 {
    let remaining = timestamp_ms + ACTIVE_WINDOW_MS - now_ms;
    if remaining <= 0 {
        return 0;
    }
    (remaining + DAY_MS - 1) / DAY_MS
}

pub fn is_expiring(timestamp_ms: i64, now_ms: i64) -> bool {
    days_until_expiry(timestamp_ms, now_ms) <= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_post_has_seven_days() {
        let now = 1_700_000_000_000;
        assert_eq!(days_until_expiry(now, now), 7);
    }

    #[test]
    fn partial_days_round_up() {
        let now = 1_700_000_000_000;
        let posted = now - 6 * DAY_MS - 1;
        assert_eq!(days_until_expiry(posted, now), 1);
    }

    #[test]
    fn aged_out_post_floors_at_zero() {
        let now = 1_700_000_000_000;
        let posted = now - 8 * DAY_MS;
        assert_eq!(days_until_expiry(posted, now), 0);
    }

    #[test]
    fn expiring_flag_at_two_days() {
        let now = 1_700_000_000_000;
        let expiring = now - 5 * DAY_MS - 1;
        let comfortable = now - 4 * DAY_MS;
        assert!(is_expiring(expiring, now));
        assert!(!is_expiring(comfortable, now));
    }
}
