//! Badge tiers earned from cumulative approved volunteering hours.
//!
//! The ladder is `none (0) < bronz (25) < gumus (50) < altin (100) < platin (200)`.
//! A total exactly on a threshold earns that tier.

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const BRONZ_THRESHOLD: f64 = 25.0;
pub const GUMUS_THRESHOLD: f64 = 50.0;
pub const ALTIN_THRESHOLD: f64 = 100.0;
pub const PLATIN_THRESHOLD: f64 = 200.0;

// ---------------------------------------------------------------------------
// Badge
// ---------------------------------------------------------------------------

/// Ordered badge tiers. `Ord` follows the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Badge {
    None,
    Bronz,
    Gumus,
    Altin,
    Platin,
}

impl Badge {
    /// Every tier from lowest to highest.
    pub const LADDER: [Badge; 5] = [
        Badge::None,
        Badge::Bronz,
        Badge::Gumus,
        Badge::Altin,
        Badge::Platin,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bronz => "bronz",
            Self::Gumus => "gumus",
            Self::Altin => "altin",
            Self::Platin => "platin",
        }
    }

    /// Display label shown on profiles and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Henüz rozet yok",
            Self::Bronz => "Bronz İnci",
            Self::Gumus => "Gümüş İnci",
            Self::Altin => "Altın İnci",
            Self::Platin => "Platin İnci Lideri",
        }
    }

    /// Minimum total approved hours for this tier.
    pub fn min_hours(&self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Bronz => BRONZ_THRESHOLD,
            Self::Gumus => GUMUS_THRESHOLD,
            Self::Altin => ALTIN_THRESHOLD,
            Self::Platin => PLATIN_THRESHOLD,
        }
    }

    /// The tier directly above this one, if any.
    pub fn next(&self) -> Option<Badge> {
        match self {
            Self::None => Some(Self::Bronz),
            Self::Bronz => Some(Self::Gumus),
            Self::Gumus => Some(Self::Altin),
            Self::Altin => Some(Self::Platin),
            Self::Platin => None,
        }
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr {
            code: &'static str,
            label: &'static str,
            min_hours: f64,
        }

        Repr {
            code: self.code(),
            label: self.label(),
            min_hours: self.min_hours(),
        }
        .serialize(serializer)
    }
}

/// The next tier above a total, with the hours it requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextBadge {
    pub badge: Badge,
    pub required_hours: f64,
    pub remaining_hours: f64,
}

/// Badge panel shown on a student's profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub current: Badge,
    pub next: Option<NextBadge>,
    /// Tiers reached so far, lowest first. Never contains [`Badge::None`].
    pub earned: Vec<Badge>,
    /// Progress from the current tier's threshold toward the next one.
    pub progress_pct: f64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Negative and NaN totals classify as zero.
fn normalize_total(total: f64) -> f64 {
    if total.is_nan() || total < 0.0 {
        0.0
    } else {
        total
    }
}

/// Classify a total number of approved hours.
pub fn calculate_badge(total: f64) -> Badge {
    let total = normalize_total(total);
    Badge::LADDER
        .iter()
        .rev()
        .copied()
        .find(|b| total >= b.min_hours())
        .unwrap_or(Badge::None)
}

/// The tier after the one `total` currently earns, or `None` at the top.
pub fn next_badge(total: f64) -> Option<NextBadge> {
    let total = normalize_total(total);
    calculate_badge(total).next().map(|badge| NextBadge {
        badge,
        required_hours: badge.min_hours(),
        remaining_hours: badge.min_hours() - total,
    })
}

/// Current tier, next tier, every earned tier, and progress toward the next.
pub fn badge_status(total: f64) -> BadgeStatus {
    let total = normalize_total(total);
    let current = calculate_badge(total);
    let next = next_badge(total);

    let earned = Badge::LADDER
        .iter()
        .copied()
        .filter(|b| *b != Badge::None && *b <= current)
        .collect();

    let progress_pct = match &next {
        Some(n) => {
            let floor = current.min_hours();
            let span = n.required_hours - floor;
            round2(((total - floor) / span * 100.0).clamp(0.0, 100.0))
        }
        None => 100.0,
    };

    BadgeStatus {
        current,
        next,
        earned,
        progress_pct,
    }
}

/// Percentage of a personal hours target reached, clamped to `0..=100`.
pub fn target_progress(total: f64, target_hours: i32) -> f64 {
    if target_hours <= 0 {
        return 0.0;
    }
    round2((normalize_total(total) / f64::from(target_hours) * 100.0).min(100.0))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_boundaries() {
        let cases = [
            (0.0, Badge::None),
            (24.0, Badge::None),
            (25.0, Badge::Bronz),
            (49.0, Badge::Bronz),
            (50.0, Badge::Gumus),
            (99.0, Badge::Gumus),
            (100.0, Badge::Altin),
            (199.0, Badge::Altin),
            (200.0, Badge::Platin),
            (201.0, Badge::Platin),
        ];
        for (total, expected) in cases {
            assert_eq!(calculate_badge(total), expected, "total = {total}");
        }
    }

    #[test]
    fn fractional_totals_just_below_threshold() {
        assert_eq!(calculate_badge(24.99), Badge::None);
        assert_eq!(calculate_badge(199.5), Badge::Altin);
    }

    #[test]
    fn negative_and_nan_totals_are_zero() {
        assert_eq!(calculate_badge(-10.0), Badge::None);
        assert_eq!(calculate_badge(f64::NAN), Badge::None);
        assert_eq!(next_badge(-3.0).unwrap().required_hours, 25.0);
        assert_eq!(next_badge(-3.0).unwrap().remaining_hours, 25.0);
    }

    #[test]
    fn classification_is_monotonic() {
        let mut previous = Badge::None;
        let mut t = 0.0;
        while t <= 300.0 {
            let b = calculate_badge(t);
            assert!(b >= previous, "badge dropped at {t}");
            previous = b;
            t += 0.5;
        }
    }

    #[test]
    fn next_badge_threshold_exceeds_total() {
        let mut t = 0.0;
        while t < 200.0 {
            let next = next_badge(t).expect("below platin there is a next tier");
            assert!(next.required_hours > t);
            assert_eq!(next.badge, calculate_badge(t).next().unwrap());
            t += 0.25;
        }
        assert!(next_badge(200.0).is_none());
        assert!(next_badge(1000.0).is_none());
    }

    #[test]
    fn next_badge_for_eighteen_hours_is_bronz() {
        let next = next_badge(18.0).unwrap();
        assert_eq!(next.badge, Badge::Bronz);
        assert_eq!(next.required_hours, 25.0);
        assert_eq!(next.remaining_hours, 7.0);
    }

    #[test]
    fn badge_serializes_with_code_and_label() {
        let json = serde_json::to_value(Badge::Gumus).unwrap();
        assert_eq!(json["code"], "gumus");
        assert_eq!(json["label"], "Gümüş İnci");
        assert_eq!(json["minHours"], 50.0);
    }

    #[test]
    fn status_lists_earned_tiers_and_progress() {
        let status = badge_status(75.0);
        assert_eq!(status.current, Badge::Gumus);
        assert_eq!(status.earned, vec![Badge::Bronz, Badge::Gumus]);
        assert_eq!(status.progress_pct, 50.0);
        assert_eq!(status.next.unwrap().badge, Badge::Altin);
    }

    #[test]
    fn status_at_top_tier_is_complete() {
        let status = badge_status(250.0);
        assert_eq!(status.current, Badge::Platin);
        assert!(status.next.is_none());
        assert_eq!(status.earned.len(), 4);
        assert_eq!(status.progress_pct, 100.0);
    }

    #[test]
    fn status_without_badges_has_no_earned_tiers() {
        let status = badge_status(5.0);
        assert!(status.earned.is_empty());
        assert_eq!(status.progress_pct, 20.0);
    }

    #[test]
    fn target_progress_is_clamped() {
        assert_eq!(target_progress(20.0, 40), 50.0);
        assert_eq!(target_progress(80.0, 40), 100.0);
        assert_eq!(target_progress(10.0, 0), 0.0);
    }
}
