use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Band table used by [`normalise`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Standard,
    Small,
}

impl Variant {
    /// Combined total at or below which both sides keep their raw totals
    pub fn threshold(&self) -> u64 {
        match self {
            Variant::Standard => 7,
            Variant::Small => 5,
        }
    }

    /// Points each side scores when the totals are equal
    pub fn draw(&self) -> u32 {
        match self {
            Variant::Standard => 3,
            Variant::Small => 2,
        }
    }

    /// (winner, loser) points for a contested fight where `winner > loser`
    fn split(&self, winner: u64, loser: u64) -> (u32, u32) {
        match self {
            Variant::Standard => {
                if loser == 0 {
                    (7, 0)
                } else if 3 * loser < winner {
                    (6, 1)
                } else if 3 * loser < 2 * winner {
                    (5, 2)
                } else {
                    (4, 3)
                }
            }
            Variant::Small => {
                if loser == 0 {
                    (5, 0)
                } else if 2 * loser < winner {
                    (4, 1)
                } else {
                    (3, 2)
                }
            }
        }
    }
}

/// Converts two competing raw totals into capped points for `player`.
///
/// Small fights keep their raw totals. Anything larger is scored on the ratio
/// of the loser's total to the winner's, so the band boundaries are exact
/// integer comparisons rather than rounded fractions.
pub fn normalise(player: u32, opponent: u32, variant: Variant) -> u32 {
    let (p, o) = (u64::from(player), u64::from(opponent));

    if p + o <= variant.threshold() {
        return player;
    }
    if p == o {
        return variant.draw();
    }

    let (winner_points, loser_points) = variant.split(p.max(o), p.min(o));
    if p > o {
        winner_points
    } else {
        loser_points
    }
}

/// Lower bound (inclusive) of routed points that earns `bonus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct RoutedBand {
    pub min_routed: u32,
    pub bonus: u32,
}

impl RoutedBand {
    pub const fn new(min_routed: u32, bonus: u32) -> Self {
        Self { min_routed, bonus }
    }
}

impl From<(u32, u32)> for RoutedBand {
    fn from((min_routed, bonus): (u32, u32)) -> Self {
        Self::new(min_routed, bonus)
    }
}

impl From<RoutedBand> for (u32, u32) {
    fn from(band: RoutedBand) -> Self {
        (band.min_routed, band.bonus)
    }
}

pub const STANDARD_ROUTED_BANDS: [RoutedBand; 3] = [
    RoutedBand::new(1600, 3),
    RoutedBand::new(1100, 2),
    RoutedBand::new(500, 1),
];

/// Bonus for the highest band whose lower bound `routed` reaches, else zero.
/// Band order in `bands` does not matter.
pub fn routed_bonus(routed: u32, bands: &[RoutedBand]) -> u32 {
    bands
        .iter()
        .filter(|band| routed >= band.min_routed)
        .max_by_key(|band| band.min_routed)
        .map(|band| band.bonus)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(4, 4, 3)]
    #[case(7, 0, 7)]
    #[case(7, 1, 6)]
    #[case(5, 4, 4)]
    #[case(3, 10, 1)]
    #[case(3, 6, 2)]
    #[case(4, 6, 3)]
    #[case(8, 0, 7)]
    #[case(0, 9, 0)]
    fn standard_regression_cases(#[case] player: u32, #[case] opponent: u32, #[case] expected: u32) {
        assert_eq!(normalise(player, opponent, Variant::Standard), expected);
    }

    #[rstest]
    #[case(3, 2, 3)]
    #[case(3, 3, 2)]
    #[case(6, 0, 5)]
    #[case(0, 6, 0)]
    #[case(9, 4, 4)]
    #[case(4, 9, 1)]
    #[case(5, 3, 3)]
    #[case(3, 5, 2)]
    fn small_regression_cases(#[case] player: u32, #[case] opponent: u32, #[case] expected: u32) {
        assert_eq!(normalise(player, opponent, Variant::Small), expected);
    }

    #[test]
    fn small_fights_keep_raw_totals() {
        for variant in Variant::iter() {
            let threshold = variant.threshold() as u32;
            for a in 0..=threshold {
                for b in 0..=(threshold - a) {
                    assert_eq!(normalise(a, b, variant), a, "{variant:?} {a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn swapping_players_mirrors_the_band() {
        let standard = [(3, 3), (7, 0), (6, 1), (5, 2), (4, 3)];
        let small = [(2, 2), (5, 0), (4, 1), (3, 2)];

        for variant in Variant::iter() {
            let bands: &[(u32, u32)] = match variant {
                Variant::Standard => &standard,
                Variant::Small => &small,
            };
            for a in 0..40u32 {
                for b in 0..=a {
                    if u64::from(a + b) <= variant.threshold() {
                        continue;
                    }
                    let pair = (normalise(a, b, variant), normalise(b, a, variant));
                    assert!(bands.contains(&pair), "{variant:?} {a} vs {b} gave {pair:?}");
                }
            }
        }
    }

    #[test]
    fn ratio_not_magnitude_decides_the_band() {
        assert_eq!(
            normalise(10, 2, Variant::Standard),
            normalise(1000, 200, Variant::Standard)
        );
    }

    #[test]
    fn huge_totals_do_not_overflow() {
        assert_eq!(normalise(u32::MAX, u32::MAX, Variant::Standard), 3);
        assert_eq!(normalise(u32::MAX, 1, Variant::Standard), 6);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(495, 0)]
    #[case(500, 1)]
    #[case(1100, 2)]
    #[case(1695, 3)]
    #[case(2300, 3)]
    fn standard_routed_bonus(#[case] routed: u32, #[case] expected: u32) {
        assert_eq!(routed_bonus(routed, &STANDARD_ROUTED_BANDS), expected);
    }

    #[rstest]
    #[case(249, 0)]
    #[case(250, 1)]
    #[case(549, 1)]
    #[case(550, 2)]
    #[case(850, 3)]
    #[case(2000, 3)]
    fn custom_routed_bonus(#[case] routed: u32, #[case] expected: u32) {
        let bands: Vec<RoutedBand> =
            serde_json::from_str("[[850,3],[550,2],[250,1]]").unwrap();
        assert_eq!(routed_bonus(routed, &bands), expected);
    }

    #[test]
    fn band_order_is_irrelevant() {
        let bands = [RoutedBand::new(250, 1), RoutedBand::new(850, 3), RoutedBand::new(550, 2)];
        assert_eq!(routed_bonus(600, &bands), 2);
    }
}
