use super::{
    inputs::ScoreInput,
    models::Scenario,
    normalise::Variant,
    rules::{ScoringRule, Weight},
};
use crate::catalog::CatalogError;

/// The club's scenario pack
pub fn builtin_scenarios() -> Result<Vec<Scenario>, CatalogError> {
    Ok(vec![
        Scenario::new(
            "hold-the-line",
            "Hold the Line",
            "Place three primary objectives along the centre line and two secondary \
             objectives in each deployment zone.",
            "3 points per primary objective held, 1 per secondary objective held, \
             and 1 if your general survived.",
            vec![
                ScoreInput::number("primary", "Primary objectives held", Some(3)),
                ScoreInput::number("secondary", "Secondary objectives held", Some(4)),
                ScoreInput::boolean("general_alive", "General survived"),
            ],
            ScoringRule::DirectSum {
                weights: vec![
                    Weight::new("primary", 3),
                    Weight::new("secondary", 1),
                    Weight::new("general_alive", 1),
                ],
            },
        )?,
        Scenario::new(
            "plunder",
            "Plunder",
            "Scatter six loot counters across the table and one cache in the centre.",
            "2 points per loot counter held at the end of the game and 2 for \
             holding the central cache.",
            vec![
                ScoreInput::number("loot", "Loot counters held", Some(6)),
                ScoreInput::boolean("cache", "Held the central cache"),
            ],
            ScoringRule::DirectSum {
                weights: vec![Weight::new("loot", 2), Weight::new("cache", 2)],
            },
        )?,
        Scenario::new(
            "no-mans-land",
            "No Man's Land",
            "Mark a 12\" wide strip across the centre of the table.",
            "Total the unit strength you have wholly inside no man's land. \
             Scores are normalised against your opponent's total.",
            vec![ScoreInput::number(
                "strength",
                "Unit strength in no man's land",
                None,
            )],
            ScoringRule::Normalised {
                weights: vec![Weight::new("strength", 1)],
                variant: Variant::Standard,
            },
        )?,
        Scenario::new(
            "skirmish-no-mans-land",
            "No Man's Land (Skirmish)",
            "Mark an 8\" wide strip across the centre of the table.",
            "Total the unit strength you have wholly inside no man's land. \
             Scores are normalised on the small table.",
            vec![ScoreInput::number(
                "strength",
                "Unit strength in no man's land",
                None,
            )],
            ScoringRule::Normalised {
                weights: vec![Weight::new("strength", 1)],
                variant: Variant::Small,
            },
        )?,
        Scenario::new(
            "king-of-the-hill",
            "King of the Hill",
            "Place a hill in the centre of the table.",
            "Total the unit strength you have on the hill, adding 2 if your \
             banner is planted on the summit. Scores are normalised.",
            vec![
                ScoreInput::number("strength", "Unit strength on the hill", None),
                ScoreInput::boolean("banner", "Banner planted on the summit"),
            ],
            ScoringRule::Normalised {
                weights: vec![Weight::new("strength", 1), Weight::new("banner", 2)],
                variant: Variant::Standard,
            },
        )?,
    ])
}
