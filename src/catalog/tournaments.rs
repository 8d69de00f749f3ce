use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use super::{
    errors::CatalogError,
    models::{EventConfig, RoundConfig},
};
use crate::scenario::{builtin_scenarios, RoutedBand, Scenario, STANDARD_ROUTED_BANDS};
use crate::shared::AppError;

/// Events and scenarios known to the server. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct TournamentCatalog {
    scenarios: Vec<Scenario>,
    events: Vec<EventConfig>,
}

impl TournamentCatalog {
    /// Validates that ids are unique and every round names a known scenario
    pub fn new(scenarios: Vec<Scenario>, events: Vec<EventConfig>) -> Result<Self, CatalogError> {
        let mut scenario_ids = HashSet::new();
        for scenario in &scenarios {
            if !scenario_ids.insert(scenario.id.as_str()) {
                return Err(CatalogError::DuplicateScenario(scenario.id.clone()));
            }
        }

        let mut event_slugs = HashSet::new();
        for event in &events {
            if !event_slugs.insert(event.slug.as_str()) {
                return Err(CatalogError::DuplicateEvent(event.slug.clone()));
            }
            for (round, config) in event.rounds.iter().enumerate() {
                if !scenario_ids.contains(config.scenario.as_str()) {
                    return Err(CatalogError::UnknownScenario {
                        event: event.slug.clone(),
                        round,
                        scenario: config.scenario.clone(),
                    });
                }
            }
        }

        info!(
            scenario_count = scenarios.len(),
            event_count = events.len(),
            "Tournament catalog built"
        );

        Ok(Self { scenarios, events })
    }

    /// Builtin scenarios with events read from a JSON array of event configs
    pub fn from_events_file(path: &Path) -> Result<Self, CatalogError> {
        debug!(path = %path.display(), "Reading events file");
        let contents = std::fs::read_to_string(path)?;
        let events: Vec<EventConfig> = serde_json::from_str(&contents)?;
        Self::new(builtin_scenarios()?, events)
    }

    /// Builtin scenarios with a single three-round club event
    pub fn demo() -> Result<Self, CatalogError> {
        let event = EventConfig {
            slug: "club-open".to_string(),
            name: "Club Open".to_string(),
            date: None,
            rounds: ["hold-the-line", "no-mans-land", "plunder"]
                .into_iter()
                .map(|scenario| RoundConfig {
                    scenario: scenario.to_string(),
                })
                .collect(),
            routed_bands: None,
        };
        Self::new(builtin_scenarios()?, vec![event])
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn events(&self) -> &[EventConfig] {
        &self.events
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn event(&self, slug: &str) -> Result<&EventConfig, AppError> {
        self.events
            .iter()
            .find(|e| e.slug == slug)
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", slug)))
    }

    /// Scenario played in `round` of the event
    pub fn round_scenario(&self, slug: &str, round: usize) -> Result<&Scenario, AppError> {
        let event = self.event(slug)?;
        let config = event
            .rounds
            .get(round)
            .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Round {} is outside the {} configured rounds of {}",
                round,
                event.round_count(),
                slug
            ))
        })?;

        // Checked in `new`
        self.scenario(&config.scenario).ok_or(AppError::Internal)
    }

    pub fn routed_bands(&self, slug: &str) -> Result<&[RoutedBand], AppError> {
        let event = self.event(slug)?;
        Ok(event
            .routed_bands
            .as_deref()
            .unwrap_or(&STANDARD_ROUTED_BANDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(slug: &str, scenarios: &[&str]) -> EventConfig {
        EventConfig {
            slug: slug.to_string(),
            name: slug.to_string(),
            date: None,
            rounds: scenarios
                .iter()
                .map(|s| RoundConfig {
                    scenario: s.to_string(),
                })
                .collect(),
            routed_bands: None,
        }
    }

    #[test]
    fn demo_catalog_resolves_round_scenarios() {
        let catalog = TournamentCatalog::demo().unwrap();

        let scenario = catalog.round_scenario("club-open", 1).unwrap();
        assert_eq!(scenario.id, "no-mans-land");
    }

    #[test]
    fn unknown_event_and_round_are_not_found() {
        let catalog = TournamentCatalog::demo().unwrap();

        assert!(matches!(
            catalog.round_scenario("nope", 0),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            catalog.round_scenario("club-open", 3),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_unknown_scenario() {
        let result = TournamentCatalog::new(
            builtin_scenarios().unwrap(),
            vec![event("gt", &["plunder", "capture-the-flag"])],
        );

        assert!(matches!(
            result,
            Err(CatalogError::UnknownScenario { round: 1, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_events() {
        let result = TournamentCatalog::new(
            builtin_scenarios().unwrap(),
            vec![event("gt", &["plunder"]), event("gt", &["plunder"])],
        );

        assert!(matches!(result, Err(CatalogError::DuplicateEvent(_))));
    }

    #[test]
    fn custom_routed_bands_override_the_standard_table() {
        let mut custom = event("doubles", &["plunder"]);
        custom.routed_bands = Some(vec![RoutedBand::new(850, 3)]);
        let catalog =
            TournamentCatalog::new(builtin_scenarios().unwrap(), vec![custom, event("gt", &[])])
                .unwrap();

        assert_eq!(catalog.routed_bands("doubles").unwrap(), &[RoutedBand::new(850, 3)]);
        assert_eq!(catalog.routed_bands("gt").unwrap(), &STANDARD_ROUTED_BANDS);
    }

    #[test]
    fn parses_events_json() {
        let events: Vec<EventConfig> = serde_json::from_str(
            r#"[{"slug": "gt", "name": "Grand Tournament", "date": "2026-11-07",
                 "rounds": [{"scenario": "plunder"}],
                 "routed_bands": [[850, 3], [550, 2], [250, 1]]}]"#,
        )
        .unwrap();

        let catalog = TournamentCatalog::new(builtin_scenarios().unwrap(), events).unwrap();
        let event = catalog.event("gt").unwrap();
        assert_eq!(event.round_count(), 1);
        assert_eq!(catalog.routed_bands("gt").unwrap().len(), 3);
    }
}
