use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::{Standing, Totals};
use crate::{
    attendee::repository::AttendeeDirectory,
    catalog::TournamentCatalog,
    round::{models::GameResult, models::PlayerGameModel, repository::PlayerGameRepository},
    shared::{AppError, AppState},
};

/// Sums published games per attendee. Unpublished games are ignored.
pub fn tally(games: &[PlayerGameModel]) -> HashMap<String, Totals> {
    let mut totals: HashMap<String, Totals> = HashMap::new();

    for game in games.iter().filter(|g| g.published) {
        let entry = totals.entry(game.attendee_id.clone()).or_default();
        entry.games_played += 1;
        entry.tournament_points = entry
            .tournament_points
            .saturating_add(game.total_score.unwrap_or_default());
        entry.routed_points = entry
            .routed_points
            .saturating_add(game.routed_points.unwrap_or_default());
        match game.result {
            Some(GameResult::Win) => entry.wins += 1,
            Some(GameResult::Draw) => entry.draws += 1,
            Some(GameResult::Loss) => entry.losses += 1,
            None => {}
        }
    }

    totals
}

/// Service deriving event rankings from published rounds
pub struct StandingsService {
    catalog: Arc<TournamentCatalog>,
    attendees: Arc<dyn AttendeeDirectory + Send + Sync>,
    games: Arc<dyn PlayerGameRepository + Send + Sync>,
}

impl StandingsService {
    pub fn new(
        catalog: Arc<TournamentCatalog>,
        attendees: Arc<dyn AttendeeDirectory + Send + Sync>,
        games: Arc<dyn PlayerGameRepository + Send + Sync>,
    ) -> Self {
        Self {
            catalog,
            attendees,
            games,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            Arc::clone(&state.catalog),
            Arc::clone(&state.attendee_directory),
            Arc::clone(&state.game_repository),
        )
    }

    /// Attendees ranked by tournament points, then routed points, then name
    #[instrument(skip(self))]
    pub async fn standings(&self, event_slug: &str) -> Result<Vec<Standing>, AppError> {
        self.catalog.event(event_slug)?;

        let attendees = self.attendees.list_attendees_for_event(event_slug).await?;
        let totals = tally(&self.games.list_event(event_slug).await?);
        debug!(attendee_count = attendees.len(), ranked = totals.len(), "Tallied published games");

        let mut standings: Vec<Standing> = attendees
            .into_iter()
            .map(|attendee| Standing {
                rank: 0,
                totals: totals.get(&attendee.id).copied().unwrap_or_default(),
                attendee_id: attendee.id,
                name: attendee.name,
                faction: attendee.faction,
                allies: attendee.allies,
                army_list_url: attendee.army_list_url,
                awards: attendee.awards,
            })
            .collect();

        standings.sort_by(|a, b| {
            b.totals
                .tournament_points
                .cmp(&a.totals.tournament_points)
                .then_with(|| b.totals.routed_points.cmp(&a.totals.routed_points))
                .then_with(|| a.name.cmp(&b.name))
        });
        for (index, standing) in standings.iter_mut().enumerate() {
            standing.rank = index as u32 + 1;
        }

        info!(event_slug = %event_slug, standing_count = standings.len(), "Standings computed");
        Ok(standings)
    }
}
