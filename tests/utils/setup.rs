use std::sync::Arc;

use axum::Router;

use skirmish::{
    attendee::repository::InMemoryAttendeeDirectory,
    round::repository::InMemoryPlayerGameRepository, AppState, TokenConfig, TournamentCatalog,
    ORGANISER_ROLE,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const EVENT: &str = "club-open";
const SECRET: &str = "integration-secret";

pub struct TestSetup {
    pub app: Router,
    pub organiser_token: String,
    pub games: Arc<InMemoryPlayerGameRepository>,
    pub attendees: Vec<String>, // attendee ids in signup order
}

pub struct TestSetupBuilder {
    names: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { names: vec![] }
    }

    pub fn with_attendees(mut self, names: Vec<&str>) -> Self {
        self.names = names.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_four_attendees(self) -> Self {
        self.with_attendees(vec!["Alice", "Bob", "Carol, the Bold", "Dave"])
    }

    pub async fn build(self) -> TestSetup {
        let games = Arc::new(InMemoryPlayerGameRepository::new());
        let token_config = TokenConfig::with_secret(SECRET);
        let organiser_token = token_config
            .create_token("td@club", ORGANISER_ROLE, 1)
            .unwrap();

        let state = AppState::new(
            Arc::new(TournamentCatalog::demo().unwrap()),
            Arc::new(InMemoryAttendeeDirectory::new()),
            games.clone(),
            token_config,
        );

        let mut setup = TestSetup {
            app: skirmish::build_router(state),
            organiser_token,
            games,
            attendees: vec![],
        };

        for name in &self.names {
            let id = setup.register(name).await;
            setup.attendees.push(id);
        }

        setup
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
