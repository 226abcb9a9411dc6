//! JSON boundary for the statistics views. Presentation collaborators (an
//! HTTP layer, a desktop shell) talk to the engine through these two
//! functions; no routing or auth lives here.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::engine::{AnalyticsEngine, DataIssue, MinuteWindow};
use crate::error::{EngineError, Result};
use crate::models::{CompetitionId, FixtureId};
use crate::stats::{PlayerStatRecord, TeamStatRecord};
use crate::store::{MatchStore, Scope};
use crate::SCHEMA_VERSION;

/// One statistics request. Scope is at most one of `competition` /
/// `fixture`; neither means "everything". The optional minute window narrows
/// event counting only.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub competition: Option<CompetitionId>,
    #[serde(default)]
    pub fixture: Option<FixtureId>,
    #[serde(default)]
    pub minute_from: Option<u16>,
    #[serde(default)]
    pub minute_to: Option<u16>,
}

impl StatsRequest {
    fn parse(request_json: &str) -> Result<Self> {
        let request: StatsRequest = serde_json::from_str(request_json).map_err(|e| {
            error!("failed to parse StatsRequest: {e}");
            EngineError::InvalidRequest(format!("request parse failed: {e}"))
        })?;
        if request.schema_version != SCHEMA_VERSION {
            return Err(EngineError::InvalidRequest(format!(
                "unsupported schema_version {}, expected {}",
                request.schema_version, SCHEMA_VERSION
            )));
        }
        if request.competition.is_some() && request.fixture.is_some() {
            return Err(EngineError::InvalidRequest(
                "scope takes a competition or a fixture, not both".into(),
            ));
        }
        Ok(request)
    }

    fn scope(&self) -> Scope {
        match (self.fixture, self.competition) {
            (Some(id), _) => Scope::Fixture(id),
            (None, Some(id)) => Scope::Competition(id),
            (None, None) => Scope::All,
        }
    }

    fn window(&self) -> Option<MinuteWindow> {
        if self.minute_from.is_none() && self.minute_to.is_none() {
            return None;
        }
        Some((self.minute_from.unwrap_or(0), self.minute_to.unwrap_or(u16::MAX)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub schema_version: u8,
    pub records: Vec<PlayerStatRecord>,
    pub issues: Vec<DataIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatsResponse {
    pub schema_version: u8,
    pub team: TeamStatRecord,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| EngineError::Serialization(e.to_string()))
}

/// Compute the per-player statistics view for a JSON request.
pub fn player_statistics_json<S: MatchStore>(
    engine: &AnalyticsEngine<'_, S>,
    request_json: &str,
) -> Result<String> {
    let request = StatsRequest::parse(request_json)?;
    info!(scope = ?request.scope(), "processing player statistics request");

    let stats = engine.player_statistics(request.scope(), request.window())?;
    info!(records = stats.records.len(), issues = stats.issues.len(), "player statistics ready");
    to_json(&PlayerStatsResponse {
        schema_version: SCHEMA_VERSION,
        records: stats.records,
        issues: stats.issues,
    })
}

/// Compute the team statistics view for a JSON request.
pub fn team_statistics_json<S: MatchStore>(
    engine: &AnalyticsEngine<'_, S>,
    request_json: &str,
) -> Result<String> {
    let request = StatsRequest::parse(request_json)?;
    info!(scope = ?request.scope(), "processing team statistics request");

    let team = engine.team_statistics(request.scope(), request.window())?;
    to_json(&TeamStatsResponse { schema_version: SCHEMA_VERSION, team })
}
