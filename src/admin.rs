//! Authenticated CRUD for teams, results and scheduled games.

use tracing::{error, info, instrument};

use crate::api::ResultsApi;
use crate::error::{ApiError, ApiResult};
use crate::model::auth::{AuthToken, LoginRequest, LoginResponse};
use crate::model::result::{RawResult, ResultInput};
use crate::model::schedule::{GameInput, ScheduledGame};
use crate::model::team::{Team, TeamInput};

/// Admin session: a results client plus the bearer token from login.
///
/// The token is held as-is for the life of the session; there is no refresh.
#[derive(Debug, Clone)]
pub struct AdminApi {
    api: ResultsApi,
    token: AuthToken,
}

impl AdminApi {
    /// Exchange admin credentials for a session token.
    #[instrument(level = "info", skip(api, password))]
    pub fn login(api: ResultsApi, access_key: &str, password: &str) -> ApiResult<Self> {
        let body = LoginRequest { access_key, password };
        match api.post_json::<_, LoginResponse>("/admin/login", None, &body) {
            Ok(resp) => {
                info!("Admin login succeeded");
                Ok(Self { api, token: resp.token })
            }
            Err(ApiError::Status { status, .. }) => {
                error!(status, "Admin login rejected");
                Err(ApiError::Unauthorized(format!("login rejected with HTTP {status}")))
            }
            Err(e) => Err(e),
        }
    }

    /// Resume a session from a token obtained earlier.
    pub fn with_token(api: ResultsApi, token: AuthToken) -> Self {
        Self { api, token }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn create_team(&self, team: &TeamInput) -> ApiResult<Team> {
        self.api.post_json("/admin/teams", Some(&self.token), team)
    }

    pub fn update_team(&self, id: i64, team: &TeamInput) -> ApiResult<Team> {
        self.api.put_json(&format!("/admin/teams/{id}"), &self.token, team)
    }

    pub fn delete_team(&self, id: i64) -> ApiResult<()> {
        self.api.delete(&format!("/admin/teams/{id}"), &self.token)
    }

    pub fn publish_result(&self, result: &ResultInput) -> ApiResult<RawResult> {
        self.api.post_json("/admin/results", Some(&self.token), result)
    }

    pub fn update_result(&self, id: i64, result: &ResultInput) -> ApiResult<RawResult> {
        self.api.put_json(&format!("/admin/results/{id}"), &self.token, result)
    }

    pub fn delete_result(&self, id: i64) -> ApiResult<()> {
        self.api.delete(&format!("/admin/results/{id}"), &self.token)
    }

    pub fn create_game(&self, game: &GameInput) -> ApiResult<ScheduledGame> {
        self.api.post_json("/admin/games", Some(&self.token), game)
    }

    pub fn update_game(&self, id: i64, game: &GameInput) -> ApiResult<ScheduledGame> {
        self.api.put_json(&format!("/admin/games/{id}"), &self.token, game)
    }

    pub fn delete_game(&self, id: i64) -> ApiResult<()> {
        self.api.delete(&format!("/admin/games/{id}"), &self.token)
    }
}
