use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info, info_span, instrument};
use ureq::Agent;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::model::auth::AuthToken;
use crate::model::result::RawResult;
use crate::model::schedule::ScheduledGame;
use crate::model::team::Team;

/// Blocking client for the public results endpoints under `/api`.
#[derive(Debug, Clone)]
pub struct ResultsApi {
    agent: Agent,
    base_url: String,
}

impl ResultsApi {
    pub fn new(config: &Config) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.http_timeout))
            .build()
            .into();
        Self { agent, base_url: config.api_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All teams with their daily slot times.
    #[instrument(level = "info", skip(self))]
    pub fn teams(&self) -> ApiResult<Vec<Team>> {
        self.get_json("/api/teams", &[])
    }

    /// Every result scheduled on `date` (`YYYY-MM-DD`).
    #[instrument(level = "info", skip(self))]
    pub fn daily_results(&self, date: &str) -> ApiResult<Vec<RawResult>> {
        self.get_json("/api/results/daily", &[("date", date)])
    }

    /// One team's results for `month` (`YYYY-MM`).
    #[instrument(level = "info", skip(self))]
    pub fn monthly_results(&self, team: &str, month: &str) -> ApiResult<Vec<RawResult>> {
        #[derive(Serialize)]
        struct MonthlyQuery<'a> {
            team: &'a str,
            month: &'a str,
        }
        self.post_json("/api/results/monthly", None, &MonthlyQuery { team, month })
    }

    /// Today's results as the backend sees today.
    #[instrument(level = "info", skip(self))]
    pub fn today_results(&self) -> ApiResult<Vec<RawResult>> {
        self.get_json("/api/today", &[])
    }

    /// Games scheduled on `date` (`YYYY-MM-DD`).
    #[instrument(level = "info", skip(self))]
    pub fn schedule(&self, date: &str) -> ApiResult<Vec<ScheduledGame>> {
        self.get_json("/api/schedule", &[("date", date)])
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<T> {
        let url = self.url(path);
        let response = {
            let _span = info_span!("results_fetch", url = %url).entered();
            let mut request = self.agent.get(&url);
            for (key, value) in query {
                request = request.query(*key, *value);
            }
            request.call()
        };
        Self::read_json(&url, response)
    }

    pub(crate) fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&AuthToken>,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path);
        let response = {
            let _span = info_span!("results_post", url = %url).entered();
            let mut request = self.agent.post(&url);
            if let Some(token) = token {
                request = request.header("Authorization", token.bearer());
            }
            request.send_json(body)
        };
        Self::read_json(&url, response)
    }

    pub(crate) fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: &AuthToken,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path);
        let response = {
            let _span = info_span!("results_put", url = %url).entered();
            self.agent
                .put(&url)
                .header("Authorization", token.bearer())
                .send_json(body)
        };
        Self::read_json(&url, response)
    }

    pub(crate) fn delete(&self, path: &str, token: &AuthToken) -> ApiResult<()> {
        let url = self.url(path);
        let _span = info_span!("results_delete", url = %url).entered();
        match self.agent.delete(&url).header("Authorization", token.bearer()).call() {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), "Deleted");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, url = %url, "Delete request failed");
                Err(ApiError::from_ureq(&url, e))
            }
        }
    }

    fn read_json<T: DeserializeOwned>(
        url: &str,
        response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> ApiResult<T> {
        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => {
                        info!(status, bytes = body.len(), "Received response");
                        serde_json::from_str::<T>(&body).map_err(|e| {
                            error!(error = %e, url = %url, "Failed to deserialize response");
                            ApiError::Parsing { url: url.to_string(), source: e }
                        })
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read response body");
                        Err(ApiError::Body { url: url.to_string(), message: e.to_string() })
                    }
                }
            }
            Err(e) => {
                error!(error = %e, url = %url, "Request failed");
                Err(ApiError::from_ureq(url, e))
            }
        }
    }
}
