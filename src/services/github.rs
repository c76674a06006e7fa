use std::time::Duration;

use futures::future;
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::constants::{GITHUB_API_BASE_URL, LOW_RATE_LIMIT_THRESHOLD, USER_AGENT as RELNOTES_USER_AGENT};
use crate::errors::{RelnotesError, RelnotesResult};
use crate::helpers::http_client::shared_client;
use crate::structs::change_record::ChangeRecord;
use crate::structs::config::github_config::GithubConfig;
use crate::structs::diffs_page::{DiffsPage, RateLimitInfo};

/// Listing entry for one closed pull request. Only merged ones (with a
/// `merged_at` timestamp) become change records.
#[derive(Debug, Clone, Deserialize)]
struct PullSummary {
    number: u64,
    #[serde(default)]
    title: String,
    merged_at: Option<String>,
    #[serde(default)]
    html_url: String,
}

pub struct GitHubClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl GitHubClient {
    pub fn new(config: &GithubConfig, timeout: Duration) -> Self {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.is_empty());

        if token.is_none() {
            log::warn!(
                "🔑 No GitHub token found in ${}; unauthenticated rate limits apply",
                config.token_env
            );
        }

        Self {
            base_url: GITHUB_API_BASE_URL.to_string(),
            token,
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetches one page of merged pull requests with their unified diffs.
    pub async fn fetch_merged_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> RelnotesResult<DiffsPage> {
        if per_page == 0 {
            return Err(RelnotesError::validation_error(
                "per_page",
                "0",
                "must be greater than zero",
                None,
            ));
        }
        if page == 0 {
            return Err(RelnotesError::validation_error(
                "page",
                "0",
                "pages are 1-indexed",
                None,
            ));
        }

        let url = format!("{}/repos/{}/{}/pulls", self.base_url, owner, repo);
        let mut request = shared_client()
            .get(&url)
            .query(&[("state", "closed"), ("sort", "updated"), ("direction", "desc")])
            .query(&[("per_page", per_page), ("page", page)])
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, RELNOTES_USER_AGENT)
            .timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            RelnotesError::github_error("list pull requests", e.status().map(|s| s.as_u16()), &e.to_string())
        })?;

        let headers = response.headers().clone();
        let rate_limit = parse_rate_limit(&headers);
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS
                || (status == StatusCode::FORBIDDEN && rate_limit.remaining == Some(0))
            {
                return Err(RelnotesError::RateLimitExceeded {
                    remaining: rate_limit.remaining.unwrap_or(0),
                    reset: rate_limit.reset,
                });
            }
            return Err(RelnotesError::github_error(
                "list pull requests",
                Some(status.as_u16()),
                &body,
            ));
        }

        if let Some(remaining) = rate_limit.remaining {
            if remaining < LOW_RATE_LIMIT_THRESHOLD {
                log::warn!("⚠️ GitHub rate-limit low: {} calls left", remaining);
            }
        }

        let next_page = headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_page);

        let closed: Vec<PullSummary> = response.json().await.map_err(|e| {
            RelnotesError::github_error("list pull requests", None, &e.to_string())
        })?;

        let merged: Vec<PullSummary> = closed
            .into_iter()
            .filter(|pr| pr.merged_at.is_some())
            .collect();

        // Diff fetches within a page run concurrently; a failed diff drops
        // that item rather than failing the page.
        let fetches = merged.iter().map(|pr| self.fetch_diff(owner, repo, pr));
        let diffs: Vec<ChangeRecord> = future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect();

        Ok(DiffsPage {
            diffs,
            next_page,
            current_page: page,
            per_page,
            rate_limit,
        })
    }

    async fn fetch_diff(&self, owner: &str, repo: &str, pr: &PullSummary) -> Option<ChangeRecord> {
        let url = format!("{}/repos/{}/{}/pulls/{}", self.base_url, owner, repo, pr.number);
        let mut request = shared_client()
            .get(&url)
            .header(ACCEPT, "application/vnd.github.v3.diff")
            .header(USER_AGENT, RELNOTES_USER_AGENT)
            .timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(diff) => Some(ChangeRecord {
                    id: pr.number.to_string(),
                    description: pr.title.clone(),
                    diff,
                    url: pr.html_url.clone(),
                }),
                Err(e) => {
                    log::error!("❌ Failed reading diff for PR #{}: {}", pr.number, e);
                    None
                }
            },
            Ok(response) => {
                log::error!(
                    "❌ Failed diff for PR #{}: HTTP {}",
                    pr.number,
                    response.status()
                );
                None
            }
            Err(e) => {
                log::error!("❌ Failed diff for PR #{}: {}", pr.number, e);
                None
            }
        }
    }
}

/// Extracts the `rel="next"` page number from a `Link` header. A missing
/// or non-positive page means the listing is exhausted.
pub fn parse_next_page(link_header: &str) -> Option<u32> {
    for part in link_header.split(',') {
        let mut sections = part.split(';');
        let url_section = sections.next()?.trim();
        let is_next = sections.any(|rel| rel.contains("rel=\"next\""));
        if !is_next {
            continue;
        }

        let url = url_section.trim_start_matches('<').trim_end_matches('>');
        let query = url.split_once('?').map(|(_, q)| q)?;
        return query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page="))
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|page| *page > 0);
    }
    None
}

pub fn parse_rate_limit(headers: &HeaderMap) -> RateLimitInfo {
    RateLimitInfo {
        remaining: header_value(headers, "x-ratelimit-remaining"),
        reset: header_value(headers, "x-ratelimit-reset"),
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}
