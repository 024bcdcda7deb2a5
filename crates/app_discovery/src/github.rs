//! GitHub REST implementation of [`RepoHost`].

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::DiscoveryConfig,
    error::DiscoveryError,
    host::RepoHost,
    model::{FileContents, RepoInfo, RepoSummary},
};

const ACCEPT_V3_JSON: &str = "application/vnd.github.v3+json";

pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| DiscoveryError::Http {
                path: config.api_base.clone(),
                source,
            })?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, DiscoveryError> {
        let mut request = self
            .http
            .get(format!("{}{path}", self.api_base))
            .header(header::ACCEPT, ACCEPT_V3_JSON);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await.map_err(|source| DiscoveryError::Http {
            path: path.to_string(),
            source,
        })?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DiscoveryError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| DiscoveryError::Decode {
                path: path.to_string(),
                message: err.to_string(),
            })
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn list_repos(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Option<Vec<RepoSummary>>, DiscoveryError> {
        self.get_json(&format!("/users/{user}/repos?per_page={per_page}&page={page}"))
            .await
    }

    async fn repo_info(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<RepoInfo>, DiscoveryError> {
        self.get_json(&format!("/repos/{owner}/{repo}")).await
    }

    async fn file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<FileContents>, DiscoveryError> {
        self.get_json(&format!("/repos/{owner}/{repo}/contents/{path}?ref={branch}"))
            .await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}
