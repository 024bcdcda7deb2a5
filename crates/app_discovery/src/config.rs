//! Discovery job settings.

/// Environment variable holding an optional API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Accounts crawled when none are given on the command line.
pub const DEFAULT_USERS: [&str; 3] = ["bius", "os-clef", "ozclef"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// REST API root, without a trailing slash.
    pub api_base: String,
    /// Root for raw file URLs, without a trailing slash.
    pub raw_base: String,
    pub users: Vec<String>,
    /// Repositories requested per listing page. A shorter page ends the listing.
    pub per_page: u32,
    /// Per-repository manifest file name.
    pub manifest_path: String,
    /// Entry page that marks a repository as an embeddable app when no manifest exists.
    pub index_path: String,
    /// Branch assumed when a repository reports none.
    pub fallback_branch: String,
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            users: DEFAULT_USERS.iter().map(|user| user.to_string()).collect(),
            per_page: 100,
            manifest_path: "os-manifest.json".to_string(),
            index_path: "index.html".to_string(),
            fallback_branch: "main".to_string(),
            token: None,
            user_agent: concat!("app_discovery/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Defaults plus the token from [`TOKEN_ENV_VAR`], when set and non-empty.
    pub fn from_env() -> Self {
        Self {
            token: std::env::var(TOKEN_ENV_VAR)
                .ok()
                .filter(|token| !token.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Replaces the crawled accounts unless `users` is empty.
    pub fn with_users(mut self, users: Vec<String>) -> Self {
        if !users.is_empty() {
            self.users = users;
        }
        self
    }

    /// Public raw URL of `path` in `owner/repo` at `branch`. Leading slashes are dropped.
    pub fn raw_url(&self, owner: &str, repo: &str, branch: &str, path: &str) -> String {
        format!(
            "{}/{owner}/{repo}/{branch}/{}",
            self.raw_base,
            path.trim_start_matches('/')
        )
    }
}
