//! Manifest discovery: crawls public repositories of a few accounts and builds the app catalog
//! the desktop launches from.

pub mod config;
pub mod discover;
pub mod error;
pub mod github;
pub mod host;
pub mod model;

pub use config::{DiscoveryConfig, DEFAULT_USERS, TOKEN_ENV_VAR};
pub use discover::{decode_contents, discover};
pub use error::DiscoveryError;
pub use github::GitHubClient;
pub use host::RepoHost;
pub use model::{AppDescriptor, FileContents, RepoInfo, RepoOwner, RepoSummary};
