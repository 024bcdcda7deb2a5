//! Crawl that turns repositories into app descriptors.

use base64::Engine;

use crate::{
    config::DiscoveryConfig,
    error::DiscoveryError,
    host::RepoHost,
    model::{AppDescriptor, FileContents, RepoSummary},
};

/// Crawls every configured account and returns the descriptors found, in listing order.
///
/// Failures never abort the batch: a repository that errors is logged and skipped, and a listing
/// page that errors ends that account only.
pub async fn discover<H>(host: &H, config: &DiscoveryConfig) -> Vec<AppDescriptor>
where
    H: RepoHost + ?Sized + Sync,
{
    let mut apps = Vec::new();
    for user in &config.users {
        let mut page = 1;
        loop {
            let repos = match host.list_repos(user, page, config.per_page).await {
                Ok(Some(repos)) => repos,
                Ok(None) => break,
                Err(err) => {
                    log::warn!("listing repositories of {user} failed: {err}");
                    break;
                }
            };
            if repos.is_empty() {
                break;
            }
            for repo in &repos {
                match discover_repo(host, config, repo).await {
                    Ok(Some(app)) => apps.push(app),
                    Ok(None) => log::debug!("{} is not an app", repo.display_name()),
                    Err(err) => log::warn!("error repo {}: {err}", repo.display_name()),
                }
            }
            if repos.len() < config.per_page as usize {
                break;
            }
            page += 1;
        }
        log::info!("finished {user}: {} apps so far", apps.len());
    }
    apps
}

async fn discover_repo<H>(
    host: &H,
    config: &DiscoveryConfig,
    repo: &RepoSummary,
) -> Result<Option<AppDescriptor>, DiscoveryError>
where
    H: RepoHost + ?Sized + Sync,
{
    let owner = repo.owner.login.as_str();
    let name = repo.name.as_str();
    let Some(info) = host.repo_info(owner, name).await? else {
        return Ok(None);
    };
    let branch = info
        .default_branch
        .or_else(|| repo.default_branch.clone())
        .unwrap_or_else(|| config.fallback_branch.clone());

    match read_manifest(host, config, owner, name, &branch).await {
        Ok(Some(manifest)) => {
            return Ok(Some(complete_manifest(config, manifest, owner, name, &branch)));
        }
        Ok(None) => {}
        Err(err) => log::warn!("ignoring manifest of {owner}/{name}: {err}"),
    }

    let index = host
        .file_contents(owner, name, &config.index_path, &branch)
        .await?;
    Ok(index.map(|_| {
        AppDescriptor::iframe(
            format!("{owner}-{name}"),
            name.to_string(),
            config.raw_url(owner, name, &branch, &config.index_path),
        )
    }))
}

async fn read_manifest<H>(
    host: &H,
    config: &DiscoveryConfig,
    owner: &str,
    name: &str,
    branch: &str,
) -> Result<Option<AppDescriptor>, DiscoveryError>
where
    H: RepoHost + ?Sized + Sync,
{
    let path = format!("{owner}/{name}/{}", config.manifest_path);
    let Some(file) = host
        .file_contents(owner, name, &config.manifest_path, branch)
        .await?
    else {
        return Ok(None);
    };
    let Some(text) = decode_contents(&file, &path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|err| DiscoveryError::Decode {
            path,
            message: err.to_string(),
        })
}

/// Decodes a contents payload. An absent or empty `content` field is `None`.
pub fn decode_contents(file: &FileContents, path: &str) -> Result<Option<String>, DiscoveryError> {
    let Some(encoded) = file.content.as_deref().filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|err| DiscoveryError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|err| DiscoveryError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })
}

/// Rewrites relative `url`/`icon` into raw URLs and fills a missing `id`.
fn complete_manifest(
    config: &DiscoveryConfig,
    mut manifest: AppDescriptor,
    owner: &str,
    name: &str,
    branch: &str,
) -> AppDescriptor {
    for field in [&mut manifest.url, &mut manifest.icon] {
        if let Some(value) = field.as_mut() {
            if !value.is_empty() && !value.starts_with("http") {
                let raw = config.raw_url(owner, name, branch, value.as_str());
                *value = raw;
            }
        }
    }
    if manifest.id.as_deref().map_or(true, str::is_empty) {
        manifest.id = Some(format!("{owner}-{name}"));
    }
    manifest
}
