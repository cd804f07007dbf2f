//! GitHub REST API implementation of [`RepositoryHost`]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use crate::host::{ContentUpdate, Repository, RepositoryHost, TreeEntry};
use crate::{Error, Result};

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Deserialize)]
struct RepoResponse {
    name: String,
    full_name: String,
    default_branch: String,
    owner: OwnerResponse,
}

#[derive(Deserialize)]
struct OwnerResponse {
    login: String,
}

impl From<RepoResponse> for Repository {
    fn from(response: RepoResponse) -> Self {
        Self {
            owner: response.owner.login,
            name: response.name,
            full_name: response.full_name,
            default_branch: response.default_branch,
        }
    }
}

#[derive(Deserialize)]
struct BranchResponse {
    commit: CommitResponse,
}

#[derive(Deserialize)]
struct CommitResponse {
    sha: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
}

#[derive(Deserialize)]
struct ContentResponse {
    content: String,
    encoding: String,
}

#[derive(Deserialize)]
struct CompareResponse {
    html_url: String,
}

/// Client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubHost {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubHost {
    /// Create a client.
    ///
    /// `user_agent` is required by GitHub and is usually the account name.
    pub fn new(api_url: impl Into<String>, user_agent: &str, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        debug!(%method, %url, "GitHub request");
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url));
        }
        Err(Error::Status {
            status: status.as_u16(),
            url,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }
}

/// Decode the base64 payload of a contents response.
///
/// GitHub wraps the payload in newlines every 60 characters.
pub fn decode_content(path: &str, content: &str, encoding: &str) -> Result<Vec<u8>> {
    if encoding != "base64" {
        return Err(Error::Decode {
            path: path.to_string(),
            message: format!("unsupported encoding {encoding}"),
        });
    }

    let compact: String = content.split_whitespace().collect();
    STANDARD.decode(compact).map_err(|e| Error::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let response: RepoResponse = self.get_json(&format!("/repos/{owner}/{name}")).await?;
        Ok(response.into())
    }

    async fn tip_sha(&self, repo: &Repository) -> Result<String> {
        let branch: BranchResponse = self
            .get_json(&format!(
                "/repos/{}/branches/{}",
                repo.full_name, repo.default_branch
            ))
            .await?;
        Ok(branch.commit.sha)
    }

    async fn fetch_tree(&self, repo: &Repository, sha: &str) -> Result<Vec<TreeEntry>> {
        let tree: TreeResponse = self
            .get_json(&format!("/repos/{}/git/trees/{}", repo.full_name, sha))
            .await?;
        Ok(tree.tree)
    }

    async fn fetch_content(&self, repo: &Repository, path: &str) -> Result<Vec<u8>> {
        let contents: ContentResponse = self
            .get_json(&format!("/repos/{}/contents/{}", repo.full_name, path))
            .await?;
        decode_content(path, &contents.content, &contents.encoding)
    }

    async fn fork(&self, repo: &Repository) -> Result<Repository> {
        // GitHub answers 202 Accepted and creates the fork asynchronously
        let response = self
            .send(
                self.request(Method::POST, &format!("/repos/{}/forks", repo.full_name))
                    .json(&json!({})),
            )
            .await?;
        let fork: RepoResponse = response.json().await?;
        info!(fork = %fork.full_name, "Fork requested");
        Ok(fork.into())
    }

    async fn create_branch(&self, repo: &Repository, name: &str, base_sha: &str) -> Result<()> {
        let result = self
            .send(
                self.request(Method::POST, &format!("/repos/{}/git/refs", repo.full_name))
                    .json(&json!({
                        "ref": format!("refs/heads/{name}"),
                        "sha": base_sha,
                    })),
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(Error::Status { status: 422, .. }) => Err(Error::BranchExists {
                branch: name.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn put_content(&self, repo: &Repository, update: &ContentUpdate) -> Result<()> {
        let mut body = json!({
            "message": update.message,
            "content": STANDARD.encode(&update.content),
            "branch": update.branch,
        });
        if let Some(sha) = &update.blob_sha {
            body["sha"] = json!(sha);
        }

        self.send(
            self.request(
                Method::PUT,
                &format!("/repos/{}/contents/{}", repo.full_name, update.path),
            )
            .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn compare_url(&self, repo: &Repository, base: &str, head: &str) -> Result<String> {
        let compare: CompareResponse = self
            .get_json(&format!(
                "/repos/{}/compare/{}...{}",
                repo.full_name, base, head
            ))
            .await?;
        Ok(compare.html_url)
    }
}
