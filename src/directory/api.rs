use super::error::{DirectoryError, DirectoryResult};
use super::{ProjectCollection, ProjectFilter, ProjectSource, Projects};
use crate::config::{Credentials, ProjectId, ServerContext};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;

const PROJECTS_PATH: &str = "/v3/projects";

/// Lists projects through the Rancher management API.
pub struct RancherApi {
    client: Client,
    filter: ProjectFilter,
}

impl RancherApi {
    pub fn new(filter: ProjectFilter) -> DirectoryResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("rancherns/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DirectoryError::Client)?;

        Ok(Self { client, filter })
    }

    fn authorize(&self, request: RequestBuilder, server: &ServerContext) -> RequestBuilder {
        match server.token.credentials() {
            Credentials::Basic { user, password } => request.basic_auth(user, Some(password)),
            Credentials::Bearer(token) => request.bearer_auth(token),
            Credentials::Anonymous => request,
        }
    }
}

impl ProjectSource for RancherApi {
    fn list(&self, server: &ServerContext) -> DirectoryResult<Projects> {
        let url = projects_url(&server.url);
        tracing::debug!(server = %server.id, %url, "listing projects");

        let request = self.client.get(&url).header(ACCEPT, "application/json");
        let response = self
            .authorize(request, server)
            .send()
            .map_err(|source| DirectoryError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| DirectoryError::Request {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(DirectoryError::Status {
                url,
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        parse_projects(&body, &self.filter)
    }
}

pub fn projects_url(base: &str) -> String {
    format!("{}{PROJECTS_PATH}", base.trim_end_matches('/'))
}

pub fn parse_projects(body: &str, filter: &ProjectFilter) -> DirectoryResult<Projects> {
    let collection: ProjectCollection = serde_json::from_str(body)?;
    let filter = filter.clone();

    Ok(Projects::new(
        collection
            .data
            .into_iter()
            .filter(move |entry| filter.accepts(entry))
            .map(|entry| ProjectId::from(entry.id)),
    ))
}
