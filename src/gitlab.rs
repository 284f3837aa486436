use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::config::Settings;
use crate::diff::{parse_diffs, DiffRecord};
use crate::error::{Error, Result};
use crate::profiling::Profile;

const TOKEN_HEADER: &str = "private-token";

/// Error body GitLab sends with most 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ApiError {
  message: Option<serde_json::Value>,
  error:   Option<String>
}

impl ApiError {
  fn parse(body: &[u8]) -> Option<String> {
    let error: ApiError = serde_json::from_slice(body).ok()?;
    match (error.message, error.error) {
      (Some(serde_json::Value::String(message)), _) => Some(message),
      (Some(message), _) => Some(message.to_string()),
      (None, error) => error
    }
  }
}

/// Builds `{base}/api/v4/projects/{project}/merge_requests/{iid}/diffs`.
///
/// The project path is pushed as a single segment, so `ssp/dipol/x` becomes `ssp%2Fdipol%2Fx`.
/// `.` and `..` are rejected since `url` drops them instead of encoding them.
pub fn diffs_url(base: &Url, project_path: &str, mr_iid: &str) -> Result<Url> {
  if let Some(segment) = [project_path, mr_iid].into_iter().find(|s| matches!(*s, "." | "..")) {
    return Err(Error::DotSegment(segment.to_string()));
  }

  let mut url = base.clone();

  url
    .path_segments_mut()
    .map_err(|_| Error::UrlCannotBeABase(base.to_string()))?
    .pop_if_empty()
    .extend(["api", "v4", "projects", project_path, "merge_requests", mr_iid, "diffs"]);

  Ok(url)
}

#[derive(Debug, Clone)]
pub struct GitLab {
  client:   Client,
  base_url: Url
}

impl GitLab {
  pub fn new(settings: &Settings, token: &str) -> Result<Self> {
    let base_url = Url::parse(&settings.url)?;

    let mut token = HeaderValue::from_str(token).map_err(|_| Error::InvalidToken)?;
    token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(TOKEN_HEADER), token);

    let client = Client::builder()
      .default_headers(headers)
      .timeout(Duration::from_secs(settings.timeout))
      .build()?;

    Ok(Self { client, base_url })
  }

  /// Fetches the diffs of merge request `mr_iid` in `project_path` (the full path, prefix included).
  pub async fn merge_request_diffs(&self, project_path: &str, mr_iid: &str) -> Result<Vec<DiffRecord>> {
    let url = diffs_url(&self.base_url, project_path, mr_iid)?;
    log::debug!("GET {}", url);

    let response = {
      let _profile = Profile::new("GitLab API request");
      self.client.get(url).send().await?
    };

    let body = Self::body(response).await?;
    let diffs = parse_diffs(&body)?;
    log::debug!("Received {} diff(s)", diffs.len());

    Ok(diffs)
  }

  async fn body(response: Response) -> Result<Vec<u8>> {
    let status = response.status();
    log::debug!("GitLab responded with {}", status);

    let body = response.bytes().await?.to_vec();

    if !status.is_success() {
      return Err(Error::Api { status, message: ApiError::parse(&body) });
    }

    Ok(body)
  }
}
