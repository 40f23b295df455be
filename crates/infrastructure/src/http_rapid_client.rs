use std::time::Duration;

use async_trait::async_trait;
use rapid_console_application::{
    CreateClientRequest, CreateUserRequest, DatasetGateway, JobGateway, PermissionCatalogGateway,
    SubjectGateway, UpdatedSubjectPermissions,
};
use rapid_console_core::{AppError, AppResult, SubjectId};
use rapid_console_domain::{
    AssignedPermission, CatalogSearchHit, CreatedClient, CreatedUser, DataAction, DatasetAddress,
    DatasetInfo, DatasetSummary, Job, PermissionCatalog, PermissionToken, SubjectSummary,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;
use url::Url;


/// reqwest-backed client for the rAPId REST API.
#[derive(Clone)]
pub struct HttpRapidClient {
    http_client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpRapidClient {
    /// Creates a client for the rAPId instance at `base_url`.
    pub fn new(base_url: Url, access_token: Option<String>, timeout: Duration) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "rAPId URL '{base_url}' cannot be used as a base URL"
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build rAPId HTTP client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url,
            access_token,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                AppError::Internal("rAPId base URL does not accept path segments".to_owned())
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> AppResult<reqwest::Response> {
        let path = url.path().to_owned();
        let mut request = self.http_client.request(method.clone(), url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|error| {
            warn!(%method, %path, %error, "rAPId request failed");
            AppError::Internal(format!("rAPId request {method} {path} failed: {error}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => error_details(&body)
                .unwrap_or_else(|| format!("rAPId responded with status {status}")),
            Err(error) => {
                warn!(%method, %path, %error, "failed to read rAPId error body");
                format!("rAPId responded with status {status} and an unreadable body: {error}")
            }
        };
        warn!(%method, %path, status = status.as_u16(), %message, "rAPId rejected request");
        Err(status_error(status, message))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let response = self.execute(Method::GET, url, None).await?;
        decode_json(response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Value,
    ) -> AppResult<T> {
        let response = self.execute(method, url, Some(body)).await?;
        decode_json(response).await
    }

    async fn delete(&self, url: Url, body: Option<Value>) -> AppResult<String> {
        let response = self.execute(Method::DELETE, url, body).await?;
        let text = response.text().await.map_err(|error| {
            AppError::Internal(format!("failed to read rAPId response: {error}"))
        })?;

        Ok(error_details(&text).unwrap_or(text))
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|error| AppError::Internal(format!("failed to decode rAPId response: {error}")))
}

/// Extracts the message rAPId puts in `details` (or FastAPI's `detail`).
fn error_details(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("details").or_else(|| value.get("detail"))? {
        Value::String(message) => Some(message.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn status_error(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::Validation(message)
        }
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Internal(message),
    }
}

fn token_values(tokens: &[PermissionToken]) -> Vec<&str> {
    tokens.iter().map(PermissionToken::as_str).collect()
}

#[async_trait]
impl PermissionCatalogGateway for HttpRapidClient {
    async fn fetch_permission_catalog(&self) -> AppResult<PermissionCatalog> {
        self.get_json(self.endpoint(&["api", "permissions_ui"])?)
            .await
    }

    async fn list_subject_permissions(
        &self,
        subject_id: &SubjectId,
    ) -> AppResult<Vec<AssignedPermission>> {
        self.get_json(self.endpoint(&["api", "permissions", subject_id.as_str()])?)
            .await
    }
}

#[async_trait]
impl SubjectGateway for HttpRapidClient {
    async fn list_subjects(&self) -> AppResult<Vec<SubjectSummary>> {
        self.get_json(self.endpoint(&["api", "subjects"])?).await
    }

    async fn create_user(&self, request: CreateUserRequest) -> AppResult<CreatedUser> {
        let body = json!({
            "username": request.username.as_str(),
            "email": request.email.as_str(),
            "permissions": token_values(&request.permissions),
        });
        self.send_json(Method::POST, self.endpoint(&["api", "user"])?, body)
            .await
    }

    async fn create_client(&self, request: CreateClientRequest) -> AppResult<CreatedClient> {
        let body = json!({
            "client_name": request.client_name.as_str(),
            "permissions": token_values(&request.permissions),
        });
        self.send_json(Method::POST, self.endpoint(&["api", "client"])?, body)
            .await
    }

    async fn update_subject_permissions(
        &self,
        subject_id: &SubjectId,
        permissions: Vec<PermissionToken>,
    ) -> AppResult<UpdatedSubjectPermissions> {
        let body = json!({
            "subject_id": subject_id.as_str(),
            "permissions": token_values(&permissions),
        });
        self.send_json(
            Method::PUT,
            self.endpoint(&["api", "subjects", "permissions"])?,
            body,
        )
        .await
    }

    async fn delete_user(&self, user_id: &SubjectId, username: &str) -> AppResult<String> {
        let body = json!({ "username": username, "user_id": user_id.as_str() });
        self.delete(self.endpoint(&["api", "user"])?, Some(body))
            .await
    }

    async fn delete_client(&self, client_id: &SubjectId) -> AppResult<String> {
        self.delete(self.endpoint(&["api", "client", client_id.as_str()])?, None)
            .await
    }
}

#[async_trait]
impl DatasetGateway for HttpRapidClient {
    async fn list_datasets(&self, action: DataAction) -> AppResult<Vec<DatasetSummary>> {
        self.get_json(self.endpoint(&["api", "datasets_ui", action.as_str()])?)
            .await
    }

    async fn dataset_info(
        &self,
        address: &DatasetAddress,
        version: Option<u32>,
    ) -> AppResult<DatasetInfo> {
        let mut url = self.endpoint(&[
            "api",
            "datasets",
            address.layer(),
            address.domain(),
            address.dataset(),
            "info",
        ])?;
        if let Some(version) = version {
            url.query_pairs_mut()
                .append_pair("version", &version.to_string());
        }

        self.get_json(url).await
    }

    async fn delete_dataset(&self, address: &DatasetAddress) -> AppResult<String> {
        self.delete(
            self.endpoint(&[
                "api",
                "datasets",
                address.layer(),
                address.domain(),
                address.dataset(),
            ])?,
            None,
        )
        .await
    }

    async fn search_catalog(&self, term: &str) -> AppResult<Vec<CatalogSearchHit>> {
        self.get_json(self.endpoint(&["api", "datasets", "search", term])?)
            .await
    }
}

#[async_trait]
impl JobGateway for HttpRapidClient {
    async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        self.get_json(self.endpoint(&["api", "jobs"])?).await
    }

    async fn get_job(&self, job_id: &str) -> AppResult<Job> {
        self.get_json(self.endpoint(&["api", "jobs", job_id])?)
            .await
    }
}
