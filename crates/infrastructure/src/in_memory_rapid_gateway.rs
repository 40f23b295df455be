use std::collections::BTreeMap;

use async_trait::async_trait;
use rapid_console_application::{
    CreateClientRequest, CreateUserRequest, DatasetGateway, JobGateway, PermissionCatalogGateway,
    SubjectGateway, UpdatedSubjectPermissions,
};
use rapid_console_core::{AppError, AppResult, SubjectId};
use rapid_console_domain::{
    AssignedPermission, CatalogSearchHit, CreatedClient, CreatedUser, DataAction, DatasetAddress,
    DatasetInfo, DatasetSummary, Job, PermissionCatalog, PermissionToken, SearchMatchKind,
    SubjectKind, SubjectSummary,
};
use tokio::sync::RwLock;

mod fixtures;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
struct StoredSubject {
    summary: SubjectSummary,
    permissions: Vec<PermissionToken>,
}

#[derive(Debug, Clone)]
struct StoredDataset {
    layer: String,
    info: DatasetInfo,
}

impl StoredDataset {
    fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            layer: self.layer.clone(),
            domain: self.info.metadata.domain.clone(),
            dataset: self.info.metadata.dataset.clone(),
            version: self.info.metadata.version.unwrap_or(1),
        }
    }

    fn matches(&self, address: &DatasetAddress) -> bool {
        self.layer == address.layer()
            && self.info.metadata.domain == address.domain()
            && self.info.metadata.dataset == address.dataset()
    }
}

/// In-process stand-in for rAPId, seeded with a small fixture catalog.
#[derive(Debug)]
pub struct InMemoryRapidGateway {
    catalog: PermissionCatalog,
    subjects: RwLock<BTreeMap<SubjectId, StoredSubject>>,
    datasets: RwLock<Vec<StoredDataset>>,
    jobs: Vec<Job>,
    next_subject: RwLock<u64>,
}

impl InMemoryRapidGateway {
    /// Creates a gateway holding the fixture catalog, subjects, datasets and jobs.
    pub fn seeded() -> AppResult<Self> {
        let catalog = fixtures::catalog()?;
        let subjects = fixtures::subjects()?
            .into_iter()
            .map(|(summary, permissions)| {
                (
                    summary.subject_id.clone(),
                    StoredSubject {
                        summary,
                        permissions,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        let datasets = fixtures::datasets()?
            .into_iter()
            .map(|(layer, info)| StoredDataset { layer, info })
            .collect();

        Ok(Self {
            catalog,
            next_subject: RwLock::new(subjects.len() as u64 + 1),
            subjects: RwLock::new(subjects),
            datasets: RwLock::new(datasets),
            jobs: fixtures::jobs()?,
        })
    }

    async fn issue_subject_id(&self, prefix: &str) -> AppResult<SubjectId> {
        let mut next = self.next_subject.write().await;
        let issued = SubjectId::new(format!("{prefix}-{next}"))?;
        *next += 1;
        Ok(issued)
    }

    fn check_tokens(&self, permissions: &[PermissionToken]) -> AppResult<()> {
        let leaves = self.catalog.leaves();
        match permissions
            .iter()
            .find(|token| !leaves.iter().any(|leaf| &leaf.token == *token))
        {
            Some(unknown) => Err(AppError::Validation(format!(
                "one or more of the provided permissions is invalid or duplicated: {unknown}"
            ))),
            None => Ok(()),
        }
    }

    async fn insert_subject(
        &self,
        kind: SubjectKind,
        name: &str,
        permissions: &[PermissionToken],
    ) -> AppResult<SubjectId> {
        self.check_tokens(permissions)?;

        let mut subjects = self.subjects.write().await;
        if subjects
            .values()
            .any(|stored| stored.summary.subject_name == name)
        {
            return Err(AppError::Conflict(format!(
                "subject with name '{name}' already exists"
            )));
        }

        let prefix = match kind {
            SubjectKind::User => "user",
            SubjectKind::Client => "client",
        };
        let subject_id = self.issue_subject_id(prefix).await?;
        subjects.insert(
            subject_id.clone(),
            StoredSubject {
                summary: SubjectSummary {
                    subject_id: subject_id.clone(),
                    subject_name: name.to_owned(),
                    kind,
                },
                permissions: permissions.to_vec(),
            },
        );

        Ok(subject_id)
    }

    async fn remove_subject(&self, subject_id: &SubjectId, kind: SubjectKind) -> AppResult<String> {
        let mut subjects = self.subjects.write().await;
        match subjects.get(subject_id) {
            Some(stored) if stored.summary.kind == kind => {}
            _ => {
                return Err(AppError::NotFound(format!(
                    "subject '{subject_id}' does not exist"
                )));
            }
        }

        let removed = subjects.remove(subject_id);
        Ok(format!(
            "{} has been deleted",
            removed
                .map(|stored| stored.summary.subject_name)
                .unwrap_or_default()
        ))
    }
}

#[async_trait]
impl PermissionCatalogGateway for InMemoryRapidGateway {
    async fn fetch_permission_catalog(&self) -> AppResult<PermissionCatalog> {
        Ok(self.catalog.clone())
    }

    async fn list_subject_permissions(
        &self,
        subject_id: &SubjectId,
    ) -> AppResult<Vec<AssignedPermission>> {
        let subjects = self.subjects.read().await;
        let stored = subjects.get(subject_id).ok_or_else(|| {
            AppError::NotFound(format!("subject '{subject_id}' does not exist"))
        })?;

        let leaves = self.catalog.leaves();
        Ok(stored
            .permissions
            .iter()
            .filter_map(|token| {
                leaves
                    .iter()
                    .find(|leaf| &leaf.token == token)
                    .map(|leaf| AssignedPermission {
                        token: leaf.token.clone(),
                        selection: leaf.selection.clone(),
                    })
            })
            .collect())
    }
}

#[async_trait]
impl SubjectGateway for InMemoryRapidGateway {
    async fn list_subjects(&self) -> AppResult<Vec<SubjectSummary>> {
        Ok(self
            .subjects
            .read()
            .await
            .values()
            .map(|stored| stored.summary.clone())
            .collect())
    }

    async fn create_user(&self, request: CreateUserRequest) -> AppResult<CreatedUser> {
        let user_id = self
            .insert_subject(
                SubjectKind::User,
                request.username.as_str(),
                &request.permissions,
            )
            .await?;

        Ok(CreatedUser {
            user_id,
            username: request.username.as_str().to_owned(),
            email: request.email.as_str().to_owned(),
            permissions: request.permissions,
        })
    }

    async fn create_client(&self, request: CreateClientRequest) -> AppResult<CreatedClient> {
        let client_id = self
            .insert_subject(
                SubjectKind::Client,
                request.client_name.as_str(),
                &request.permissions,
            )
            .await?;

        Ok(CreatedClient {
            client_secret: format!("local-secret-{client_id}"),
            client_id,
            client_name: request.client_name.as_str().to_owned(),
            permissions: request.permissions,
        })
    }

    async fn update_subject_permissions(
        &self,
        subject_id: &SubjectId,
        permissions: Vec<PermissionToken>,
    ) -> AppResult<UpdatedSubjectPermissions> {
        self.check_tokens(&permissions)?;

        let mut subjects = self.subjects.write().await;
        let stored = subjects.get_mut(subject_id).ok_or_else(|| {
            AppError::NotFound(format!("subject '{subject_id}' does not exist"))
        })?;
        stored.permissions.clone_from(&permissions);

        Ok(UpdatedSubjectPermissions {
            subject_id: subject_id.clone(),
            permissions,
        })
    }

    async fn delete_user(&self, user_id: &SubjectId, username: &str) -> AppResult<String> {
        let matches_name = self
            .subjects
            .read()
            .await
            .get(user_id)
            .is_some_and(|stored| stored.summary.subject_name == username);
        if !matches_name {
            return Err(AppError::Validation(format!(
                "username '{username}' does not belong to user '{user_id}'"
            )));
        }

        self.remove_subject(user_id, SubjectKind::User).await
    }

    async fn delete_client(&self, client_id: &SubjectId) -> AppResult<String> {
        self.remove_subject(client_id, SubjectKind::Client).await
    }
}

#[async_trait]
impl DatasetGateway for InMemoryRapidGateway {
    async fn list_datasets(&self, _action: DataAction) -> AppResult<Vec<DatasetSummary>> {
        Ok(self
            .datasets
            .read()
            .await
            .iter()
            .map(StoredDataset::summary)
            .collect())
    }

    async fn dataset_info(
        &self,
        address: &DatasetAddress,
        version: Option<u32>,
    ) -> AppResult<DatasetInfo> {
        let datasets = self.datasets.read().await;
        let stored = datasets
            .iter()
            .find(|stored| stored.matches(address))
            .ok_or_else(|| AppError::NotFound(format!("dataset '{address}' does not exist")))?;

        match version {
            Some(requested) if Some(requested) != stored.info.metadata.version => {
                Err(AppError::NotFound(format!(
                    "version {requested} of dataset '{address}' does not exist"
                )))
            }
            _ => Ok(stored.info.clone()),
        }
    }

    async fn delete_dataset(&self, address: &DatasetAddress) -> AppResult<String> {
        let mut datasets = self.datasets.write().await;
        let before = datasets.len();
        datasets.retain(|stored| !stored.matches(address));
        if datasets.len() == before {
            return Err(AppError::NotFound(format!(
                "dataset '{address}' does not exist"
            )));
        }

        Ok(format!("{address} has been deleted"))
    }

    async fn search_catalog(&self, term: &str) -> AppResult<Vec<CatalogSearchHit>> {
        let needle = term.to_lowercase();
        let datasets = self.datasets.read().await;
        let mut hits = Vec::new();

        for stored in datasets.iter() {
            let metadata = &stored.info.metadata;
            let version = metadata.version.unwrap_or(1).to_string();
            let mut push = |data: &str, data_type: SearchMatchKind| {
                hits.push(CatalogSearchHit {
                    dataset: metadata.dataset.clone(),
                    domain: metadata.domain.clone(),
                    data: data.to_owned(),
                    version: version.clone(),
                    data_type,
                });
            };

            if metadata.dataset.to_lowercase().contains(&needle) {
                push(&metadata.dataset, SearchMatchKind::DataName);
            }
            if let Some(description) = metadata
                .description
                .as_deref()
                .filter(|description| description.to_lowercase().contains(&needle))
            {
                push(description, SearchMatchKind::Description);
            }
            for column in &stored.info.columns {
                if column.name.to_lowercase().contains(&needle) {
                    push(&column.name, SearchMatchKind::ColumnName);
                }
            }
        }

        Ok(hits)
    }
}

#[async_trait]
impl JobGateway for InMemoryRapidGateway {
    async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        Ok(self.jobs.clone())
    }

    async fn get_job(&self, job_id: &str) -> AppResult<Job> {
        self.jobs
            .iter()
            .find(|job| job.job_id == job_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("job '{job_id}' does not exist")))
    }
}
