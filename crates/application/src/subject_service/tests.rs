use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use rapid_console_core::{AppError, AppResult, SubjectId};
use rapid_console_domain::{
    AssignedPermission, CreatedClient, CreatedUser, PermissionCatalog, PermissionSelection,
    PermissionToken, SubjectKind, SubjectSummary,
};

use crate::permission_options::SelectionFlow;
use crate::rapid_ports::{
    CreateClientRequest, CreateUserRequest, PermissionCatalogGateway, SubjectGateway,
    UpdatedSubjectPermissions,
};

use super::{CreateClientInput, CreateUserInput, SubjectService};

fn catalog() -> PermissionCatalog {
    serde_json::from_value(json!({
        "DATA_ADMIN": "DATA_ADMIN",
        "USER_ADMIN": "USER_ADMIN",
        "READ": {
            "default": {
                "ALL": "READ_DEFAULT_ALL",
                "PUBLIC": "READ_DEFAULT_PUBLIC",
                "PROTECTED": {
                    "sales": "READ_DEFAULT_PROTECTED_SALES",
                    "hr": "READ_DEFAULT_PROTECTED_HR"
                }
            }
        }
    }))
    .unwrap_or_else(|error| panic!("invalid catalog: {error}"))
}

fn selection(value: serde_json::Value) -> PermissionSelection {
    serde_json::from_value(value).unwrap_or_else(|error| panic!("invalid selection: {error}"))
}

fn subject_id(value: &str) -> SubjectId {
    SubjectId::new(value).unwrap_or_else(|_| unreachable!())
}

struct FakeCatalogGateway {
    catalog: PermissionCatalog,
    assigned: Vec<AssignedPermission>,
}

#[async_trait]
impl PermissionCatalogGateway for FakeCatalogGateway {
    async fn fetch_permission_catalog(&self) -> AppResult<PermissionCatalog> {
        Ok(self.catalog.clone())
    }

    async fn list_subject_permissions(
        &self,
        subject_id: &SubjectId,
    ) -> AppResult<Vec<AssignedPermission>> {
        if subject_id.as_str() == "missing" {
            return Err(AppError::NotFound("subject not found".to_owned()));
        }
        Ok(self.assigned.clone())
    }
}

#[derive(Default)]
struct FakeSubjectGateway {
    subjects: Vec<SubjectSummary>,
    created_users: Mutex<Vec<CreateUserRequest>>,
    created_clients: Mutex<Vec<CreateClientRequest>>,
    updates: Mutex<Vec<(SubjectId, Vec<PermissionToken>)>>,
    deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl SubjectGateway for FakeSubjectGateway {
    async fn list_subjects(&self) -> AppResult<Vec<SubjectSummary>> {
        Ok(self.subjects.clone())
    }

    async fn create_user(&self, request: CreateUserRequest) -> AppResult<CreatedUser> {
        let created = CreatedUser {
            user_id: subject_id("user-1"),
            username: request.username.as_str().to_owned(),
            email: request.email.as_str().to_owned(),
            permissions: request.permissions.clone(),
        };
        self.created_users.lock().await.push(request);
        Ok(created)
    }

    async fn create_client(&self, request: CreateClientRequest) -> AppResult<CreatedClient> {
        let created = CreatedClient {
            client_id: subject_id("client-1"),
            client_name: request.client_name.as_str().to_owned(),
            client_secret: "secret".to_owned(),
            permissions: request.permissions.clone(),
        };
        self.created_clients.lock().await.push(request);
        Ok(created)
    }

    async fn update_subject_permissions(
        &self,
        subject_id: &SubjectId,
        permissions: Vec<PermissionToken>,
    ) -> AppResult<UpdatedSubjectPermissions> {
        self.updates
            .lock()
            .await
            .push((subject_id.clone(), permissions.clone()));
        Ok(UpdatedSubjectPermissions {
            subject_id: subject_id.clone(),
            permissions,
        })
    }

    async fn delete_user(&self, user_id: &SubjectId, username: &str) -> AppResult<String> {
        self.deleted
            .lock()
            .await
            .push(format!("{user_id}:{username}"));
        Ok(format!("Successfully deleted user {username}"))
    }

    async fn delete_client(&self, client_id: &SubjectId) -> AppResult<String> {
        self.deleted.lock().await.push(client_id.to_string());
        Ok(format!("Successfully deleted client {client_id}"))
    }
}

fn assigned_sales() -> AssignedPermission {
    serde_json::from_value(json!({
        "name": "READ_DEFAULT_PROTECTED_SALES",
        "type": "READ",
        "layer": "default",
        "sensitivity": "PROTECTED",
        "domain": "sales"
    }))
    .unwrap_or_else(|error| panic!("invalid assigned permission: {error}"))
}

fn build_service(subject_gateway: Arc<FakeSubjectGateway>) -> SubjectService {
    SubjectService::new(
        Arc::new(FakeCatalogGateway {
            catalog: catalog(),
            assigned: vec![assigned_sales()],
        }),
        subject_gateway,
    )
}

#[tokio::test]
async fn permission_options_report_remaining_choices() {
    let service = build_service(Arc::new(FakeSubjectGateway::default()));

    let options = service
        .permission_options(
            &[
                selection(json!({ "type": "DATA_ADMIN" })),
                selection(json!({ "type": "USER_ADMIN" })),
                selection(json!({ "type": "READ", "layer": "default", "sensitivity": "ALL" })),
            ],
            SelectionFlow::Create,
        )
        .await;
    assert!(options.is_ok());

    let options = options.unwrap_or_else(|_| unreachable!());
    assert!(options.options.is_empty());
    assert!(options.choices.is_empty());
    assert!(!options.can_add_more);
}

#[tokio::test]
async fn permission_options_reject_conflicts_when_creating() {
    let service = build_service(Arc::new(FakeSubjectGateway::default()));
    let duplicate = selection(json!({ "type": "USER_ADMIN" }));

    let options = service
        .permission_options(&[duplicate.clone(), duplicate], SelectionFlow::Create)
        .await;
    assert!(matches!(options, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn list_subjects_keeps_requested_kind() {
    let subjects = vec![
        SubjectSummary {
            subject_id: subject_id("2"),
            subject_name: "zoe".to_owned(),
            kind: SubjectKind::User,
        },
        SubjectSummary {
            subject_id: subject_id("3"),
            subject_name: "ingest-bot".to_owned(),
            kind: SubjectKind::Client,
        },
        SubjectSummary {
            subject_id: subject_id("1"),
            subject_name: "Adam".to_owned(),
            kind: SubjectKind::User,
        },
    ];
    let service = build_service(Arc::new(FakeSubjectGateway {
        subjects,
        ..FakeSubjectGateway::default()
    }));

    let users = service.list_subjects(SubjectKind::User).await;
    assert!(users.is_ok());
    let names: Vec<String> = users
        .unwrap_or_default()
        .into_iter()
        .map(|subject| subject.subject_name)
        .collect();
    assert_eq!(names, vec!["Adam".to_owned(), "zoe".to_owned()]);
}

#[tokio::test]
async fn create_user_resolves_selections_to_tokens() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());

    let created = service
        .create_user(CreateUserInput {
            username: "jane.doe".to_owned(),
            email: "Jane.Doe@example.com".to_owned(),
            permissions: vec![
                selection(json!({ "type": "USER_ADMIN" })),
                selection(json!({
                    "type": "READ",
                    "layer": "default",
                    "sensitivity": "PROTECTED",
                    "domain": "hr"
                })),
            ],
        })
        .await;
    assert!(created.is_ok());

    let requests = gateway.created_users.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].email.as_str(), "jane.doe@example.com");
    assert_eq!(
        requests[0].permissions,
        vec![
            PermissionToken::new("USER_ADMIN"),
            PermissionToken::new("READ_DEFAULT_PROTECTED_HR"),
        ]
    );
}

#[tokio::test]
async fn create_user_rejects_conflicting_selections_before_calling_rapid() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());

    let created = service
        .create_user(CreateUserInput {
            username: "jane.doe".to_owned(),
            email: "jane@example.com".to_owned(),
            permissions: vec![
                selection(json!({ "type": "READ", "layer": "default", "sensitivity": "ALL" })),
                selection(json!({ "type": "READ", "layer": "default", "sensitivity": "PUBLIC" })),
            ],
        })
        .await;
    assert!(matches!(created, Err(AppError::Conflict(_))));
    assert!(gateway.created_users.lock().await.is_empty());
}

#[tokio::test]
async fn create_user_rejects_invalid_name() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());

    let created = service
        .create_user(CreateUserInput {
            username: "9lives".to_owned(),
            email: "cat@example.com".to_owned(),
            permissions: Vec::new(),
        })
        .await;
    assert!(matches!(created, Err(AppError::Validation(_))));
    assert!(gateway.created_users.lock().await.is_empty());
}

#[tokio::test]
async fn create_client_rejects_incomplete_selection() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());

    let created = service
        .create_client(CreateClientInput {
            client_name: "ingest-bot".to_owned(),
            permissions: vec![selection(json!({
                "type": "READ",
                "layer": "default",
                "sensitivity": "PROTECTED"
            }))],
        })
        .await;
    assert!(matches!(created, Err(AppError::Validation(_))));
    assert!(gateway.created_clients.lock().await.is_empty());
}

#[tokio::test]
async fn create_client_returns_secret() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());

    let created = service
        .create_client(CreateClientInput {
            client_name: "ingest-bot".to_owned(),
            permissions: vec![selection(json!({ "type": "DATA_ADMIN" }))],
        })
        .await;
    assert!(created.is_ok());

    let created = created.unwrap_or_else(|_| unreachable!());
    assert_eq!(created.client_secret, "secret");
    assert_eq!(created.permissions, vec![PermissionToken::new("DATA_ADMIN")]);
}

#[tokio::test]
async fn subject_permissions_seed_modify_options() {
    let service = build_service(Arc::new(FakeSubjectGateway::default()));

    let permissions = service.subject_permissions(&subject_id("user-1")).await;
    assert!(permissions.is_ok());

    let permissions = permissions.unwrap_or_else(|_| unreachable!());
    assert_eq!(permissions.assigned, vec![assigned_sales()]);
    assert!(permissions.options.can_add_more);
    assert!(
        permissions
            .options
            .choices
            .iter()
            .all(|choice| choice.token.as_str() != "READ_DEFAULT_PROTECTED_SALES")
    );
    assert!(
        permissions
            .options
            .choices
            .iter()
            .any(|choice| choice.token.as_str() == "READ_DEFAULT_PROTECTED_HR")
    );
}

#[tokio::test]
async fn subject_permissions_propagate_missing_subject() {
    let service = build_service(Arc::new(FakeSubjectGateway::default()));

    let permissions = service.subject_permissions(&subject_id("missing")).await;
    assert!(matches!(permissions, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn update_accepts_overlapping_selections_and_dedupes_tokens() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());
    let admin = selection(json!({ "type": "DATA_ADMIN" }));

    let updated = service
        .update_subject_permissions(
            &subject_id("user-1"),
            &[
                admin.clone(),
                selection(json!({ "type": "READ", "layer": "default", "sensitivity": "ALL" })),
                selection(json!({ "type": "READ", "layer": "default", "sensitivity": "PUBLIC" })),
                admin,
            ],
        )
        .await;
    assert!(updated.is_ok());

    let updates = gateway.updates.lock().await;
    assert_eq!(
        updates[0].1,
        vec![
            PermissionToken::new("DATA_ADMIN"),
            PermissionToken::new("READ_DEFAULT_ALL"),
            PermissionToken::new("READ_DEFAULT_PUBLIC"),
        ]
    );
}

#[tokio::test]
async fn delete_user_requires_username() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());

    let deleted = service.delete_user(&subject_id("user-1"), "  ").await;
    assert!(matches!(deleted, Err(AppError::Validation(_))));

    let deleted = service.delete_user(&subject_id("user-1"), "jane").await;
    assert!(deleted.is_ok());
    assert_eq!(*gateway.deleted.lock().await, vec!["user-1:jane".to_owned()]);
}

#[tokio::test]
async fn delete_client_forwards_identifier() {
    let gateway = Arc::new(FakeSubjectGateway::default());
    let service = build_service(gateway.clone());

    let deleted = service.delete_client(&subject_id("client-1")).await;
    assert_eq!(
        deleted.unwrap_or_default(),
        "Successfully deleted client client-1"
    );
}
