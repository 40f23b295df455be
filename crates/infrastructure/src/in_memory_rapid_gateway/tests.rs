use std::sync::Arc;

use rapid_console_application::{
    CreateClientRequest, CreateUserRequest, DatasetGateway, JobGateway, PermissionCatalogGateway,
    SubjectGateway,
};
use rapid_console_core::{AppError, SubjectId};
use rapid_console_domain::{
    DataAction, DatasetAddress, EmailAddress, PermissionToken, SearchMatchKind, SubjectKind,
    SubjectName,
};

use super::InMemoryRapidGateway;

fn gateway() -> InMemoryRapidGateway {
    InMemoryRapidGateway::seeded().unwrap_or_else(|error| panic!("invalid fixtures: {error}"))
}

fn subject_id(value: &str) -> SubjectId {
    SubjectId::new(value).unwrap_or_else(|_| unreachable!())
}

fn name(value: &str) -> SubjectName {
    SubjectName::new(value).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn seeded_subject_permissions_decode_to_selections() {
    let gateway = gateway();

    let assigned = gateway
        .list_subject_permissions(&subject_id("user-2"))
        .await;
    assert!(assigned.is_ok());

    let rendered: Vec<String> = assigned
        .unwrap_or_default()
        .iter()
        .map(|permission| permission.selection.to_string())
        .collect();
    assert_eq!(
        rendered,
        vec!["READ/default/PUBLIC", "READ/default/PROTECTED/sales"]
    );
}

#[tokio::test]
async fn create_user_rejects_duplicate_name_and_unknown_token() {
    let gateway = gateway();
    let email = EmailAddress::new("ada@example.com").unwrap_or_else(|_| unreachable!());

    let duplicate = gateway
        .create_user(CreateUserRequest {
            username: name("ada.admin"),
            email: email.clone(),
            permissions: Vec::new(),
        })
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let unknown = gateway
        .create_user(CreateUserRequest {
            username: name("new.user"),
            email,
            permissions: vec![PermissionToken::new("READ_NOWHERE")],
        })
        .await;
    assert!(matches!(unknown, Err(AppError::Validation(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_one_name_register_once() {
    let gateway = Arc::new(gateway());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let gateway = Arc::clone(&gateway);
            tokio::spawn(async move {
                gateway
                    .create_client(CreateClientRequest {
                        client_name: name("etl-runner"),
                        permissions: Vec::new(),
                    })
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await {
            Ok(Ok(_)) => created += 1,
            Ok(Err(error)) => assert!(matches!(error, AppError::Conflict(_))),
            Err(error) => panic!("create task panicked: {error}"),
        }
    }
    assert_eq!(created, 1);

    let listed = gateway.list_subjects().await.unwrap_or_default();
    assert_eq!(
        listed
            .iter()
            .filter(|subject| subject.subject_name == "etl-runner")
            .count(),
        1
    );
}

#[tokio::test]
async fn created_client_is_listed_and_deletable() {
    let gateway = gateway();

    let created = gateway
        .create_client(CreateClientRequest {
            client_name: name("report-bot"),
            permissions: vec![PermissionToken::new("READ_RAW_PUBLIC")],
        })
        .await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| unreachable!());
    assert_eq!(created.client_id.as_str(), "client-4");

    let listed = gateway.list_subjects().await.unwrap_or_default();
    assert!(listed.iter().any(|subject| {
        subject.subject_id == created.client_id && subject.kind == SubjectKind::Client
    }));

    let wrong_kind = gateway.delete_user(&created.client_id, "report-bot").await;
    assert!(matches!(wrong_kind, Err(AppError::NotFound(_))));

    let deleted = gateway.delete_client(&created.client_id).await;
    assert_eq!(deleted.unwrap_or_default(), "report-bot has been deleted");
}

#[tokio::test]
async fn delete_user_requires_matching_username() {
    let gateway = gateway();

    let mismatch = gateway.delete_user(&subject_id("user-1"), "sam.analyst").await;
    assert!(matches!(mismatch, Err(AppError::Validation(_))));

    let deleted = gateway.delete_user(&subject_id("user-1"), "ada.admin").await;
    assert!(deleted.is_ok());
}

#[tokio::test]
async fn update_replaces_held_tokens() {
    let gateway = gateway();
    let client_id = subject_id("client-3");

    let updated = gateway
        .update_subject_permissions(&client_id, vec![PermissionToken::new("WRITE_ALL")])
        .await;
    assert!(updated.is_ok());

    let assigned = gateway.list_subject_permissions(&client_id).await;
    let tokens: Vec<String> = assigned
        .unwrap_or_default()
        .into_iter()
        .map(|permission| permission.token.as_str().to_owned())
        .collect();
    assert_eq!(tokens, vec!["WRITE_ALL"]);
}

#[tokio::test]
async fn dataset_info_honours_version_and_delete() {
    let gateway = gateway();
    let address =
        DatasetAddress::new("default", "sales", "orders").unwrap_or_else(|_| unreachable!());

    assert!(gateway.dataset_info(&address, None).await.is_ok());
    assert!(gateway.dataset_info(&address, Some(2)).await.is_ok());
    assert!(matches!(
        gateway.dataset_info(&address, Some(7)).await,
        Err(AppError::NotFound(_))
    ));

    assert!(gateway.delete_dataset(&address).await.is_ok());
    assert_eq!(
        gateway
            .list_datasets(DataAction::Read)
            .await
            .unwrap_or_default()
            .len(),
        1
    );
    assert!(matches!(
        gateway.delete_dataset(&address).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn search_matches_names_descriptions_and_columns() {
    let gateway = gateway();

    let hits = gateway.search_catalog("ORDER").await.unwrap_or_default();
    let kinds: Vec<SearchMatchKind> = hits.iter().map(|hit| hit.data_type).collect();
    assert_eq!(
        kinds,
        vec![
            SearchMatchKind::DataName,
            SearchMatchKind::Description,
            SearchMatchKind::ColumnName,
        ]
    );
    assert!(hits.iter().all(|hit| hit.version == "2"));
}

#[tokio::test]
async fn get_job_reports_missing_job() {
    let gateway = gateway();

    assert_eq!(gateway.list_jobs().await.unwrap_or_default().len(), 3);
    assert!(matches!(
        gateway.get_job("job-404").await,
        Err(AppError::NotFound(_))
    ));
}
