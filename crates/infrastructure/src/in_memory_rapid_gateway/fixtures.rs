//! Seed data for the in-memory gateway.

use rapid_console_core::{AppError, AppResult, SubjectId};
use rapid_console_domain::{
    DatasetInfo, Job, PermissionCatalog, PermissionToken, SubjectKind, SubjectSummary,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

fn decode<T: DeserializeOwned>(label: &str, value: Value) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|error| AppError::Internal(format!("invalid {label} fixture: {error}")))
}

pub(super) fn catalog() -> AppResult<PermissionCatalog> {
    decode(
        "permission catalog",
        json!({
            "DATA_ADMIN": "DATA_ADMIN",
            "USER_ADMIN": "USER_ADMIN",
            "READ": {
                "ALL": {
                    "ALL": "READ_ALL",
                    "PUBLIC": "READ_ALL_PUBLIC",
                    "PRIVATE": "READ_ALL_PRIVATE"
                },
                "default": {
                    "ALL": "READ_DEFAULT_ALL",
                    "PUBLIC": "READ_DEFAULT_PUBLIC",
                    "PRIVATE": "READ_DEFAULT_PRIVATE",
                    "PROTECTED": {
                        "sales": "READ_DEFAULT_PROTECTED_SALES",
                        "hr": "READ_DEFAULT_PROTECTED_HR"
                    }
                },
                "raw": {
                    "PUBLIC": "READ_RAW_PUBLIC",
                    "PROTECTED": { "sales": "READ_RAW_PROTECTED_SALES" }
                }
            },
            "WRITE": {
                "ALL": { "ALL": "WRITE_ALL" },
                "default": {
                    "ALL": "WRITE_DEFAULT_ALL",
                    "PUBLIC": "WRITE_DEFAULT_PUBLIC",
                    "PRIVATE": "WRITE_DEFAULT_PRIVATE",
                    "PROTECTED": { "sales": "WRITE_DEFAULT_PROTECTED_SALES" }
                }
            }
        }),
    )
}

pub(super) fn subjects() -> AppResult<Vec<(SubjectSummary, Vec<PermissionToken>)>> {
    let seed = [
        (
            "user-1",
            "ada.admin",
            SubjectKind::User,
            &["USER_ADMIN", "DATA_ADMIN"][..],
        ),
        (
            "user-2",
            "sam.analyst",
            SubjectKind::User,
            &["READ_DEFAULT_PUBLIC", "READ_DEFAULT_PROTECTED_SALES"][..],
        ),
        (
            "client-3",
            "ingest-pipeline",
            SubjectKind::Client,
            &["WRITE_DEFAULT_ALL"][..],
        ),
    ];

    seed.into_iter()
        .map(|(subject_id, subject_name, kind, permissions)| {
            Ok((
                SubjectSummary {
                    subject_id: SubjectId::new(subject_id)?,
                    subject_name: subject_name.to_owned(),
                    kind,
                },
                permissions.iter().copied().map(PermissionToken::new).collect(),
            ))
        })
        .collect()
}

pub(super) fn datasets() -> AppResult<Vec<(String, DatasetInfo)>> {
    Ok(vec![
        (
            "default".to_owned(),
            decode(
                "dataset",
                json!({
                    "metadata": {
                        "domain": "sales",
                        "dataset": "orders",
                        "sensitivity": "PROTECTED",
                        "description": "Customer orders by region",
                        "version": 2,
                        "key_value_tags": { "owner": "sales-ops" },
                        "key_only_tags": ["finance"],
                        "owners": [{ "name": "Sales Ops", "email": "sales-ops@example.com" }],
                        "update_behaviour": "APPEND",
                        "number_of_columns": 3,
                        "number_of_rows": 1250,
                        "last_updated": "2026-09-30 08:15:00+00:00"
                    },
                    "columns": [
                        { "name": "order_id", "data_type": "string", "allow_null": false },
                        { "name": "region", "partition_index": 0, "data_type": "string", "allow_null": false },
                        {
                            "name": "total_amount",
                            "data_type": "double",
                            "allow_null": true,
                            "statistics": { "max": "9800.5", "min": "1.2" }
                        }
                    ]
                }),
            )?,
        ),
        (
            "raw".to_owned(),
            decode(
                "dataset",
                json!({
                    "metadata": {
                        "domain": "weather",
                        "dataset": "daily_readings",
                        "sensitivity": "PUBLIC",
                        "description": "Daily station readings",
                        "version": 1,
                        "update_behaviour": "OVERWRITE",
                        "number_of_columns": 2,
                        "number_of_rows": 365,
                        "last_updated": "2026-10-01 00:00:00+00:00"
                    },
                    "columns": [
                        {
                            "name": "reading_date",
                            "data_type": "date",
                            "allow_null": false,
                            "format": "%Y-%m-%d"
                        },
                        { "name": "temperature", "data_type": "double", "allow_null": true }
                    ]
                }),
            )?,
        ),
    ])
}

pub(super) fn jobs() -> AppResult<Vec<Job>> {
    decode(
        "job",
        json!([
            {
                "job_id": "job-upload-1",
                "type": "UPLOAD",
                "status": "SUCCESS",
                "step": "-",
                "domain": "sales",
                "dataset": "orders",
                "version": 2,
                "filename": "orders_2026_09.csv"
            },
            {
                "job_id": "job-upload-2",
                "type": "UPLOAD",
                "status": "IN PROGRESS",
                "step": "VALIDATION",
                "domain": "weather",
                "dataset": "daily_readings",
                "version": 1,
                "filename": "readings.csv"
            },
            {
                "job_id": "job-upload-3",
                "type": "UPLOAD",
                "status": "FAILED",
                "step": "VALIDATION",
                "domain": "sales",
                "dataset": "orders",
                "version": 2,
                "errors": ["Column [total_amount] has an incorrect data type"],
                "filename": "orders_broken.csv"
            }
        ]),
    )
}
