//! Application services and ports.

#![forbid(unsafe_code)]

mod dataset_service;
mod job_service;
mod permission_options;
mod rapid_ports;
mod subject_service;

pub use dataset_service::DatasetService;
pub use job_service::JobService;
pub use permission_options::{
    SelectionFlow, available_options_for_create, available_options_for_modify,
    compute_available_options,
};
pub use rapid_ports::{
    CreateClientRequest, CreateUserRequest, DatasetGateway, JobGateway, PermissionCatalogGateway,
    SubjectGateway, UpdatedSubjectPermissions,
};
pub use subject_service::{
    CreateClientInput, CreateUserInput, PermissionOptions, SubjectPermissions, SubjectService,
};
