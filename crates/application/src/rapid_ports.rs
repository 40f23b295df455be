mod datasets;
mod jobs;
mod permissions;
mod subjects;

pub use datasets::DatasetGateway;
pub use jobs::JobGateway;
pub use permissions::PermissionCatalogGateway;
pub use subjects::{
    CreateClientRequest, CreateUserRequest, SubjectGateway, UpdatedSubjectPermissions,
};
