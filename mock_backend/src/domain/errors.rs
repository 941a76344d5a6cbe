// Domain-level errors for backend workflows.
#[derive(Debug, PartialEq)]
pub enum BackendError {
    // Field name and message pairs, reported as 422.
    Validation(Vec<(String, String)>),
    InvalidCredentials,
    Unauthenticated,
    UnknownTable,
    NotFound,
    StorageFailure,
}
