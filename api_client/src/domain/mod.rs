mod entities;
mod errors;
mod ports;
mod request;

// Re-export the domain boundary types and ports.
pub use entities::{GuestContext, Locale, SessionKey};
pub use errors::{ClientError, FieldErrors, StoreError};
pub use ports::{SessionStore, UnauthorizedHandler};
pub use request::{ApiResponse, ContentKind, FilePart, RequestEnvelope};
