// The clients defined here wrap reqwest with the session-aware middleware.

mod authenticated;
mod guest;
mod http;

pub use authenticated::AuthenticatedClient;
pub use guest::GuestAuthenticatedClient;
pub use http::ApiClient;
