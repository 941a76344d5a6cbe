pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{
    ApiResponse, ClientError, ContentKind, FilePart, GuestContext, Locale, RequestEnvelope,
    SessionKey, SessionStore, StoreError, UnauthorizedHandler,
};
pub use frameworks::config::{ClientConfig, ConfigError};
pub use interface_adapters::assets::AssetResolver;
pub use interface_adapters::clients::{ApiClient, AuthenticatedClient, GuestAuthenticatedClient};
pub use interface_adapters::endpoints::{AdminApi, GuestApi, Resource};
pub use interface_adapters::stores::{FileSessionStore, InMemorySessionStore};
pub use use_cases::dates::{display_date_time, month_ago, today};
pub use use_cases::{PollUpdate, Poller, Session};
