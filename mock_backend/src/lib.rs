pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::entities::{Order, Principal};
pub use frameworks::server::{run, serve};
pub use interface_adapters::state::{AppState, RecordedRequest, RequestLog};
