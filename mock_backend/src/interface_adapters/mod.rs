// Interface adapters: HTTP handlers, routing and request recording.

pub mod handlers;
pub mod payload;
pub mod protocol;
pub mod recorder;
pub mod routes;
pub mod state;
