// Interface adapters: HTTP clients, middleware, persistence and wire types.

pub mod assets;
pub mod clients;
pub mod endpoints;
pub mod middleware;
pub mod protocol;
pub mod stores;
