// Use cases layer: session handling and client-side helpers.

pub mod dates;
pub mod locale;
pub mod polling;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use polling::{PollUpdate, Poller};
pub use session::Session;
