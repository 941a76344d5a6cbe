// Use cases layer: backend workflows independent of axum.

pub mod guest_token;
pub mod orders;
pub mod sign_in;
pub mod sign_out;
pub mod verify_token;

#[cfg(test)]
pub(crate) mod test_support;
