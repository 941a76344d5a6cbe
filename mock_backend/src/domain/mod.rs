// Domain layer: accounts, tables, tokens and the errors around them.

pub mod entities;
pub mod errors;
pub mod ports;
