//! Shared building blocks for the contact list workspace:
//! logging bootstrap and small wire types.

pub mod types;

pub mod utils {
    pub mod logging;
}
