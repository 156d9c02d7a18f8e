pub mod routes;
pub mod startup;
pub mod state;
pub mod metrics;
pub mod errors;
pub mod openapi;

pub use startup::run;
