//! Contacts collection: record type, default seed and the service
//! performing list/get/create/delete against injected storage.

pub mod domain;
pub mod service;

pub use domain::{default_contacts, Contact, CONTACTS_COLLECTION};
pub use service::ContactService;
