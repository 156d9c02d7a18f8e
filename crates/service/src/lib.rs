//! Service layer for the contact list.
//! - `storage` persists named collections as JSON documents.
//! - `contacts` implements list/get/create/delete over the contacts collection.
//! - Storage failures surface as `errors::StorageError`.

pub mod errors;
pub mod storage;
pub mod contacts;
