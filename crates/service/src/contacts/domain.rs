use serde::{Deserialize, Serialize};

/// Logical name of the contacts collection (`contacts.json` on disk).
pub const CONTACTS_COLLECTION: &str = "contacts";

/// A single contact record.
///
/// `id` is supplied by the client and is not guaranteed unique. Missing
/// fields in an incoming body fall back to their defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub id: i32,
    pub email_address: String,
    pub name: String,
}

impl Contact {
    pub fn new(id: i32, email_address: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id, email_address: email_address.into(), name: name.into() }
    }
}

/// Contacts written when the collection does not exist yet.
pub fn default_contacts() -> Vec<Contact> {
    vec![
        Contact::new(1, "barney@contoso.com", "Barney Poland"),
        Contact::new(2, "lacy@contoso.com", "Lacy Barrera"),
        Contact::new(3, "lora@microsoft.com", "Lora Riggs"),
    ]
}
