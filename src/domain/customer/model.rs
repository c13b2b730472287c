//! Customer domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable customer fields, used for both create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    /// Applies an edit, keeping identity and creation time.
    pub fn apply(&mut self, draft: CustomerDraft) {
        self.name = draft.name;
        self.phone = draft.phone;
        self.email = draft.email;
        self.address = draft.address;
        self.updated_at = Utc::now();
    }
}
