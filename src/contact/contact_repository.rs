use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::store::{DocumentClient, StoreResult};

use super::contact_models::Contact;

const COLLECTION: &str = "contacts";

/// Read-only view of the shared contact list.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// All contacts, sorted by name.
    async fn read_all(&self) -> StoreResult<Vec<Contact>>;
}

fn sort_by_name(mut contacts: Vec<Contact>) -> Vec<Contact> {
    contacts.sort_by_key(|c| c.name.to_lowercase());
    contacts
}

#[derive(Clone)]
pub struct RemoteContactDirectory {
    client: DocumentClient,
}

impl RemoteContactDirectory {
    pub fn new(client: DocumentClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactDirectory for RemoteContactDirectory {
    async fn read_all(&self) -> StoreResult<Vec<Contact>> {
        let records: BTreeMap<String, Contact> =
            self.client.get(COLLECTION).await?.unwrap_or_default();
        Ok(sort_by_name(records.into_values().collect()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryContactDirectory {
    contacts: Vec<Contact>,
}

impl InMemoryContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ContactDirectory for InMemoryContactDirectory {
    async fn read_all(&self) -> StoreResult<Vec<Contact>> {
        Ok(sort_by_name(self.contacts.clone()))
    }
}
