//! Provider reference registry used to enrich extracted invoices.

mod reader;

use std::collections::HashMap;

use serde::Serialize;

pub use self::reader::{read_providers, read_providers_sheet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderRecord {
    pub tax_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub bank_account: Option<String>,
    pub phone: Option<String>,
    pub swift: Option<String>,
}

impl ProviderRecord {
    pub fn new(tax_id: &str) -> ProviderRecord {
        ProviderRecord {
            tax_id: tax_id.to_owned(),
            ..Default::default()
        }
    }
}

/// Read-only provider lookup by exact tax id.
pub trait ProviderRegistry {
    fn find_provider(&self, tax_id: &str) -> Option<&ProviderRecord>;
}

#[derive(Default)]
pub struct ProviderDirectory {
    providers: HashMap<String, ProviderRecord>,
}

impl ProviderDirectory {
    pub fn new() -> ProviderDirectory {
        ProviderDirectory::default()
    }

    /// Inserts or updates a provider. An update keeps the known name if the new record has none.
    pub fn insert(&mut self, mut provider: ProviderRecord) {
        if let Some(existing) = self.providers.get(&provider.tax_id) {
            if provider.name.is_none() {
                provider.name = existing.name.clone();
            }
        }
        self.providers.insert(provider.tax_id.clone(), provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns providers sorted by tax id.
    pub fn providers(&self) -> Vec<&ProviderRecord> {
        let mut providers: Vec<_> = self.providers.values().collect();
        providers.sort_by(|a, b| a.tax_id.cmp(&b.tax_id));
        providers
    }
}

impl ProviderRegistry for ProviderDirectory {
    fn find_provider(&self, tax_id: &str) -> Option<&ProviderRecord> {
        self.providers.get(tax_id)
    }
}

impl FromIterator<ProviderRecord> for ProviderDirectory {
    fn from_iter<I: IntoIterator<Item = ProviderRecord>>(iter: I) -> ProviderDirectory {
        let mut directory = ProviderDirectory::new();
        for provider in iter {
            directory.insert(provider);
        }
        directory
    }
}
