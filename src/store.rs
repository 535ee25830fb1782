use crate::{
    budget::MonthlyBudget,
    transaction::{Expense, Income},
};
use log::trace;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt};
use thiserror::Error;

/// The record collections held by the document store
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Expenses,
    Income,
    Budgets,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no document '{id}' in {collection}")]
    NotFound { collection: Collection, id: String },
    #[error("documents in {0} must be JSON objects")]
    InvalidDocument(Collection),
    #[error("could not convert document")]
    Serialization(#[from] serde_json::Error),
}

/// A document store holding the expense, income and budget collections.
///
/// Documents are JSON objects. The store assigns each document an opaque id when
/// it is created; the id is not part of the stored document.
pub trait Store {
    fn create(&mut self, collection: Collection, document: Value) -> Result<String, StoreError>;

    /// Every document in `collection` with its id, in creation order
    fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, StoreError>;

    fn update(&mut self, collection: Collection, id: &str, document: Value) -> Result<(), StoreError>;

    fn delete(&mut self, collection: Collection, id: &str) -> Result<(), StoreError>;

    /// Create `record`, returning its new id
    fn insert<R: Record>(&mut self, record: &R) -> Result<String, StoreError>
    where
        Self: Sized,
    {
        let document = to_document(R::COLLECTION, record)?;
        self.create(R::COLLECTION, document)
    }

    /// Every record of type `R`, with ids filled in
    fn records<R: Record>(&self) -> Result<Vec<R>, StoreError>
    where
        Self: Sized,
    {
        self.list(R::COLLECTION)?
            .into_iter()
            .map(|(id, document)| from_document(R::COLLECTION, id, document))
            .collect()
    }

    /// Replace the record stored under `id`
    fn replace<R: Record>(&mut self, id: &str, record: &R) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let document = to_document(R::COLLECTION, record)?;
        self.update(R::COLLECTION, id, document)
    }
}

/// A record type that lives in one of the store's collections
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;
}

impl Record for Expense {
    const COLLECTION: Collection = Collection::Expenses;
}

impl Record for Income {
    const COLLECTION: Collection = Collection::Income;
}

impl Record for MonthlyBudget {
    const COLLECTION: Collection = Collection::Budgets;
}

/// An in-memory `Store`. Ids are `{collection}-{n}` and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: BTreeMap<Collection, Vec<(String, Value)>>,
    next_id: u64,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Expenses => "expenses",
            Collection::Income => "income",
            Collection::Budgets => "budgets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn find_mut(&mut self, collection: Collection, id: &str) -> Result<&mut Value, StoreError> {
        self.collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
            .map(|(_, document)| document)
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_owned(),
            })
    }
}

impl Store for MemoryStore {
    fn create(&mut self, collection: Collection, document: Value) -> Result<String, StoreError> {
        if !document.is_object() {
            return Err(StoreError::InvalidDocument(collection));
        }

        self.next_id += 1;
        let id = format!("{}-{}", collection, self.next_id);
        trace!("creating {}", id);

        self.collections
            .entry(collection)
            .or_default()
            .push((id.clone(), document));
        Ok(id)
    }

    fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, StoreError> {
        Ok(self.collections.get(&collection).cloned().unwrap_or_default())
    }

    fn update(&mut self, collection: Collection, id: &str, document: Value) -> Result<(), StoreError> {
        if !document.is_object() {
            return Err(StoreError::InvalidDocument(collection));
        }

        trace!("updating {}", id);
        *self.find_mut(collection, id)? = document;
        Ok(())
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let docs = self.collections.get_mut(&collection);
        let index = docs
            .as_ref()
            .and_then(|docs| docs.iter().position(|(doc_id, _)| doc_id == id));

        match (docs, index) {
            (Some(docs), Some(index)) => {
                trace!("deleting {}", id);
                docs.remove(index);
                Ok(())
            }
            _ => Err(StoreError::NotFound {
                collection,
                id: id.to_owned(),
            }),
        }
    }
}

// Serialise a record without its id, which belongs to the store
fn to_document<R: Serialize>(collection: Collection, record: &R) -> Result<Value, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(Value::Object(map))
        }
        _ => Err(StoreError::InvalidDocument(collection)),
    }
}

fn from_document<R: DeserializeOwned>(
    collection: Collection,
    id: String,
    document: Value,
) -> Result<R, StoreError> {
    match document {
        Value::Object(mut map) => {
            map.insert("id".to_owned(), Value::String(id));
            Ok(serde_json::from_value(Value::Object(map))?)
        }
        _ => Err(StoreError::InvalidDocument(collection)),
    }
}
