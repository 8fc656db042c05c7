use crate::error::{StoreError, StoreResult};
use crate::record::PersonRecord;
use crate::storage::RecordStore;
use parking_lot::RwLock;

/// In-process record store, ordered by insertion
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<PersonRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records already in snapshot order.
    ///
    /// Later duplicates of a person id replace earlier ones in place.
    pub fn with_records(records: impl IntoIterator<Item = PersonRecord>) -> Self {
        let mut collected: Vec<PersonRecord> = Vec::new();
        for record in records {
            match collected
                .iter_mut()
                .find(|r| r.person_id == record.person_id)
            {
                Some(slot) => *slot = record,
                None => collected.push(record),
            }
        }
        Self {
            records: RwLock::new(collected),
        }
    }

    pub fn insert(&self, record: PersonRecord) -> StoreResult<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.person_id == record.person_id) {
            return Err(StoreError::DuplicatePerson {
                id: record.person_id,
            });
        }
        records.push(record);
        Ok(())
    }

    /// Replace the record with the same person id, keeping its position
    pub fn update(&self, record: PersonRecord) -> StoreResult<()> {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.person_id == record.person_id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::PersonNotFound {
                id: record.person_id,
            }),
        }
    }

    pub fn get(&self, person_id: &str) -> Option<PersonRecord> {
        self.records
            .read()
            .iter()
            .find(|r| r.person_id == person_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn load_all_records(&self) -> StoreResult<Vec<PersonRecord>> {
        Ok(self.records.read().clone())
    }
}
