//! Ordered record snapshot with the lookup maps built alongside it.

use crate::record::PersonRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// All records at one point in time, in store order.
///
/// Positions are stable for the lifetime of the snapshot and line up with
/// the rows of the feature index built from it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<PersonRecord>,
    by_person: HashMap<String, usize>,
    by_family: HashMap<String, Vec<usize>>,
    by_parent: HashMap<String, Vec<usize>>,
}

/// Member counts over a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotStats {
    pub total_members: usize,
    pub total_families: usize,
    pub families: BTreeMap<String, usize>,
}

/// A person with their spouse and the children of either
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImmediateFamily<'a> {
    pub person: &'a PersonRecord,
    pub spouse: Option<&'a PersonRecord>,
    pub children: Vec<&'a PersonRecord>,
}

impl ImmediateFamily<'_> {
    /// Number of people, counting the person
    pub fn size(&self) -> usize {
        1 + usize::from(self.spouse.is_some()) + self.children.len()
    }
}

impl Snapshot {
    pub fn new(records: Vec<PersonRecord>) -> Self {
        let mut by_person = HashMap::with_capacity(records.len());
        let mut by_family: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_parent: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            // First occurrence wins for id lookups
            by_person
                .entry(record.person_id.clone())
                .or_insert(position);
            by_family
                .entry(record.family_line_id.clone())
                .or_default()
                .push(position);

            let father = record.father_id.as_deref().filter(|id| !id.trim().is_empty());
            let mother = record
                .mother_id
                .as_deref()
                .filter(|id| !id.trim().is_empty() && Some(*id) != father);
            for parent in [father, mother].into_iter().flatten() {
                by_parent.entry(parent.to_string()).or_default().push(position);
            }
        }

        Self {
            records,
            by_person,
            by_family,
            by_parent,
        }
    }

    pub fn records(&self) -> &[PersonRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&PersonRecord> {
        self.records.get(position)
    }

    pub fn person(&self, person_id: &str) -> Option<&PersonRecord> {
        self.by_person
            .get(person_id)
            .map(|&position| &self.records[position])
    }

    /// Positions of a family group's members, in snapshot order
    pub fn family_positions(&self, family_id: &str) -> &[usize] {
        self.by_family
            .get(family_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn family(&self, family_id: &str) -> Vec<&PersonRecord> {
        self.family_positions(family_id)
            .iter()
            .map(|&position| &self.records[position])
            .collect()
    }

    /// Records naming `person_id` as father or mother
    pub fn children_of(&self, person_id: &str) -> Vec<&PersonRecord> {
        self.by_parent
            .get(person_id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| &self.records[position])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The person, their spouse if present in the snapshot, and the
    /// children of either parent without duplicates, in snapshot order.
    pub fn immediate_family(&self, person_id: &str) -> Option<ImmediateFamily<'_>> {
        let person = self.person(person_id)?;
        let spouse = person
            .spouse_id
            .as_deref()
            .and_then(|spouse_id| self.person(spouse_id));

        let mut positions: Vec<usize> = self
            .by_parent
            .get(person_id)
            .cloned()
            .unwrap_or_default();
        if let Some(more) = spouse.and_then(|spouse| self.by_parent.get(&spouse.person_id)) {
            positions.extend(more);
        }
        positions.sort_unstable();
        positions.dedup();

        Some(ImmediateFamily {
            person,
            spouse,
            children: positions
                .into_iter()
                .map(|position| &self.records[position])
                .collect(),
        })
    }

    pub fn stats(&self) -> SnapshotStats {
        let families: BTreeMap<String, usize> = self
            .by_family
            .iter()
            .map(|(family, members)| (family.clone(), members.len()))
            .collect();
        SnapshotStats {
            total_members: self.records.len(),
            total_families: families.len(),
            families,
        }
    }
}
