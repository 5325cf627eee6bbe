use thiserror::Error;
use uuid::Uuid;

use crate::registry::model::{registration_timestamp, CompanyDraft, CompanyRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("no record with id `{0}`")]
    NotFound(String),
}

/// In-memory ordered collection of company records. Source of truth for the
/// running session; insertion order is display order.
#[derive(Debug, Default)]
pub struct CompanyStore {
    records: Vec<CompanyRecord>,
}

impl CompanyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, records: Vec<CompanyRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&CompanyRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn create(&mut self, draft: CompanyDraft) -> Result<CompanyRecord, StoreError> {
        validate(&draft)?;

        let record = CompanyRecord {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            service: draft.service,
            phone: draft.phone,
            address: draft.address,
            details: draft.details,
            photo: draft.photo,
            created_at: registration_timestamp(),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn update(&mut self, id: &str, draft: CompanyDraft) -> Result<CompanyRecord, StoreError> {
        validate(&draft)?;

        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.name = draft.name;
        record.service = draft.service;
        record.phone = draft.phone;
        record.address = draft.address;
        record.details = draft.details;
        if let Some(photo) = draft.photo {
            record.photo = Some(photo);
        }
        Ok(record.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.records.remove(position);
        Ok(())
    }

    /// Case-insensitive substring match on name or service. A blank query
    /// returns the whole collection; matches keep collection order.
    pub fn search(&self, query: &str) -> Vec<&CompanyRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|record| matches_query(record, &needle))
            .collect()
    }
}

fn matches_query(record: &CompanyRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.service.to_lowercase().contains(needle)
}

fn validate(draft: &CompanyDraft) -> Result<(), StoreError> {
    for (label, value) in [
        ("name", &draft.name),
        ("service", &draft.service),
        ("phone", &draft.phone),
        ("address", &draft.address),
        ("details", &draft.details),
    ] {
        if value.trim().is_empty() {
            return Err(StoreError::MissingField(label));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CompanyStore, StoreError};
    use crate::registry::model::CompanyDraft;

    fn draft(name: &str, service: &str) -> CompanyDraft {
        CompanyDraft {
            name: name.to_string(),
            service: service.to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            details: "general contracting".to_string(),
            photo: None,
        }
    }

    #[test]
    fn create_rejects_empty_fields() {
        let mut store = CompanyStore::new();
        let mut bad = draft("Acme", "Plumbing");
        bad.phone = "   ".to_string();

        let err = store.create(bad).unwrap_err();
        assert!(matches!(err, StoreError::MissingField("phone")));
        assert!(store.records().is_empty());
    }

    #[test]
    fn create_assigns_unique_ids_and_appends_in_order() {
        let mut store = CompanyStore::new();
        let a = store.create(draft("Acme", "Plumbing")).unwrap();
        let b = store.create(draft("Bolt Co", "Plumbing")).unwrap();

        assert_ne!(a.id, b.id);
        assert!(!a.created_at.is_empty());
        let names: Vec<_> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Acme", "Bolt Co"]);
    }

    #[test]
    fn update_preserves_id_created_at_and_photo() {
        let mut store = CompanyStore::new();
        let mut with_photo = draft("Acme", "Plumbing");
        with_photo.photo = Some("aGVsbG8=".to_string());
        let original = store.create(with_photo).unwrap();

        let updated = store
            .update(&original.id, draft("Acme Corp", "Plumbing & Heating"))
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.photo.as_deref(), Some("aGVsbG8="));
        assert_eq!(updated.name, "Acme Corp");
    }

    #[test]
    fn update_replaces_photo_when_supplied() {
        let mut store = CompanyStore::new();
        let original = store.create(draft("Acme", "Plumbing")).unwrap();

        let mut next = draft("Acme", "Plumbing");
        next.photo = Some("bmV3".to_string());
        let updated = store.update(&original.id, next).unwrap();

        assert_eq!(updated.photo.as_deref(), Some("bmV3"));
    }

    #[test]
    fn update_validates_and_reports_missing_records() {
        let mut store = CompanyStore::new();
        let record = store.create(draft("Acme", "Plumbing")).unwrap();

        let mut bad = draft("Acme", "Plumbing");
        bad.details = String::new();
        assert!(matches!(
            store.update(&record.id, bad),
            Err(StoreError::MissingField("details"))
        ));

        assert!(matches!(
            store.update("missing-id", draft("X", "Y")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let mut store = CompanyStore::new();
        let a = store.create(draft("Acme", "Plumbing")).unwrap();
        store.create(draft("Bolt Co", "Electrical")).unwrap();

        store.delete(&a.id).unwrap();
        assert!(store.search("").iter().all(|record| record.id != a.id));
        assert_eq!(store.records().len(), 1);

        assert!(matches!(store.delete(&a.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_service() {
        let mut store = CompanyStore::new();
        store.create(draft("Acme", "Plumbing")).unwrap();
        store.create(draft("Bolt Co", "Electrical")).unwrap();

        assert_eq!(store.search("ACME").len(), 1);
        assert_eq!(store.search("electr").len(), 1);
        assert!(store.search("bakery").is_empty());
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let mut store = CompanyStore::new();
        store.create(draft("Acme", "Plumbing")).unwrap();
        store.create(draft("Bolt Co", "Electrical")).unwrap();

        let all = store.search("   ");
        let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Acme", "Bolt Co"]);
    }

    #[test]
    fn create_search_delete_scenario() {
        let mut store = CompanyStore::new();
        let a = store.create(draft("Acme", "Plumbing")).unwrap();
        assert_eq!(store.search("acme")[0].id, a.id);

        let b = store.create(draft("Bolt Co", "Plumbing")).unwrap();
        let plumbing: Vec<_> = store.search("plumbing").iter().map(|r| r.id.clone()).collect();
        assert_eq!(plumbing, [a.id.clone(), b.id.clone()]);

        store.delete(&a.id).unwrap();
        let remaining: Vec<_> = store.search("").iter().map(|r| r.id.clone()).collect();
        assert_eq!(remaining, [b.id]);
    }
}
