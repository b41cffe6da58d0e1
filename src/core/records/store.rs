//! Patient record store
//!
//! Wraps a [`PatientStorage`] backend with the rules every stored record must
//! satisfy: drafts are validated before they reach storage, updates against a
//! missing id fail with [`CaredeskError::NotFound`], and the combined id/name
//! search interprets its term the same way everywhere.

use crate::adapters::database::PatientStorage;
use crate::domain::{CaredeskError, Patient, PatientDraft, PatientId, PatientUpdate, Result};
use std::sync::Arc;

/// Patient record store
///
/// Records are never deleted. Every mutation is a single storage call, so a
/// failure leaves no partial state behind.
pub struct PatientStore {
    storage: Arc<dyn PatientStorage + Send + Sync>,
}

impl PatientStore {
    /// Create a store over a storage backend
    pub fn new(storage: Arc<dyn PatientStorage + Send + Sync>) -> Self {
        Self { storage }
    }

    /// Store a new patient and return its assigned id
    ///
    /// Omitted vitals are recorded with the default heart rate and
    /// temperature.
    ///
    /// # Errors
    ///
    /// Returns [`CaredeskError::Validation`] if the treatment is blank; nothing
    /// is stored in that case.
    pub fn add(&self, draft: PatientDraft) -> Result<PatientId> {
        draft.validate()?;
        let patient = self.storage.insert_patient(draft.with_default_vitals())?;

        tracing::info!(
            patient_id = %patient.id,
            condition = %patient.condition,
            "Patient added"
        );
        Ok(patient.id)
    }

    /// Store a draft exactly as given, under a newly assigned id
    ///
    /// Missing vitals stay missing. Used for rows that were exported from a
    /// store and are being read back in.
    ///
    /// # Errors
    ///
    /// Returns [`CaredeskError::Validation`] under the same rules as
    /// [`PatientStore::add`].
    pub fn restore(&self, draft: PatientDraft) -> Result<PatientId> {
        draft.validate()?;
        let patient = self.storage.insert_patient(draft)?;

        tracing::info!(
            patient_id = %patient.id,
            condition = %patient.condition,
            "Patient restored"
        );
        Ok(patient.id)
    }

    /// Replace the fields named by `update`
    ///
    /// # Errors
    ///
    /// - [`CaredeskError::Validation`] if the update would blank the treatment
    /// - [`CaredeskError::NotFound`] if no patient has this id
    pub fn update(&self, id: PatientId, update: &PatientUpdate) -> Result<Patient> {
        update.validate()?;

        let patient = self
            .storage
            .update_patient(id, update)?
            .ok_or_else(|| CaredeskError::NotFound(format!("Patient {id} not found")))?;

        tracing::info!(
            patient_id = %id,
            fields = ?update.field_names(),
            "Patient updated"
        );
        Ok(patient)
    }

    pub fn get(&self, id: PatientId) -> Result<Option<Patient>> {
        self.storage.get_patient(id)
    }

    /// Look up a patient by id; the id half of the name/id toggle search
    pub fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>> {
        self.get(id)
    }

    /// First patient, in store order, whose name equals `name`
    pub fn find_by_exact_name(&self, name: &str, case_insensitive: bool) -> Result<Option<Patient>> {
        self.storage.find_patient_by_name(name, case_insensitive)
    }

    /// Search by id or by name fragment
    ///
    /// A term that is an integer only ever matches the patient with that id,
    /// and an integer too large for an id matches nothing. Any other term
    /// matches names containing it, case-sensitively. Results are in store
    /// order and may be empty.
    pub fn search_by_id_or_name(&self, term: &str) -> Result<Vec<Patient>> {
        let trimmed = term.trim();
        let results = if is_integer(trimmed) {
            match trimmed.parse::<i64>() {
                Ok(id) => self
                    .storage
                    .get_patient(PatientId::new(id))?
                    .into_iter()
                    .collect(),
                Err(_) => Vec::new(),
            }
        } else {
            self.storage.search_patients_by_name(term)?
        };

        tracing::debug!(matches = results.len(), "Patient search completed");
        Ok(results)
    }

    /// Every patient in store order
    pub fn list_all(&self) -> Result<Vec<Patient>> {
        self.storage.list_patients()
    }

    pub fn count(&self) -> Result<u64> {
        self.storage.count_patients()
    }
}

/// Optional sign followed by one or more ASCII digits
fn is_integer(term: &str) -> bool {
    let digits = term.strip_prefix(['+', '-']).unwrap_or(term);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::domain::{DEFAULT_HEART_RATE, DEFAULT_TEMPERATURE};
    use test_case::test_case;

    fn store() -> PatientStore {
        PatientStore::new(Arc::new(SqliteStorage::open_in_memory().unwrap()))
    }

    fn draft(name: &str) -> PatientDraft {
        PatientDraft::builder()
            .name(name)
            .age(61)
            .condition("Hypertension")
            .treatment_required("Blood pressure monitoring")
            .build()
            .unwrap()
    }

    #[test]
    fn test_add_then_get() {
        let store = store();
        let id = store.add(draft("Ann Smith")).unwrap();

        let patient = store.get(id).unwrap().unwrap();
        assert_eq!(patient.name, "Ann Smith");
        assert_eq!(patient.heart_rate, Some(DEFAULT_HEART_RATE));
        assert_eq!(patient.temperature, Some(DEFAULT_TEMPERATURE));
    }

    #[test]
    fn test_add_blank_treatment_stores_nothing() {
        let store = store();
        let mut bad = draft("Ann");
        bad.treatment_required = String::new();

        let err = store.add(bad).unwrap_err();
        assert!(matches!(err, CaredeskError::Validation(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = store();
        store.add(draft("Ann")).unwrap();

        let err = store
            .update(PatientId::new(404), &PatientUpdate::new().age(1))
            .unwrap_err();
        assert!(matches!(err, CaredeskError::NotFound(_)));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_update_rejects_blank_treatment() {
        let store = store();
        let id = store.add(draft("Ann")).unwrap();

        let err = store
            .update(id, &PatientUpdate::new().treatment_required(" "))
            .unwrap_err();
        assert!(matches!(err, CaredeskError::Validation(_)));
        assert_eq!(
            store.get(id).unwrap().unwrap().treatment_required,
            "Blood pressure monitoring"
        );
    }

    #[test]
    fn test_numeric_term_matches_id_only() {
        let store = store();
        let first = store.add(draft("Ann")).unwrap();
        store.add(draft(&format!("{first}Smith"))).unwrap();

        let found = store.search_by_id_or_name(&first.to_string()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, first);
        assert!(store.search_by_id_or_name("9999").unwrap().is_empty());
    }

    #[test_case("99999999999999999999" ; "beyond i64")]
    #[test_case("-99999999999999999999" ; "negative beyond i64")]
    fn test_out_of_range_integer_matches_nothing(term: &str) {
        let store = store();
        store.add(draft(&format!("{term} Smith"))).unwrap();

        assert!(store.search_by_id_or_name(term).unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test_case("42", true ; "plain")]
    #[test_case("+7", true ; "plus sign")]
    #[test_case("-3", true ; "minus sign")]
    #[test_case("-", false ; "sign only")]
    #[test_case("4a", false ; "trailing letter")]
    #[test_case("", false ; "empty")]
    fn test_is_integer(term: &str, expected: bool) {
        assert_eq!(is_integer(term), expected);
    }

    #[test]
    fn test_restore_keeps_missing_vitals() {
        let store = store();
        let id = store.restore(draft("Ann")).unwrap();

        let patient = store.get(id).unwrap().unwrap();
        assert_eq!(patient.heart_rate, None);
        assert_eq!(patient.temperature, None);

        let mut bad = draft("Bob");
        bad.treatment_required = " ".to_string();
        assert!(store.restore(bad).is_err());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test_case("ann", &["Joanna", "Hannah"] ; "lowercase fragment")]
    #[test_case("Ann", &["Ann Lee"] ; "capitalised fragment")]
    #[test_case("zzz", &[] ; "no match")]
    fn test_name_search_substring(term: &str, expected: &[&str]) {
        let store = store();
        for name in ["Joanna", "Ann Lee", "Hannah", "Bob"] {
            store.add(draft(name)).unwrap();
        }

        let names: Vec<String> = store
            .search_by_id_or_name(term)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_find_by_exact_name() {
        let store = store();
        let id = store.add(draft("Ann Smith")).unwrap();
        store.add(draft("ann smith")).unwrap();

        let found = store.find_by_exact_name("ANN SMITH", true).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert!(store.find_by_exact_name("ANN SMITH", false).unwrap().is_none());
        assert!(store.find_by_id(id).unwrap().is_some());
    }

    #[test]
    fn test_list_all_in_store_order() {
        let store = store();
        let ids: Vec<PatientId> = ["C", "A", "B"]
            .into_iter()
            .map(|n| store.add(draft(n)).unwrap())
            .collect();

        let listed: Vec<PatientId> = store.list_all().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(listed, ids);
    }
}
