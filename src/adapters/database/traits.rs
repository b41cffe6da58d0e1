//! Storage abstraction traits
//!
//! The core stores talk to persistence only through these traits. Every
//! method is synchronous and atomic with respect to its caller: an
//! implementation either applies the whole change or none of it.

use crate::domain::{Patient, PatientDraft, PatientId, PatientUpdate, Result, User, Username};

/// Persistence for caretaker accounts
pub trait UserStorage: Send + Sync {
    /// Insert a new account
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::CaredeskError::DuplicateUser`] if the username
    /// is taken; nothing is written in that case.
    fn insert_user(&self, user: &User) -> Result<()>;

    /// Look up an account by exact (case-sensitive) username
    fn find_user(&self, username: &Username) -> Result<Option<User>>;

    /// Replace an account's password hash; `false` if the account is gone
    fn update_secret_hash(&self, username: &Username, secret_hash: &str) -> Result<bool>;

    /// Number of stored accounts
    fn count_users(&self) -> Result<u64>;
}

/// Persistence for patient records
pub trait PatientStorage: Send + Sync {
    /// Insert a draft, assigning the next id
    ///
    /// Fields are stored exactly as the draft gives them. Returns the stored
    /// record.
    fn insert_patient(&self, draft: PatientDraft) -> Result<Patient>;

    /// Apply a partial update inside a single transaction
    ///
    /// Returns `Ok(None)` when no patient has the given id.
    fn update_patient(&self, id: PatientId, update: &PatientUpdate) -> Result<Option<Patient>>;

    /// Fetch a patient by id
    fn get_patient(&self, id: PatientId) -> Result<Option<Patient>>;

    /// First patient, in id order, whose name equals `name`
    fn find_patient_by_name(&self, name: &str, case_insensitive: bool) -> Result<Option<Patient>>;

    /// Patients whose name contains `fragment` (case-sensitive), in id order
    fn search_patients_by_name(&self, fragment: &str) -> Result<Vec<Patient>>;

    /// Every patient, in id order
    fn list_patients(&self) -> Result<Vec<Patient>>;

    /// Number of stored patients
    fn count_patients(&self) -> Result<u64>;
}
