//! Session façade
//!
//! The single entry point a front end talks to. A session starts
//! unauthenticated; after a successful [`Session::login`] it may read and
//! change patient records. Recommendation lookups are open to everyone.

use super::history::SearchHistory;
use crate::adapters::database::create_storage;
use crate::config::{CaredeskConfig, SecretString};
use crate::core::credentials::{CredentialStore, PasswordHasher};
use crate::core::ingest::{self, ExportRow, IngestReport, RawPatientRow};
use crate::core::recommendations::{Recommendation, RecommendationTable};
use crate::core::records::PatientStore;
use crate::domain::{
    CaredeskError, Patient, PatientDraft, PatientId, PatientUpdate, Result, Role, Username,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::Span;
use uuid::Uuid;

/// Authentication state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { username: Username, role: Role },
}

/// A patient together with the guidance for their condition
#[derive(Debug, Clone, Serialize)]
pub struct PatientGuidance {
    pub patient: Patient,
    pub recommendation: Recommendation,
}

/// One caretaker's session over the stores
pub struct Session {
    id: Uuid,
    credentials: CredentialStore,
    patients: PatientStore,
    recommendations: Arc<RecommendationTable>,
    history: SearchHistory,
    state: SessionState,
}

impl Session {
    /// Assemble a session from already-built components
    pub fn new(
        credentials: CredentialStore,
        patients: PatientStore,
        recommendations: Arc<RecommendationTable>,
        history_size: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            credentials,
            patients,
            recommendations,
            history: SearchHistory::new(history_size),
            state: SessionState::Unauthenticated,
        }
    }

    /// Open the configured database and build a session over it
    ///
    /// Creates the bootstrap account when the database has no users.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened or the recommendation table
    /// cannot be loaded.
    pub fn open(config: &CaredeskConfig) -> Result<Self> {
        let (users, patients) = create_storage(&config.database)?;

        let credentials = CredentialStore::new(
            users,
            PasswordHasher::new(config.security.pbkdf2_iterations),
        );
        credentials.ensure_bootstrap_account(&config.security.bootstrap)?;

        let table = RecommendationTable::from_config(&config.recommendations)?;

        let session = Self::new(
            credentials,
            PatientStore::new(patients),
            Arc::new(table),
            config.search.history_size,
        );
        tracing::debug!(session_id = %session.id, "Session opened");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Role of the logged-in caretaker, if any
    pub fn role(&self) -> Option<Role> {
        match &self.state {
            SessionState::Authenticated { role, .. } => Some(*role),
            SessionState::Unauthenticated => None,
        }
    }

    /// Account management, for administrative front ends
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    fn span(&self) -> Span {
        tracing::info_span!("session", session_id = %self.id)
    }

    /// Authenticate and move to the authenticated state
    ///
    /// # Errors
    ///
    /// [`CaredeskError::Unauthorized`] with the same message whether the
    /// username is unknown or the password is wrong. A failed attempt leaves
    /// the current state unchanged.
    pub fn login(&mut self, username: &str, password: &SecretString) -> Result<Role> {
        let _span = self.span().entered();

        let Some(role) = self.credentials.verify(username, password)? else {
            tracing::warn!("Login failed");
            return Err(CaredeskError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        };

        let username = Username::new(username)?;
        tracing::info!(username = %username, role = %role, "Login succeeded");
        self.state = SessionState::Authenticated { username, role };
        Ok(role)
    }

    pub fn logout(&mut self) {
        let _span = self.span().entered();
        if let SessionState::Authenticated { username, .. } = &self.state {
            tracing::info!(username = %username, "Logged out");
        }
        self.state = SessionState::Unauthenticated;
    }

    fn require_auth(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(CaredeskError::Unauthorized("Login required".to_string()))
        }
    }

    /// Record a search term and check the search may proceed
    fn begin_search<'t>(&mut self, term: &'t str) -> Result<&'t str> {
        self.history.record(term);
        self.require_auth()?;

        let trimmed = term.trim();
        if trimmed.is_empty() {
            return Err(CaredeskError::Validation(
                "Search term cannot be empty".to_string(),
            ));
        }
        Ok(trimmed)
    }

    /// Search by id (integer term) or by case-sensitive name fragment
    pub fn search(&mut self, term: &str) -> Result<Vec<Patient>> {
        let _span = self.span().entered();
        let term = self.begin_search(term)?;
        self.patients.search_by_id_or_name(term)
    }

    /// Look up one patient by an id typed as text
    ///
    /// # Errors
    ///
    /// [`CaredeskError::MalformedInput`] if the term is not an integer.
    pub fn find_by_id(&mut self, term: &str) -> Result<Option<Patient>> {
        let _span = self.span().entered();
        let term = self.begin_search(term)?;
        let id: PatientId = term.parse()?;
        self.patients.find_by_id(id)
    }

    /// Look up one patient by exact name, ignoring case
    pub fn find_by_name(&mut self, term: &str) -> Result<Option<Patient>> {
        let _span = self.span().entered();
        let term = self.begin_search(term)?;
        self.patients.find_by_exact_name(term, true)
    }

    /// Terms from recent search calls, newest first
    pub fn recent_searches(&self) -> Vec<String> {
        self.history.entries()
    }

    pub fn add_patient(&self, draft: PatientDraft) -> Result<PatientId> {
        let _span = self.span().entered();
        self.require_auth()?;
        self.patients.add(draft)
    }

    pub fn update_patient(&self, id: PatientId, update: &PatientUpdate) -> Result<Patient> {
        let _span = self.span().entered();
        self.require_auth()?;
        self.patients.update(id, update)
    }

    pub fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        self.require_auth()?;
        self.patients.get(id)
    }

    pub fn list_patients(&self) -> Result<Vec<Patient>> {
        self.require_auth()?;
        self.patients.list_all()
    }

    /// Guidance for any condition; never fails and needs no login
    pub fn recommendations(&self, condition: &str) -> &Recommendation {
        self.recommendations.lookup(condition)
    }

    /// A stored patient with the guidance for their recorded condition
    ///
    /// # Errors
    ///
    /// [`CaredeskError::NotFound`] if no patient has this id.
    pub fn patient_guidance(&self, id: PatientId) -> Result<PatientGuidance> {
        self.require_auth()?;
        let patient = self
            .patients
            .get(id)?
            .ok_or_else(|| CaredeskError::NotFound(format!("Patient {id} not found")))?;
        let recommendation = self.recommendations.lookup(&patient.condition).clone();
        Ok(PatientGuidance {
            patient,
            recommendation,
        })
    }

    /// Ingest a batch of raw rows
    pub fn import_rows(&self, rows: &[RawPatientRow]) -> Result<IngestReport> {
        let _span = self.span().entered();
        self.require_auth()?;
        ingest::ingest_rows(&self.patients, rows)
    }

    /// Every patient as a fixed-shape export row, in store order
    pub fn export_rows(&self) -> Result<Vec<ExportRow>> {
        let _span = self.span().entered();
        self.require_auth()?;
        let rows = ingest::export_rows(&self.patients.list_all()?);
        tracing::info!(rows = rows.len(), "Patients exported");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::config::secret_string;

    fn session() -> Session {
        let storage = Arc::new(SqliteStorage::open_in_memory().unwrap());
        let credentials = CredentialStore::new(storage.clone(), PasswordHasher::new(1_000));
        credentials
            .register("nurse1", &secret_string("pw"), Role::Nurse)
            .unwrap();
        Session::new(
            credentials,
            PatientStore::new(storage),
            Arc::new(RecommendationTable::builtin().unwrap()),
            5,
        )
    }

    fn draft() -> PatientDraft {
        PatientDraft::builder()
            .name("Ann")
            .age(30)
            .condition("Asthma")
            .treatment_required("Inhaler")
            .build()
            .unwrap()
    }

    #[test]
    fn test_patient_ops_need_login() {
        let mut session = session();
        assert!(matches!(
            session.add_patient(draft()),
            Err(CaredeskError::Unauthorized(_))
        ));
        assert!(matches!(
            session.list_patients(),
            Err(CaredeskError::Unauthorized(_))
        ));
        assert!(matches!(
            session.search("Ann"),
            Err(CaredeskError::Unauthorized(_))
        ));
        assert_eq!(
            session.recommendations("Asthma").medications[0],
            "Albuterol"
        );
    }

    #[test]
    fn test_login_and_logout() {
        let mut session = session();
        assert!(session.login("nurse1", &secret_string("bad")).is_err());
        assert_eq!(session.state(), &SessionState::Unauthenticated);

        assert_eq!(
            session.login("nurse1", &secret_string("pw")).unwrap(),
            Role::Nurse
        );
        assert_eq!(session.role(), Some(Role::Nurse));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.list_patients().is_err());
    }

    #[test]
    fn test_blank_search_is_recorded_then_rejected() {
        let mut session = session();
        session.login("nurse1", &secret_string("pw")).unwrap();

        let err = session.search("  ").unwrap_err();
        assert!(matches!(err, CaredeskError::Validation(_)));
        assert_eq!(session.recent_searches(), vec!["  "]);
    }

    #[test]
    fn test_find_by_id_and_name() {
        let mut session = session();
        session.login("nurse1", &secret_string("pw")).unwrap();
        let id = session.add_patient(draft()).unwrap();

        assert_eq!(
            session.find_by_id(&id.to_string()).unwrap().unwrap().id,
            id
        );
        assert_eq!(session.find_by_name("ANN").unwrap().unwrap().id, id);
        assert!(matches!(
            session.find_by_id("abc"),
            Err(CaredeskError::MalformedInput { .. })
        ));
        assert_eq!(
            session.recent_searches(),
            vec!["abc".to_string(), "ANN".to_string(), id.to_string()]
        );
    }

    #[test]
    fn test_patient_guidance() {
        let mut session = session();
        session.login("nurse1", &secret_string("pw")).unwrap();
        let id = session.add_patient(draft()).unwrap();

        let guidance = session.patient_guidance(id).unwrap();
        assert_eq!(guidance.patient.id, id);
        assert_eq!(guidance.recommendation.medications[0], "Albuterol");
        assert!(matches!(
            session.patient_guidance(PatientId::new(999)),
            Err(CaredeskError::NotFound(_))
        ));
    }
}
