use super::client::SqliteStorage;
use crate::adapters::database::PatientStorage;
use crate::domain::{Patient, PatientDraft, PatientId, PatientUpdate, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PATIENT_COLUMNS: &str = "id, name, age, condition, heart_rate, temperature, \
     health_problem, treatment_required, medications, diet_plan";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        condition: row.get(3)?,
        heart_rate: row.get(4)?,
        temperature: row.get(5)?,
        health_problem: row.get(6)?,
        treatment_required: row.get(7)?,
        medications: row.get(8)?,
        diet_plan: row.get(9)?,
    })
}

fn select_by_id(conn: &Connection, id: PatientId) -> Result<Option<Patient>> {
    let patient = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"),
            params![id],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

fn select_many(conn: &Connection, sql: &str, param: Option<&str>) -> Result<Vec<Patient>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match param {
        Some(value) => stmt.query_map(params![value], patient_from_row)?,
        None => stmt.query_map([], patient_from_row)?,
    };
    let patients = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(patients)
}

impl PatientStorage for SqliteStorage {
    fn insert_patient(&self, draft: PatientDraft) -> Result<Patient> {
        let conn = self.conn()?;
        // The real id is only known after the insert.
        let mut patient = Patient::from_draft(PatientId::new(0), draft);

        conn.execute(
            "INSERT INTO patients (name, age, condition, heart_rate, temperature, health_problem,
             treatment_required, medications, diet_plan)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                patient.name,
                patient.age,
                patient.condition,
                patient.heart_rate,
                patient.temperature,
                patient.health_problem,
                patient.treatment_required,
                patient.medications,
                patient.diet_plan,
            ],
        )?;

        patient.id = PatientId::new(conn.last_insert_rowid());
        Ok(patient)
    }

    fn update_patient(&self, id: PatientId, update: &PatientUpdate) -> Result<Option<Patient>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let Some(mut patient) = select_by_id(&tx, id)? else {
            return Ok(None);
        };
        patient.apply(update);

        tx.execute(
            "UPDATE patients SET name = ?1, age = ?2, condition = ?3, heart_rate = ?4,
             temperature = ?5, health_problem = ?6, treatment_required = ?7,
             medications = ?8, diet_plan = ?9
             WHERE id = ?10",
            params![
                patient.name,
                patient.age,
                patient.condition,
                patient.heart_rate,
                patient.temperature,
                patient.health_problem,
                patient.treatment_required,
                patient.medications,
                patient.diet_plan,
                patient.id,
            ],
        )?;
        tx.commit()?;

        Ok(Some(patient))
    }

    fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        let conn = self.conn()?;
        select_by_id(&conn, id)
    }

    fn find_patient_by_name(&self, name: &str, case_insensitive: bool) -> Result<Option<Patient>> {
        let conn = self.conn()?;
        let sql = if case_insensitive {
            format!(
                "SELECT {PATIENT_COLUMNS} FROM patients WHERE name = ?1 COLLATE NOCASE \
                 ORDER BY id LIMIT 1"
            )
        } else {
            format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE name = ?1 ORDER BY id LIMIT 1")
        };
        let patient = conn
            .query_row(&sql, params![name], patient_from_row)
            .optional()?;
        Ok(patient)
    }

    fn search_patients_by_name(&self, fragment: &str) -> Result<Vec<Patient>> {
        let conn = self.conn()?;
        // instr() is case-sensitive, unlike LIKE.
        select_many(
            &conn,
            &format!(
                "SELECT {PATIENT_COLUMNS} FROM patients WHERE instr(name, ?1) > 0 ORDER BY id"
            ),
            Some(fragment),
        )
    }

    fn list_patients(&self) -> Result<Vec<Patient>> {
        let conn = self.conn()?;
        select_many(
            &conn,
            &format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id"),
            None,
        )
    }

    fn count_patients(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
