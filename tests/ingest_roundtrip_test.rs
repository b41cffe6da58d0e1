//! Integration tests for batch import and export

use caredesk::config::{secret_string, CaredeskConfig};
use caredesk::core::ingest::{ExportRow, RawPatientRow};
use caredesk::core::session::Session;
use caredesk::domain::{Patient, PatientDraft, PatientUpdate};
use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use fake::Fake;

fn session() -> Session {
    let mut config = CaredeskConfig::default();
    config.database.path = ":memory:".to_string();
    config.security.pbkdf2_iterations = 1_000;

    let mut session = Session::open(&config).unwrap();
    session
        .login("doctor1", &secret_string("password123"))
        .unwrap();
    session
}

fn fake_draft(with_vitals: bool) -> PatientDraft {
    let words = |n: std::ops::Range<usize>| Words(n).fake::<Vec<String>>().join(" ");
    PatientDraft {
        name: Name().fake(),
        age: (1..95u32).fake(),
        condition: "Hypertension".to_string(),
        heart_rate: with_vitals.then(|| (55..110u32).fake()),
        temperature: with_vitals.then(|| (35.5..39.5f64).fake()),
        health_problem: Some(words(2..5)),
        treatment_required: words(1..3),
        medications: with_vitals.then(|| words(1..2)),
        diet_plan: None,
    }
}

/// Compare every field except the id
fn assert_same_record(original: &Patient, imported: &Patient) {
    let expected = Patient {
        id: imported.id,
        ..original.clone()
    };
    assert_eq!(&expected, imported);
}

#[test]
fn test_export_then_import_round_trips() {
    let source = session();
    for i in 0..12 {
        source.add_patient(fake_draft(i % 2 == 0)).unwrap();
    }

    let cleared = source.add_patient(fake_draft(true)).unwrap();
    source
        .update_patient(
            cleared,
            &PatientUpdate::new()
                .heart_rate(None)
                .temperature(None)
                .health_problem(None),
        )
        .unwrap();

    let mut padded = fake_draft(false);
    padded.name = format!(" {} ", padded.name);
    padded.medications = Some("  ".to_string());
    padded.diet_plan = Some("Low salt ".to_string());
    padded.treatment_required = format!("\t{}", padded.treatment_required);
    source.add_patient(padded).unwrap();

    let json = serde_json::to_string(&source.export_rows().unwrap()).unwrap();
    let rows: Vec<RawPatientRow> = serde_json::from_str(&json).unwrap();

    let target = session();
    let report = target.import_rows(&rows).unwrap();
    assert_eq!(report.added, 14);
    assert!(report.is_clean());

    let original = source.list_patients().unwrap();
    let imported = target.list_patients().unwrap();
    assert_eq!(original.len(), imported.len());
    for (a, b) in original.iter().zip(&imported) {
        assert_same_record(a, b);
    }

    let restored = &imported[12];
    assert_eq!(restored.heart_rate, None);
    assert_eq!(restored.temperature, None);
    assert!(imported[13].name.starts_with(' '));
    assert_eq!(imported[13].medications.as_deref(), Some("  "));
}

#[test]
fn test_reimport_updates_in_place() {
    let session = session();
    for _ in 0..4 {
        session.add_patient(fake_draft(true)).unwrap();
    }

    let mut rows = session.export_rows().unwrap();
    rows[1].condition = "Asthma".to_string();
    let raw: Vec<RawPatientRow> = rows.iter().map(RawPatientRow::from).collect();

    let report = session.import_rows(&raw).unwrap();
    assert_eq!(report.updated, 4);
    assert_eq!(report.added, 0);

    let patients = session.list_patients().unwrap();
    assert_eq!(patients.len(), 4);
    assert_eq!(patients[1].condition, "Asthma");
}

#[test]
fn test_legacy_headers_and_bad_rows() {
    let session = session();
    let rows: Vec<RawPatientRow> = serde_json::from_str(
        r#"[
            {"Patient_ID": 1, "Name": "Ann", "Age": 30, "Medical Condition": "Diabetes",
             "Treatment Required": "Diet review"},
            {"Patient_ID": 2, "Name": "Bob", "Age": "thirty", "Medical Condition": "Asthma",
             "Treatment Required": "Inhaler"},
            {"Patient_ID": 3, "Name": "Cy", "Age": 51, "Medical Condition": "Cancer"}
        ]"#,
    )
    .unwrap();

    let report = session.import_rows(&rows).unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].row, 1);
    assert!(report.skipped[0].error.contains("age"));
    assert_eq!(report.skipped[1].row, 2);

    let patients = session.list_patients().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].condition, "Diabetes");
}

#[test]
fn test_export_row_json_headers() {
    let session = session();
    session.add_patient(fake_draft(false)).unwrap();

    let rows: Vec<ExportRow> = session.export_rows().unwrap();
    let value = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(value["Heart Rate"], 80);
    assert_eq!(value["Temperature"], 37.0);
    assert!(value["Diet Plan"].is_null());
}
