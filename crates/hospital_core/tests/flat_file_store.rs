use hospital_core::{
    Admin, Appointment, AppointmentId, CodecError, ContactInfo, Doctor, FlatFileStore, Patient,
    RecordStore, StoreConfig, StoreError, UserProfile,
};
use std::fs;

fn store_in(dir: &tempfile::TempDir) -> FlatFileStore {
    FlatFileStore::new(StoreConfig::new(dir.path().join("Data")))
}

fn patient(id: u32, name: &str, age: i32, gender: &str) -> Patient {
    Patient::with_id(
        UserProfile::new(id, name, format!("pw{id}"), ContactInfo::default()),
        age,
        gender,
        None,
    )
}

#[test]
fn load_all_on_fresh_directory_creates_it_and_returns_empty_collections() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let loaded = store.load_all().unwrap();

    assert!(store.config().data_dir().is_dir());
    assert!(loaded.patients.is_empty());
    assert!(loaded.doctors.is_empty());
    assert!(loaded.admins.is_empty());
    assert!(loaded.appointments.is_empty());
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn save_then_load_reproduces_records_and_gender_labels() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let mut ann = patient(10001, "Ann", 34, "W");
    ann.doctor_id = Some(20001);
    let patients = vec![ann, patient(10002, "Bo", 8, "M")];
    let doctors = vec![Doctor::with_id(
        UserProfile::new(20001, "Gregory House", "pw20001", ContactInfo::default()),
        "Diagnostics",
    )];

    store.save_all(&patients, &doctors, &[], &[]).unwrap();
    let loaded = store.load_all().unwrap();

    assert_eq!(loaded.patients.len(), 2);
    assert_eq!(loaded.doctors.len(), 1);
    assert_eq!(loaded.patients, patients);
    assert_eq!(loaded.doctors, doctors);
    assert_eq!(loaded.patients[0].gender_label(), "Woman");
    assert_eq!(loaded.patients[1].gender_label(), "Man");
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn malformed_line_is_skipped_with_one_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.config().data_dir()).unwrap();
    fs::write(
        store.config().patients_path(),
        "10001,Ann,pw10001,34,W,\n\
         10002,Bo,pw10002,8,M,\n\
         10003,Cy,pw10003,fifty,X,\n\
         10004,Di,pw10004,22,W,20001\n\
         10005,Ed,pw10005,70,M,\n\
         10006,Flo,pw10006,45,W,\n",
    )
    .unwrap();

    let loaded = store.load_all().unwrap();

    let ids: Vec<u32> = loaded.patients.iter().map(|p| p.profile.id).collect();
    assert_eq!(ids, vec![10001, 10002, 10004, 10005, 10006]);
    assert_eq!(loaded.diagnostics.len(), 1);

    let diagnostic = &loaded.diagnostics[0];
    assert_eq!(diagnostic.file, "patients.txt");
    assert_eq!(diagnostic.line_number, 3);
    assert_eq!(diagnostic.content, "10003,Cy,pw10003,fifty,X,");
    assert!(matches!(
        diagnostic.error,
        CodecError::InvalidNumber { column: "age", .. }
    ));
    assert!(diagnostic.to_string().contains("line 3 in patients.txt"));
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.config().data_dir()).unwrap();
    fs::write(
        store.config().admins_path(),
        "# id,name,password\n\n   \n90001,Root,pw90001\r\n# trailing note\n",
    )
    .unwrap();

    let loaded = store.load_all().unwrap();

    assert_eq!(loaded.admins.len(), 1);
    assert_eq!(loaded.admins[0].profile.name, "Root");
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn save_all_overwrites_in_full_with_header_comment() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let admins = vec![
        Admin::with_id(UserProfile::new(90001, "Root", "pw90001", ContactInfo::default())),
        Admin::with_id(UserProfile::new(90002, "Ops", "pw90002", ContactInfo::default())),
    ];
    store.save_all(&[], &[], &admins, &[]).unwrap();
    store.save_all(&[], &[], &admins[..1], &[]).unwrap();

    let text = fs::read_to_string(store.config().admins_path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "# id,name,password,email,phone,streetNumber,street,city,state",
            "90001,Root,pw90001,,,,,,",
        ]
    );
    assert!(!store.config().admins_path().with_extension("txt.tmp").exists());
}

#[test]
fn appointment_note_with_comma_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let appointments = vec![Appointment::with_id(
        AppointmentId::new(1),
        10001,
        29999,
        Some(1_760_000_000_000),
        "Follow-up, bring labs",
    )];

    store.save_all(&[], &[], &[], &appointments).unwrap();
    let loaded = store.load_all().unwrap();

    assert_eq!(loaded.appointments, appointments);
    assert_eq!(loaded.appointments[0].note, "Follow-up, bring labs");
}

#[test]
fn legacy_files_load_alongside_current_format() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.config().data_dir()).unwrap();
    fs::write(
        store.config().appointments_path(),
        "# id,patientId,doctorId,note\n3,10001,20001,Bring X-ray, fasting\nA00004,10002,20001,,Checkup\n",
    )
    .unwrap();

    let loaded = store.load_all().unwrap();

    assert_eq!(loaded.appointments.len(), 2);
    assert_eq!(loaded.appointments[0].id.to_string(), "A00003");
    assert_eq!(loaded.appointments[0].note, "Bring X-ray, fasting");
    assert_eq!(loaded.appointments[1].note, "Checkup");
}

#[test]
fn unreadable_data_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("Data");
    fs::write(&blocker, "not a directory").unwrap();

    let store = FlatFileStore::new(StoreConfig::new(&blocker));
    let err = store.load_all().unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn trailing_whitespace_in_last_field_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let appointments = vec![Appointment::with_id(
        AppointmentId::new(1),
        10001,
        20001,
        None,
        "bring labs ",
    )];

    store.save_all(&[], &[], &[], &appointments).unwrap();
    let loaded = store.load_all().unwrap();

    assert_eq!(loaded.appointments, appointments);
    assert_eq!(loaded.appointments[0].note, "bring labs ");
}

#[test]
fn legacy_dated_appointments_load_with_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.config().data_dir()).unwrap();
    fs::write(
        store.config().appointments_path(),
        "12,10001,20001,2024-05-01,Checkup\r\n5,10001,20001,C:\\notes\\new\r\n",
    )
    .unwrap();

    let loaded = store.load_all().unwrap();

    assert!(loaded.diagnostics.is_empty());
    assert_eq!(loaded.appointments.len(), 2);
    assert_eq!(loaded.appointments[0].scheduled_at, Some(1_714_521_600_000));
    assert_eq!(loaded.appointments[0].note, "Checkup");
    assert_eq!(loaded.appointments[1].note, r"C:\notes\new");
}
