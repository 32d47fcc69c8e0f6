use hospital_core::{
    Account, Admin, ContactInfo, Doctor, NewDoctor, NewPatient, Patient, Role, User, UserProfile,
};

fn profile(id: u32, name: &str) -> UserProfile {
    UserProfile::new(id, name, format!("pw{id}"), ContactInfo::default())
}

#[test]
fn with_id_keeps_explicit_identifier_and_password() {
    let patient = Patient::with_id(
        UserProfile::new(10042, "Ann Lee", "secret", ContactInfo::default()),
        31,
        "W",
        Some(20001),
    );

    assert_eq!(patient.id(), 10042);
    assert_eq!(patient.profile.password, "secret");
    assert_eq!(patient.doctor_id, Some(20001));
    assert!(patient.is_assigned_to(20001));
}

#[test]
fn create_new_mints_id_and_derived_password() {
    let existing = vec![
        Patient::with_id(profile(10001, "A"), 20, "M", None),
        Patient::with_id(profile(10004, "B"), 40, "W", None),
    ];

    let patient = Patient::create_new(
        NewPatient {
            name: "Cara".to_string(),
            age: 27,
            gender: "W".to_string(),
            ..NewPatient::default()
        },
        &existing,
    )
    .unwrap();

    assert_eq!(patient.id(), 10005);
    assert_eq!(patient.profile.password, "pw10005");
    assert_eq!(patient.profile.contact, ContactInfo::default());
}

#[test]
fn doctor_create_new_starts_at_partition_floor() {
    let doctor = Doctor::create_new(
        NewDoctor {
            name: "Gregory House".to_string(),
            specialty: "Diagnostics".to_string(),
            ..NewDoctor::default()
        },
        &[],
    )
    .unwrap();

    assert_eq!(doctor.id(), 20001);
    assert_eq!(doctor.profile.password, "pw20001");
}

#[test]
fn gender_label_maps_known_codes_and_passes_others_through() {
    let label = |gender: &str| {
        Patient::with_id(profile(10001, "P"), 30, gender, None)
            .gender_label()
            .to_string()
    };

    assert_eq!(label("M"), "Man");
    assert_eq!(label("W"), "Woman");
    assert_eq!(label("X"), "X");
    assert_eq!(label("nonbinary"), "nonbinary");
    assert_eq!(label(""), "Unknown");
    assert_eq!(label("  "), "Unknown");
}

#[test]
fn doctor_display_name_never_double_prefixes() {
    let doctor = |name: &str| Doctor::with_id(profile(20001, name), "GP").display_name();

    assert_eq!(doctor("Gregory House"), "Dr. Gregory House");
    assert_eq!(doctor("Dr. Gregory House"), "Dr. Gregory House");
    assert_eq!(doctor("dr. Lisa Cuddy"), "dr. Lisa Cuddy");
    assert_eq!(doctor("  DR. James Wilson"), "  DR. James Wilson");
    assert_eq!(doctor("Drake Ramoray"), "Dr. Drake Ramoray");
}

#[test]
fn formatted_address_uses_sentinel_when_blank() {
    let admin = Admin::with_id(profile(90001, "Root"));
    assert_eq!(admin.profile.formatted_address(), "Not provided");

    let contact = ContactInfo {
        street_number: "221B".to_string(),
        street: "Baker Street".to_string(),
        city: "London".to_string(),
        state: "".to_string(),
        ..ContactInfo::default()
    };
    let admin = Admin::with_id(UserProfile::new(90002, "Ops", "pw", contact));
    assert_eq!(admin.profile.formatted_address(), "221B Baker Street, London");
}

#[test]
fn user_summary_switches_on_variant() {
    let patient: User = Patient::with_id(profile(10001, "Ann"), 30, "W", None).into();
    let doctor: User = Doctor::with_id(profile(20001, "Dr. House"), "Diagnostics").into();
    let admin: User = Admin::with_id(profile(90001, "Root")).into();

    assert_eq!(patient.role(), Role::Patient);
    assert_eq!(
        patient.summary(),
        "10001 | Ann | Age:30 | Gender:Woman | Doctor:-"
    );
    assert_eq!(doctor.to_string(), "20001 | Dr. House | Diagnostics");
    assert_eq!(admin.summary(), "90001 | Root");
}

#[test]
fn user_serialization_uses_role_tag() {
    let user: User = Doctor::with_id(profile(20001, "House"), "Diagnostics").into();

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["role"], "doctor");
    assert_eq!(json["profile"]["id"], 20001);
    assert_eq!(json["specialty"], "Diagnostics");

    let decoded: User = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, user);
}

#[test]
fn formatted_address_with_blank_street_has_no_stray_space() {
    let contact = ContactInfo {
        street_number: "12".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        ..ContactInfo::default()
    };
    let admin = Admin::with_id(UserProfile::new(90003, "Desk", "pw", contact));
    assert_eq!(admin.profile.formatted_address(), "12, Springfield, IL");
}
