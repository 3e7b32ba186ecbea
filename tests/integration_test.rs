use credo::{
    CredentialDraft, CredoError, EnrollmentDraft, LocationDraft, ProviderDraft, Registration,
    RepositoryManager, Role, VerificationOutcome,
};
use chrono::NaiveDate;
use tempfile::TempDir;

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
}

/// Test the complete workflow: authenticate, issue, verify, restart
#[test]
fn test_complete_issuance_workflow() {
    // Setup: one store file standing in for the durable backend
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("credo-store.json");

    // Step 1: First open seeds every collection and writes the file
    let mut manager = RepositoryManager::open_file(&store_path).unwrap();
    assert!(store_path.exists());

    // Step 2: Authenticate the demo issuer
    let issuer = manager
        .session_mut()
        .authenticate("issuer@demo.com", "demo123")
        .unwrap();
    assert_eq!(issuer.role, Role::Issuer);

    // Step 3: Issue a credential
    let draft = CredentialDraft {
        id: None,
        name: "Rust Fundamentals Certificate".to_string(),
        credential_type: "Certification".to_string(),
        recipient: "Ada Lovelace".to_string(),
        recipient_email: "ada@example.com".to_string(),
        issue_date: may(1),
        expiry_date: Some(may(31)),
        status: "Active".to_string(),
    };
    let issued = manager.credentials_mut().create(draft, &issuer).unwrap();
    assert_eq!(issued.issuer, "Tech Academy");

    // Step 4: The issuer's listing now contains it
    let visible = manager.credentials().list_for(&issuer);
    assert_eq!(visible.len(), 3);
    assert_eq!(visible[2].id, issued.id);

    // Step 5: Anyone can verify it without a session
    match manager.credentials().verify(&issued.id) {
        VerificationOutcome::Found {
            credential,
            is_valid,
        } => {
            assert_eq!(credential.name, "Rust Fundamentals Certificate");
            assert!(is_valid);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    // Step 6: A fresh process sees the same record
    drop(manager);
    let reopened = RepositoryManager::open_file(&store_path).unwrap();
    assert!(reopened.credentials().get(&issued.id).is_some());

    // Step 7: The restored session still belongs to the issuer
    assert_eq!(
        reopened.session().current_user().unwrap().email,
        "issuer@demo.com"
    );
}

/// Test registration and role-scoped visibility
#[test]
fn test_registration_and_role_visibility() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("credo-store.json");
    let mut manager = RepositoryManager::open_file(&store_path).unwrap();

    // Register a recipient account; registration logs it in
    let grace = manager
        .session_mut()
        .register(Registration {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password: "c0b0l-rules".to_string(),
            role: Role::Recipient,
            organization: String::new(),
        })
        .unwrap();
    assert_eq!(manager.session().current_user().unwrap().id, grace.id);

    // A recipient may not issue credentials
    let denied = manager.credentials_mut().create(
        CredentialDraft {
            id: None,
            name: "Self-Issued".to_string(),
            credential_type: "Badge".to_string(),
            recipient: "Grace Hopper".to_string(),
            recipient_email: "grace@example.com".to_string(),
            issue_date: may(2),
            expiry_date: None,
            status: "Active".to_string(),
        },
        &grace,
    );
    assert!(matches!(denied, Err(CredoError::IssuerRoleRequired)));

    // The demo issuer issues one to Grace
    let issuer = manager
        .session_mut()
        .authenticate("issuer@demo.com", "demo123")
        .unwrap();
    manager
        .credentials_mut()
        .create(
            CredentialDraft {
                id: None,
                name: "Compiler Design Award".to_string(),
                credential_type: "Badge".to_string(),
                recipient: "Grace Hopper".to_string(),
                recipient_email: "grace@example.com".to_string(),
                issue_date: may(3),
                expiry_date: None,
                status: "Active".to_string(),
            },
            &issuer,
        )
        .unwrap();

    // Grace sees exactly her own credential
    let hers = manager.credentials().list_for(&grace);
    assert_eq!(hers.len(), 1);
    assert_eq!(hers[0].name, "Compiler Design Award");

    // And she shows up in the issuer's recipients view
    let recipients = manager.credentials().recipients(&issuer).unwrap();
    assert!(recipients.iter().any(|r| r.email == "grace@example.com"));

    // Re-registering the same email is rejected
    let duplicate = manager.session_mut().register(Registration {
        name: "Grace Again".to_string(),
        email: "grace@example.com".to_string(),
        password: "other".to_string(),
        role: Role::Recipient,
        organization: String::new(),
    });
    assert!(matches!(duplicate, Err(CredoError::EmailAlreadyExists(_))));
}

/// Test the provider-network workflow: entities, joins, weak references
#[test]
fn test_network_enrollment_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("credo-store.json");
    let mut manager = RepositoryManager::open_file(&store_path).unwrap();

    // Create a location and a provider practicing there
    let clinic = manager
        .locations_mut()
        .create(LocationDraft {
            name: "Lakeside Family Clinic".to_string(),
            location_type: "Clinic".to_string(),
            address: "12 Shore Road".to_string(),
            city: "Chicago".to_string(),
            state: "IL".to_string(),
            zip: "60601".to_string(),
            phone: "(312) 555-7777".to_string(),
            status: "Active".to_string(),
        })
        .unwrap();
    assert_eq!(clinic.id, "LOC-003");

    let provider = manager
        .providers_mut()
        .create(ProviderDraft {
            name: "Dr. Rosalind Franklin".to_string(),
            npi: "1112223334".to_string(),
            specialty: "Radiology".to_string(),
            license: "IL-55555".to_string(),
            state: "IL".to_string(),
            email: "r.franklin@lakeside.example.com".to_string(),
            phone: "(312) 555-8888".to_string(),
            location_id: Some(clinic.id.clone()),
            status: "Active".to_string(),
        })
        .unwrap();
    assert_eq!(provider.id, "PROV-003");

    let resolved = manager
        .providers()
        .resolve_location(&provider, manager.locations())
        .unwrap();
    assert_eq!(resolved.name, "Lakeside Family Clinic");

    // Enroll the provider with a seeded payer
    let enrollment = manager
        .enrollments_mut()
        .create(EnrollmentDraft {
            provider_id: provider.id.clone(),
            payer_id: "PAY-001".to_string(),
            application_date: may(10),
            effective_date: None,
            status: "In Progress".to_string(),
            notes: "Credentialing packet sent".to_string(),
        })
        .unwrap();

    let summaries = manager
        .enrollments()
        .summaries(manager.providers(), manager.payers());
    let row = summaries
        .iter()
        .find(|s| s.enrollment.id == enrollment.id)
        .unwrap();
    assert_eq!(row.provider_name, "Dr. Rosalind Franklin");
    assert_eq!(row.payer_name, "Blue Cross Blue Shield");

    // Deleting the provider leaves the enrollment dangling but intact
    manager.providers_mut().delete(&provider.id).unwrap();
    let summaries = manager
        .enrollments()
        .summaries(manager.providers(), manager.payers());
    let row = summaries
        .iter()
        .find(|s| s.enrollment.id == enrollment.id)
        .unwrap();
    assert_eq!(row.provider_name, "Unknown Provider");
    assert_eq!(row.payer_name, "Blue Cross Blue Shield");

    // Everything survives a restart
    drop(manager);
    let reopened = RepositoryManager::open_file(&store_path).unwrap();
    assert!(reopened.enrollments().get(&enrollment.id).is_some());
    assert!(reopened.providers().get(&provider.id).is_none());
    assert_eq!(reopened.locations().list().len(), 3);
}

/// Test that deletions stick across restarts instead of being reseeded
#[test]
fn test_deletions_are_not_reseeded() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("credo-store.json");

    {
        let mut manager = RepositoryManager::open_file(&store_path).unwrap();
        manager.credentials_mut().delete("CRED-2024-003").unwrap();
        manager.session_mut().logout().unwrap();
    }

    let manager = RepositoryManager::open_file(&store_path).unwrap();
    assert!(manager.credentials().get("CRED-2024-003").is_none());
    assert!(manager.session().current_user().is_none());

    // Deleted seed ids are not reissued either
    assert!(matches!(
        manager.credentials().verify("CRED-2024-003"),
        VerificationOutcome::NotFound { .. }
    ));
}
