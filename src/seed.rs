//! First-run sample records
//!
//! Each function returns the records installed when its collection key is
//! absent from the store. Ids and field values are fixed so a fresh store
//! always starts from the same known state.

use chrono::NaiveDate;

use crate::password::hash_password;
use crate::records::{Credential, Enrollment, Location, Payer, Provider, Role, User};

// Seed dates are fixed literals and always valid
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Demo accounts: one issuer with an organization, one plain recipient
pub fn users() -> Vec<User> {
    vec![
        User {
            id: "user-001".to_string(),
            name: "Jane Issuer".to_string(),
            email: "issuer@demo.com".to_string(),
            password: hash_password("demo123"),
            role: Role::Issuer,
            organization: "Tech Academy".to_string(),
        },
        User {
            id: "user-002".to_string(),
            name: "John Recipient".to_string(),
            email: "recipient@demo.com".to_string(),
            password: hash_password("demo123"),
            role: Role::Recipient,
            organization: String::new(),
        },
    ]
}

/// Sample credentials; the third belongs to an issuer account that does not
/// exist in the user seeds, which exercises foreign-issuer filtering
pub fn credentials() -> Vec<Credential> {
    vec![
        Credential {
            id: "CRED-2024-001".to_string(),
            name: "Advanced JavaScript Certification".to_string(),
            credential_type: "Certification".to_string(),
            recipient: "John Smith".to_string(),
            recipient_email: "john@example.com".to_string(),
            issuer: "Tech Academy".to_string(),
            issuer_id: "user-001".to_string(),
            issue_date: date(2024, 1, 15),
            expiry_date: Some(date(2026, 1, 15)),
            status: "Active".to_string(),
        },
        Credential {
            id: "CRED-2024-002".to_string(),
            name: "Project Management Professional".to_string(),
            credential_type: "License".to_string(),
            recipient: "Sarah Johnson".to_string(),
            recipient_email: "sarah@example.com".to_string(),
            issuer: "Tech Academy".to_string(),
            issuer_id: "user-001".to_string(),
            issue_date: date(2023, 6, 20),
            expiry_date: Some(date(2024, 6, 20)),
            status: "Expired".to_string(),
        },
        Credential {
            id: "CRED-2024-003".to_string(),
            name: "Cybersecurity Specialist Badge".to_string(),
            credential_type: "Badge".to_string(),
            recipient: "Michael Chen".to_string(),
            recipient_email: "michael@example.com".to_string(),
            issuer: "CyberSec Global".to_string(),
            issuer_id: "user-003".to_string(),
            issue_date: date(2024, 9, 10),
            expiry_date: None,
            status: "Active".to_string(),
        },
    ]
}

pub fn providers() -> Vec<Provider> {
    vec![
        Provider {
            id: "PROV-001".to_string(),
            name: "Dr. Sarah Johnson".to_string(),
            npi: "1234567890".to_string(),
            specialty: "Cardiology".to_string(),
            license: "CA-12345".to_string(),
            state: "CA".to_string(),
            email: "sarah.johnson@hospital.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            location_id: Some("LOC-001".to_string()),
            status: "Active".to_string(),
        },
        Provider {
            id: "PROV-002".to_string(),
            name: "Dr. Michael Chen".to_string(),
            npi: "9876543210".to_string(),
            specialty: "Pediatrics".to_string(),
            license: "NY-67890".to_string(),
            state: "NY".to_string(),
            email: "michael.chen@clinic.com".to_string(),
            phone: "(555) 987-6543".to_string(),
            location_id: Some("LOC-002".to_string()),
            status: "Active".to_string(),
        },
    ]
}

pub fn locations() -> Vec<Location> {
    vec![
        Location {
            id: "LOC-001".to_string(),
            name: "Memorial Hospital - Main Campus".to_string(),
            location_type: "Hospital".to_string(),
            address: "123 Medical Center Drive".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            zip: "90001".to_string(),
            phone: "(310) 555-1234".to_string(),
            status: "Active".to_string(),
        },
        Location {
            id: "LOC-002".to_string(),
            name: "Downtown Medical Clinic".to_string(),
            location_type: "Clinic".to_string(),
            address: "456 Health Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip: "10001".to_string(),
            phone: "(212) 555-5678".to_string(),
            status: "Active".to_string(),
        },
    ]
}

pub fn payers() -> Vec<Payer> {
    vec![
        Payer {
            id: "PAY-001".to_string(),
            name: "Blue Cross Blue Shield".to_string(),
            payer_type: "Commercial".to_string(),
            external_id: "12345".to_string(),
            contact: "Jane Smith".to_string(),
            phone: "(800) 555-1234".to_string(),
            email: "provider.relations@bcbs.com".to_string(),
            status: "Active".to_string(),
        },
        Payer {
            id: "PAY-002".to_string(),
            name: "Medicare".to_string(),
            payer_type: "Medicare".to_string(),
            external_id: "00001".to_string(),
            contact: "Medicare Services".to_string(),
            phone: "(800) 633-4227".to_string(),
            email: "provider@medicare.gov".to_string(),
            status: "Active".to_string(),
        },
    ]
}

pub fn enrollments() -> Vec<Enrollment> {
    vec![
        Enrollment {
            id: "ENR-001".to_string(),
            provider_id: "PROV-001".to_string(),
            payer_id: "PAY-001".to_string(),
            application_date: date(2024, 1, 15),
            effective_date: Some(date(2024, 2, 1)),
            status: "Approved".to_string(),
            notes: "Initial enrollment approved".to_string(),
        },
        Enrollment {
            id: "ENR-002".to_string(),
            provider_id: "PROV-002".to_string(),
            payer_id: "PAY-002".to_string(),
            application_date: date(2024, 3, 10),
            effective_date: None,
            status: "Pending".to_string(),
            notes: "Waiting for background check".to_string(),
        },
    ]
}
