//! Record types for the six persisted collections
//!
//! Wire format note: collections predate this crate, so serialization keeps
//! the historical camelCase keys (including the `type` key on credentials,
//! locations, and payers). Optional dates are omitted entirely when absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Account role deciding which records a user sees and may manage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Issuer,
    Recipient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Salted PBKDF2 hash string, never a plaintext password
    pub password: String,
    pub role: Role,
    /// Issuing organization; empty for accounts without one
    #[serde(default)]
    pub organization: String,
}

/// An issued credential (certification, license, or badge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub recipient: String,
    pub recipient_email: String,
    /// Display name of the issuing party (organization or personal name)
    pub issuer: String,
    /// Id of the user account that issued this credential
    pub issuer_id: String,
    pub issue_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub status: String,
}

impl Credential {
    /// A credential verifies as valid only while its status is "Active"
    pub fn is_active(&self) -> bool {
        self.status == "Active"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub npi: String,
    pub specialty: String,
    pub license: String,
    pub state: String,
    pub email: String,
    pub phone: String,
    /// Weak reference to a Location id; dangling references are tolerated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub payer_type: String,
    /// External payer identifier (wire key `payerId`), distinct from `id`
    #[serde(rename = "payerId")]
    pub external_id: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub status: String,
}

/// A provider's enrollment with a payer; both references are weak
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub provider_id: String,
    pub payer_id: String,
    pub application_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    pub status: String,
    pub notes: String,
}

/// Render an optional date the way the record views expect ("Jan 15, 2024")
pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_wire_keys() {
        let credential = Credential {
            id: "CRED-2024-001".to_string(),
            name: "Advanced JavaScript Certification".to_string(),
            credential_type: "Certification".to_string(),
            recipient: "John Smith".to_string(),
            recipient_email: "john@example.com".to_string(),
            issuer: "Tech Academy".to_string(),
            issuer_id: "user-001".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            status: "Active".to_string(),
        };

        let value = serde_json::to_value(&credential).unwrap();
        assert_eq!(value["type"], "Certification");
        assert_eq!(value["recipientEmail"], "john@example.com");
        assert_eq!(value["issuerId"], "user-001");
        assert_eq!(value["issueDate"], "2024-01-15");
        assert_eq!(value["expiryDate"], "2026-01-15");
    }

    #[test]
    fn test_credential_without_expiry_omits_key() {
        let credential = Credential {
            id: "CRED-2024-003".to_string(),
            name: "Cybersecurity Specialist Badge".to_string(),
            credential_type: "Badge".to_string(),
            recipient: "Michael Chen".to_string(),
            recipient_email: "michael@example.com".to_string(),
            issuer: "CyberSec Global".to_string(),
            issuer_id: "user-003".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap(),
            expiry_date: None,
            status: "Active".to_string(),
        };

        let value = serde_json::to_value(&credential).unwrap();
        assert!(value.get("expiryDate").is_none());

        // And an absent key deserializes back to None
        let parsed: Credential = serde_json::from_value(value).unwrap();
        assert!(parsed.expiry_date.is_none());
    }

    #[test]
    fn test_payer_external_id_maps_to_payer_id_key() {
        let raw = json!({
            "id": "PAY-001",
            "name": "Blue Cross Blue Shield",
            "type": "Commercial",
            "payerId": "12345",
            "contact": "Jane Smith",
            "phone": "(800) 555-1234",
            "email": "provider.relations@bcbs.com",
            "status": "Active"
        });

        let payer: Payer = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(payer.external_id, "12345");
        assert_eq!(payer.payer_type, "Commercial");

        let back = serde_json::to_value(&payer).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(&Role::Issuer).unwrap(), json!("issuer"));
        let role: Role = serde_json::from_value(json!("recipient")).unwrap();
        assert_eq!(role, Role::Recipient);
    }

    #[test]
    fn test_is_active_requires_exact_status() {
        let mut credential = Credential {
            id: "CRED-2024-002".to_string(),
            name: "Project Management Professional".to_string(),
            credential_type: "License".to_string(),
            recipient: "Sarah Johnson".to_string(),
            recipient_email: "sarah@example.com".to_string(),
            issuer: "Tech Academy".to_string(),
            issuer_id: "user-001".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2023, 6, 20).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 6, 20),
            status: "Expired".to_string(),
        };
        assert!(!credential.is_active());

        credential.status = "Active".to_string();
        assert!(credential.is_active());

        credential.status = "active".to_string();
        assert!(!credential.is_active());
    }

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(format_display_date(date), "Jan 15, 2024");
        assert_eq!(format_display_date(None), "N/A");

        // Single-digit days are not zero-padded
        let short = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(format_display_date(short), "Mar 5, 2024");
    }
}
