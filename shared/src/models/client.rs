//! Client Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hotel client (guest) entity
///
/// `email` and `registration_date` are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Identity document number
    pub document: Option<String>,
    #[serde(rename = "documentType")]
    pub document_type: Option<String>,
    #[serde(rename = "registrationDate")]
    pub registration_date: NaiveDate,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub document: Option<String>,
    #[serde(rename = "documentType")]
    pub document_type: Option<String>,
}

/// Update client payload
///
/// Email, document type and registration date are not updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
}
