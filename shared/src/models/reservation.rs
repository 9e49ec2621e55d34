//! Reservation Model
//!
//! Status, payment status and payment method use the French labels the
//! dashboard displays; they are stored verbatim in the database and on the
//! wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Client, Room};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ReservationStatus {
    #[serde(rename = "Confirmée")]
    #[cfg_attr(feature = "db", sqlx(rename = "Confirmée"))]
    Confirmed,
    #[serde(rename = "En cours")]
    #[cfg_attr(feature = "db", sqlx(rename = "En cours"))]
    InProgress,
    #[serde(rename = "Terminée")]
    #[cfg_attr(feature = "db", sqlx(rename = "Terminée"))]
    Completed,
    #[serde(rename = "Annulée")]
    #[cfg_attr(feature = "db", sqlx(rename = "Annulée"))]
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmée",
            Self::InProgress => "En cours",
            Self::Completed => "Terminée",
            Self::Cancelled => "Annulée",
        }
    }

    /// Terminal statuses lock the reservation against further mutation
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment progress of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PaymentStatus {
    #[serde(rename = "En attente")]
    #[cfg_attr(feature = "db", sqlx(rename = "En attente"))]
    Pending,
    #[serde(rename = "Partiel")]
    #[cfg_attr(feature = "db", sqlx(rename = "Partiel"))]
    Partial,
    #[serde(rename = "Payé")]
    #[cfg_attr(feature = "db", sqlx(rename = "Payé"))]
    Paid,
    #[serde(rename = "Remboursé")]
    #[cfg_attr(feature = "db", sqlx(rename = "Remboursé"))]
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Partial => "Partiel",
            Self::Paid => "Payé",
            Self::Refunded => "Remboursé",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the client pays (a manually recorded label, not a processed
/// transaction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PaymentMethod {
    #[serde(rename = "Non défini")]
    #[cfg_attr(feature = "db", sqlx(rename = "Non défini"))]
    Undefined,
    #[serde(rename = "Carte Bancaire")]
    #[cfg_attr(feature = "db", sqlx(rename = "Carte Bancaire"))]
    Card,
    #[serde(rename = "Espèces")]
    #[cfg_attr(feature = "db", sqlx(rename = "Espèces"))]
    Cash,
    #[serde(rename = "Virement")]
    #[cfg_attr(feature = "db", sqlx(rename = "Virement"))]
    Transfer,
    #[serde(rename = "Chèque")]
    #[cfg_attr(feature = "db", sqlx(rename = "Chèque"))]
    Cheque,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "Non défini",
            Self::Card => "Carte Bancaire",
            Self::Cash => "Espèces",
            Self::Transfer => "Virement",
            Self::Cheque => "Chèque",
        }
    }

    /// The payment-method gate requires a defined method before terminal
    /// or non-pending payment states are reachable
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation entity
///
/// `version` is an optimistic-locking counter bumped on every mutation;
/// transitions compare-and-swap on it so concurrent staff edits cannot be
/// silently lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub client_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: ReservationStatus,
    /// Booked amount: nights x nightly room price, fixed at creation
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    /// Whether the record is locked against status/payment mutation
    pub fn is_locked(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of nights between check-in and check-out
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

/// Reservation hydrated with its client and room relations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationWithRelations {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub client: Client,
    pub room: Room,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    #[serde(rename = "clientId")]
    pub client_id: i64,
    #[serde(rename = "roomId")]
    pub room_id: i64,
    #[serde(rename = "checkInDate")]
    pub check_in_date: NaiveDate,
    #[serde(rename = "checkOutDate")]
    pub check_out_date: NaiveDate,
    /// Defaults to Confirmée when omitted
    pub status: Option<ReservationStatus>,
    /// Defaults to En attente when omitted
    #[serde(rename = "paymentStatus")]
    pub payment_status: Option<PaymentStatus>,
    /// Defaults to Non défini when omitted
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<PaymentMethod>,
}

/// Status/payment transition payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationTransition {
    pub status: Option<ReservationStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Payment method update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodUpdate {
    pub payment_method: PaymentMethod,
}
