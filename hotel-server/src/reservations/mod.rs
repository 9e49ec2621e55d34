//! Reservation lifecycle
//!
//! All status and payment mutations flow through this module, which
//! enforces the lifecycle rules:
//!
//! - a reservation in a terminal status (Terminée, Annulée) is locked
//!   against any further mutation
//! - completing a reservation or requesting any payment status other
//!   than En attente requires a defined payment method
//! - moving to Terminée forces the payment status to Payé
//! - concurrent edits are detected through an optimistic version counter

use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::repository::{client, reservation, room, RepoError};
use crate::utils::AppError;
use shared::models::{
    PaymentMethod, PaymentStatus, Reservation, ReservationCreate, ReservationStatus,
    ReservationTransition, ReservationWithRelations,
};

/// Lifecycle rule violations
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Réservation verrouillée.")]
    Locked,

    #[error("Veuillez définir une méthode de paiement d'abord.")]
    PaymentMethodRequired,

    #[error("checkOutDate {0}")]
    InvalidDates(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("La réservation a été modifiée entre-temps.")]
    VersionConflict,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Locked => AppError::Conflict("Réservation verrouillée.".to_string()),
            LifecycleError::PaymentMethodRequired => AppError::Conflict(
                "Veuillez définir une méthode de paiement d'abord.".to_string(),
            ),
            LifecycleError::InvalidDates(msg) => AppError::field_validation("checkOutDate", msg),
            LifecycleError::NotFound(msg) => AppError::NotFound(msg),
            LifecycleError::VersionConflict => {
                AppError::Conflict("La réservation a été modifiée entre-temps.".to_string())
            }
            LifecycleError::Repo(e) => e.into(),
        }
    }
}

/// Resolve a requested transition against the current record.
///
/// The payment-method gate fires when the request asks for Terminée or for
/// any payment status other than En attente while no method is defined.
/// Terminée always forces the payment status to Payé.
///
/// Returns the effective (status, payment status) pair to persist.
fn resolve_transition(
    payment_method: PaymentMethod,
    current_status: ReservationStatus,
    current_payment: PaymentStatus,
    requested_status: Option<ReservationStatus>,
    requested_payment: Option<PaymentStatus>,
) -> Result<(ReservationStatus, PaymentStatus), LifecycleError> {
    let needs_method = requested_status == Some(ReservationStatus::Completed)
        || requested_payment.is_some_and(|p| p != PaymentStatus::Pending);
    if needs_method && !payment_method.is_defined() {
        return Err(LifecycleError::PaymentMethodRequired);
    }

    let status = requested_status.unwrap_or(current_status);
    let payment_status = if status == ReservationStatus::Completed {
        PaymentStatus::Paid
    } else {
        requested_payment.unwrap_or(current_payment)
    };

    Ok((status, payment_status))
}

async fn load(pool: &SqlitePool, id: i64) -> Result<Reservation, LifecycleError> {
    reservation::find_entity_by_id(pool, id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Reservation {id} not found")))
}

fn ensure_unlocked(entity: &Reservation) -> Result<(), LifecycleError> {
    if entity.is_locked() {
        return Err(LifecycleError::Locked);
    }
    Ok(())
}

/// Create a reservation.
///
/// The total amount is computed server-side: nights x nightly room price.
pub async fn create(
    pool: &SqlitePool,
    data: ReservationCreate,
) -> Result<ReservationWithRelations, LifecycleError> {
    if data.check_out_date <= data.check_in_date {
        return Err(LifecycleError::InvalidDates(
            "must be after checkInDate".to_string(),
        ));
    }

    client::find_by_id(pool, data.client_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Client {} not found", data.client_id)))?;
    let room = room::find_by_id(pool, data.room_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Room {} not found", data.room_id)))?;

    let payment_method = data.payment_method.unwrap_or(PaymentMethod::Undefined);

    // Creation goes through the same rules as a transition
    let (status, payment_status) = resolve_transition(
        payment_method,
        ReservationStatus::Confirmed,
        PaymentStatus::Pending,
        data.status,
        data.payment_status,
    )?;

    let nights = (data.check_out_date - data.check_in_date).num_days();
    let total_amount = nights as f64 * room.price;

    let created = reservation::insert(
        pool,
        data.client_id,
        data.room_id,
        data.check_in_date,
        data.check_out_date,
        status,
        total_amount,
        payment_status,
        payment_method,
    )
    .await?;

    tracing::info!(
        reservation_id = created.reservation.id,
        client_id = data.client_id,
        room_id = data.room_id,
        total_amount,
        "Reservation created"
    );

    Ok(created)
}

/// Transition a reservation's status and/or payment status.
pub async fn transition(
    pool: &SqlitePool,
    id: i64,
    data: ReservationTransition,
) -> Result<ReservationWithRelations, LifecycleError> {
    let current = load(pool, id).await?;
    ensure_unlocked(&current)?;

    let (status, payment_status) = resolve_transition(
        current.payment_method,
        current.status,
        current.payment_status,
        data.status,
        data.payment_status,
    )?;

    let applied =
        reservation::update_lifecycle(pool, id, current.version, status, payment_status).await?;
    if !applied {
        // Row gone or concurrently modified
        return match reservation::find_entity_by_id(pool, id).await? {
            Some(_) => Err(LifecycleError::VersionConflict),
            None => Err(LifecycleError::NotFound(format!(
                "Reservation {id} not found"
            ))),
        };
    }

    tracing::info!(
        reservation_id = id,
        status = %status,
        payment_status = %payment_status,
        "Reservation transitioned"
    );

    reservation::find_by_id(pool, id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Reservation {id} not found")))
}

/// Set the payment method on an unlocked reservation.
pub async fn set_payment_method(
    pool: &SqlitePool,
    id: i64,
    payment_method: PaymentMethod,
) -> Result<ReservationWithRelations, LifecycleError> {
    let current = load(pool, id).await?;
    ensure_unlocked(&current)?;

    let applied =
        reservation::update_payment_method(pool, id, current.version, payment_method).await?;
    if !applied {
        return match reservation::find_entity_by_id(pool, id).await? {
            Some(_) => Err(LifecycleError::VersionConflict),
            None => Err(LifecycleError::NotFound(format!(
                "Reservation {id} not found"
            ))),
        };
    }

    reservation::find_by_id(pool, id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Reservation {id} not found")))
}

/// Delete a reservation. Locked reservations cannot be deleted.
pub async fn remove(pool: &SqlitePool, id: i64) -> Result<bool, LifecycleError> {
    let current = load(pool, id).await?;
    ensure_unlocked(&current)?;
    Ok(reservation::delete(pool, id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        method: PaymentMethod,
        status: Option<ReservationStatus>,
        payment: Option<PaymentStatus>,
    ) -> Result<(ReservationStatus, PaymentStatus), LifecycleError> {
        resolve_transition(
            method,
            ReservationStatus::Confirmed,
            PaymentStatus::Pending,
            status,
            payment,
        )
    }

    #[test]
    fn completion_forces_paid() {
        let (status, payment_status) = resolve(
            PaymentMethod::Card,
            Some(ReservationStatus::Completed),
            None,
        )
        .expect("transition should resolve");
        assert_eq!(status, ReservationStatus::Completed);
        assert_eq!(payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn completion_overrides_requested_payment_status() {
        let (_, payment_status) = resolve(
            PaymentMethod::Cash,
            Some(ReservationStatus::Completed),
            Some(PaymentStatus::Partial),
        )
        .expect("transition should resolve");
        assert_eq!(payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn completion_without_method_is_gated() {
        let err = resolve(
            PaymentMethod::Undefined,
            Some(ReservationStatus::Completed),
            None,
        )
        .expect_err("gate should trigger");
        assert!(matches!(err, LifecycleError::PaymentMethodRequired));
    }

    #[test]
    fn any_non_pending_payment_without_method_is_gated() {
        for payment in [
            PaymentStatus::Partial,
            PaymentStatus::Paid,
            PaymentStatus::Refunded,
        ] {
            let err = resolve(PaymentMethod::Undefined, None, Some(payment))
                .expect_err("gate should trigger");
            assert!(matches!(err, LifecycleError::PaymentMethodRequired));
        }
    }

    #[test]
    fn resetting_payment_to_pending_needs_no_method() {
        let (_, payment_status) =
            resolve(PaymentMethod::Undefined, None, Some(PaymentStatus::Pending))
                .expect("pending needs no method");
        assert_eq!(payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn cancellation_needs_no_method() {
        let (status, payment_status) = resolve(
            PaymentMethod::Undefined,
            Some(ReservationStatus::Cancelled),
            None,
        )
        .expect("cancellation should resolve");
        assert_eq!(status, ReservationStatus::Cancelled);
        assert_eq!(payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn omitted_fields_keep_current_values() {
        let (status, payment_status) = resolve_transition(
            PaymentMethod::Card,
            ReservationStatus::InProgress,
            PaymentStatus::Partial,
            None,
            None,
        )
        .expect("no-op should resolve");
        assert_eq!(status, ReservationStatus::InProgress);
        assert_eq!(payment_status, PaymentStatus::Partial);
    }
}
