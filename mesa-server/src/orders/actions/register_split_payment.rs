//! Split-payment registration and progress.

use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus, SplitPaymentInput, SplitStatus};
use shared::{AppError, ErrorCode};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_order};
use crate::orders::money::{self, MONEY_TOLERANCE, to_decimal, to_f64};

/// Register one or more partial payments on an order in `PAGAMENTO`.
/// Each payment is its own row; registering never touches the order's
/// status, so the audit log and split records cannot clobber each other.
pub async fn register_split_payments(
    pool: &SqlitePool,
    order_id: i64,
    payments: Vec<SplitPaymentInput>,
) -> ServiceResult<SplitStatus> {
    if payments.is_empty() {
        return Err(AppError::validation("at least one payment is required").into());
    }

    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.status != OrderStatus::Pagamento {
        return Err(AppError::new(ErrorCode::OrderNotAwaitingPayment)
            .with_detail("status", order.status.as_str())
            .into());
    }

    let mut paid = to_decimal(db::payments::sum_by_order(&mut *tx, order_id).await?);
    let total = to_decimal(order.total);

    for payment in &payments {
        money::validate_payment_amount(payment.amount)?;
        let method = payment.method.trim();
        if method.is_empty() {
            return Err(AppError::new(ErrorCode::PaymentInvalidMethod).into());
        }
        if payment.payer_number <= 0 {
            return Err(AppError::validation(format!(
                "payer_number must be positive, got {}",
                payment.payer_number
            ))
            .into());
        }

        let amount = to_decimal(payment.amount);
        if paid + amount > total + MONEY_TOLERANCE {
            return Err(AppError::with_message(
                ErrorCode::PaymentInvalidAmount,
                format!(
                    "payment of {} exceeds the remaining balance of {}",
                    payment.amount,
                    to_f64((total - paid).max(Decimal::ZERO)),
                ),
            )
            .into());
        }

        db::payments::insert(
            &mut *tx,
            order_id,
            payment.payer_number,
            payment.payer_name.as_deref(),
            payment.amount,
            method,
        )
        .await?;
        db::audit::append(
            &mut *tx,
            order_id,
            &format!(
                "Pagamento parcial: pagante {} pagou {} ({})",
                payment.payer_number, payment.amount, method
            ),
        )
        .await?;
        paid += amount;
    }

    let status = compute_status(&mut *tx, &order).await?;
    tx.commit().await?;

    info!(
        order_id,
        paid = status.paid,
        remaining = status.remaining,
        can_finalize = status.can_finalize,
        "split payments registered"
    );
    Ok(status)
}

/// Split-payment progress for an order, without mutating anything.
pub async fn split_status(pool: &SqlitePool, order_id: i64) -> ServiceResult<SplitStatus> {
    let mut conn = pool.acquire().await?;
    let order = load_order(&mut *conn, order_id).await?;
    compute_status(&mut *conn, &order).await
}

async fn compute_status(
    conn: &mut SqliteConnection,
    order: &Order,
) -> ServiceResult<SplitStatus> {
    let payments = db::payments::find_by_order(&mut *conn, order.id).await?;

    let total = to_decimal(order.total);
    let paid: Decimal = payments.iter().map(|p| to_decimal(p.amount)).sum();
    let remaining = (total - paid).max(Decimal::ZERO);

    Ok(SplitStatus {
        order_id: order.id,
        total: to_f64(total),
        paid: to_f64(paid),
        remaining: to_f64(remaining),
        can_finalize: remaining <= MONEY_TOLERANCE,
        payments,
    })
}
