//! Dashboard aggregation queries
//!
//! Read-only snapshots recomputed from the store on every call.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::RepoResult;

/// One month of reservation activity, keyed by `YYYY-MM`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyGroup {
    pub ym: String,
    pub reservations: i64,
    pub revenue: f64,
}

/// Count of reservations checking in on the given date
pub async fn count_checkins_on(pool: &SqlitePool, date: NaiveDate) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reservation WHERE check_in_date = ?")
            .bind(date)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Booked revenue: the sum of every reservation's total amount, paid or not
pub async fn total_revenue(pool: &SqlitePool) -> RepoResult<f64> {
    let revenue: f64 = sqlx::query_scalar("SELECT COALESCE(SUM(total_amount), 0) FROM reservation")
        .fetch_one(pool)
        .await?;
    Ok(revenue)
}

/// Reservation counts and revenue grouped by check-in month, starting at
/// `since`. Groups are ordered chronologically by their earliest check-in;
/// months with no activity are absent.
pub async fn monthly_groups(pool: &SqlitePool, since: NaiveDate) -> RepoResult<Vec<MonthlyGroup>> {
    let rows = sqlx::query_as::<_, MonthlyGroup>(
        "SELECT strftime('%Y-%m', check_in_date) AS ym, COUNT(*) AS reservations, COALESCE(SUM(total_amount), 0) AS revenue \
         FROM reservation WHERE check_in_date >= ? \
         GROUP BY ym ORDER BY MIN(check_in_date)",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
