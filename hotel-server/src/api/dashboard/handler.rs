//! Dashboard API Handlers
//!
//! Aggregates room, client and reservation data into the single payload
//! the dashboard home screen renders.

use axum::{extract::State, Json};
use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::dashboard::{self, MonthlyGroup};
use crate::db::repository::{reservation, room};
use crate::utils::AppResult;
use shared::models::{ReservationWithRelations, RoomStatus};

const LATEST_LIMIT: i64 = 5;
const TRAILING_MONTHS: u32 = 6;

/// Average month length used by the occupancy approximation
const DAYS_PER_MONTH: f64 = 30.0;

/// Revenue booked in one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueStat {
    /// Abbreviated month label ("Jan", "Feb", ...)
    pub month: String,
    pub revenue: f64,
}

/// Approximate occupancy for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyStat {
    pub month: String,
    /// Percentage, rounded
    pub rate: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(rename = "availableRooms")]
    pub available_rooms: i64,
    #[serde(rename = "totalRooms")]
    pub total_rooms: i64,
    /// Percentage of rooms not currently available, rounded
    #[serde(rename = "occupancyRate")]
    pub occupancy_rate: i64,
    #[serde(rename = "todayCheckIns")]
    pub today_check_ins: i64,
    /// Booked revenue across all reservations, paid or not
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "revenueStats")]
    pub revenue_stats: Vec<RevenueStat>,
    #[serde(rename = "occupancyStats")]
    pub occupancy_stats: Vec<OccupancyStat>,
    #[serde(rename = "latestReservations")]
    pub latest_reservations: Vec<ReservationWithRelations>,
}

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardResponse>> {
    let today = Utc::now().date_naive();
    let pool = &state.pool;

    let total_rooms = room::count_all(pool).await?;
    let available_rooms = room::count_by_status(pool, RoomStatus::Available).await?;
    let occupancy_rate = if total_rooms > 0 {
        (((total_rooms - available_rooms) as f64 / total_rooms as f64) * 100.0).round() as i64
    } else {
        0
    };

    let today_check_ins = dashboard::count_checkins_on(pool, today).await?;
    let total_revenue = dashboard::total_revenue(pool).await?;

    let since = today
        .checked_sub_months(Months::new(TRAILING_MONTHS))
        .unwrap_or(today);
    let groups = dashboard::monthly_groups(pool, since).await?;
    let (revenue_stats, occupancy_stats) = build_monthly_stats(&groups, total_rooms);

    let latest_reservations = reservation::find_recent(pool, LATEST_LIMIT).await?;

    Ok(Json(DashboardResponse {
        available_rooms,
        total_rooms,
        occupancy_rate,
        today_check_ins,
        total_revenue,
        revenue_stats,
        occupancy_stats,
        latest_reservations,
    }))
}

/// Abbreviated month label for a `YYYY-MM` group key
fn month_label(ym: &str) -> String {
    NaiveDate::parse_from_str(&format!("{ym}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b").to_string())
        .unwrap_or_else(|_| ym.to_string())
}

/// Project the monthly groups into the revenue and occupancy series.
///
/// Occupancy approximates reservation-nights coverage as
/// `count / (totalRooms * 30) * 100`; months without activity are absent
/// from both series.
pub fn build_monthly_stats(
    groups: &[MonthlyGroup],
    total_rooms: i64,
) -> (Vec<RevenueStat>, Vec<OccupancyStat>) {
    let max_occupancy = total_rooms as f64 * DAYS_PER_MONTH;
    let revenue = groups
        .iter()
        .map(|g| RevenueStat {
            month: month_label(&g.ym),
            revenue: g.revenue,
        })
        .collect();
    let occupancy = groups
        .iter()
        .map(|g| OccupancyStat {
            month: month_label(&g.ym),
            rate: if total_rooms > 0 {
                ((g.reservations as f64 / max_occupancy) * 100.0).round() as i64
            } else {
                0
            },
        })
        .collect();
    (revenue, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ym: &str, reservations: i64, revenue: f64) -> MonthlyGroup {
        MonthlyGroup {
            ym: ym.into(),
            reservations,
            revenue,
        }
    }

    #[test]
    fn series_keep_chronological_group_order() {
        let groups = vec![
            group("2025-11", 4, 1200.0),
            group("2026-01", 15, 4200.0),
            group("2026-02", 30, 9000.0),
        ];
        let (revenue, occupancy) = build_monthly_stats(&groups, 10);
        let months: Vec<&str> = revenue.iter().map(|s| s.month.as_str()).collect();
        assert_eq!(months, vec!["Nov", "Jan", "Feb"]);
        assert_eq!(revenue[1].revenue, 4200.0);
        // 15 / (10 * 30) * 100 = 5
        assert_eq!(occupancy[1].rate, 5);
        assert_eq!(occupancy[2].rate, 10);
    }

    #[test]
    fn zero_rooms_means_zero_occupancy() {
        let groups = vec![group("2026-08", 5, 100.0)];
        let (_, occupancy) = build_monthly_stats(&groups, 0);
        assert_eq!(occupancy[0].rate, 0);
    }

    #[test]
    fn quiet_store_yields_empty_series() {
        let (revenue, occupancy) = build_monthly_stats(&[], 10);
        assert!(revenue.is_empty());
        assert!(occupancy.is_empty());
    }

    #[test]
    fn response_serializes_with_camel_case_keys() {
        let response = DashboardResponse {
            available_rooms: 6,
            total_rooms: 10,
            occupancy_rate: 40,
            today_check_ins: 2,
            total_revenue: 1200.0,
            revenue_stats: vec![],
            occupancy_stats: vec![],
            latest_reservations: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalRooms"], 10);
        assert_eq!(json["availableRooms"], 6);
        assert_eq!(json["occupancyRate"], 40);
        assert_eq!(json["todayCheckIns"], 2);
        assert_eq!(json["totalRevenue"], 1200.0);
        assert!(json["latestReservations"].as_array().unwrap().is_empty());
    }
}
