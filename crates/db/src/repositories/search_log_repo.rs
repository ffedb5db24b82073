//! Repository for search analytics: event recording and the monthly roll-up.

use chrono::{TimeZone, Utc};
use hearth_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::search_log::{DimensionCount, MonthlyReport, NewSearchLogEntry};

/// Provides search-log writes and aggregation reads.
pub struct SearchLogRepo;

impl SearchLogRepo {
    /// Append one search event. Callers only invoke this when at least one
    /// dimension resolved; the write is best-effort from the browse path's
    /// point of view (the handler logs and swallows failures).
    pub async fn record(pool: &PgPool, entry: &NewSearchLogEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO search_log (property_type_id, neighborhood_id, price_bucket_id)
             VALUES ($1, $2, $3)",
        )
        .bind(entry.property_type_id)
        .bind(entry.neighborhood_id)
        .bind(entry.price_bucket_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Total number of recorded search events. Used by tests and the report
    /// header, not by end users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM search_log")
            .fetch_one(pool)
            .await
    }

    /// Roll up one calendar month of search events into per-dimension counts.
    ///
    /// Each section independently groups the non-null entries of its
    /// dimension by display name and sorts by count descending (name as
    /// tiebreak). Returns `None` for an invalid month number.
    pub async fn monthly_report(
        pool: &PgPool,
        year: i32,
        month: u32,
    ) -> Result<Option<MonthlyReport>, sqlx::Error> {
        let Some((start, end)) = month_bounds(year, month) else {
            return Ok(None);
        };

        let by_property_type = dimension_counts(
            pool,
            "SELECT pt.name AS name, COUNT(*)::BIGINT AS count
             FROM search_log sl
             JOIN property_types pt ON pt.id = sl.property_type_id
             WHERE sl.searched_at >= $1 AND sl.searched_at < $2
             GROUP BY pt.name
             ORDER BY count DESC, name ASC",
            start,
            end,
        )
        .await?;

        let by_neighborhood = dimension_counts(
            pool,
            "SELECT n.name AS name, COUNT(*)::BIGINT AS count
             FROM search_log sl
             JOIN neighborhoods n ON n.id = sl.neighborhood_id
             WHERE sl.searched_at >= $1 AND sl.searched_at < $2
             GROUP BY n.name
             ORDER BY count DESC, name ASC",
            start,
            end,
        )
        .await?;

        let by_price_bucket = dimension_counts(
            pool,
            "SELECT pb.label AS name, COUNT(*)::BIGINT AS count
             FROM search_log sl
             JOIN price_buckets pb ON pb.id = sl.price_bucket_id
             WHERE sl.searched_at >= $1 AND sl.searched_at < $2
             GROUP BY pb.label
             ORDER BY count DESC, name ASC",
            start,
            end,
        )
        .await?;

        Ok(Some(MonthlyReport {
            year,
            month,
            by_property_type,
            by_neighborhood,
            by_price_bucket,
        }))
    }

    /// Backdate an entry's timestamp. Test scaffolding for month-boundary
    /// coverage; the serving path never rewrites history.
    pub async fn set_searched_at(
        pool: &PgPool,
        id: DbId,
        searched_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE search_log SET searched_at = $2 WHERE id = $1")
            .bind(id)
            .bind(searched_at)
            .execute(pool)
            .await?;
        Ok(())
    }
}

async fn dimension_counts(
    pool: &PgPool,
    sql: &str,
    start: Timestamp,
    end: Timestamp,
) -> Result<Vec<DimensionCount>, sqlx::Error> {
    sqlx::query_as::<_, DimensionCount>(sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
}

/// The `[start, end)` UTC interval covering one calendar month, or `None`
/// for an out-of-range month number.
fn month_bounds(year: i32, month: u32) -> Option<(Timestamp, Timestamp)> {
    let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc.with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0).single()?;
    Some((start, end))
}
