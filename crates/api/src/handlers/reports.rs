//! Monthly search analytics: JSON report and CSV export.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Response, StatusCode};
use axum::Json;
use chrono::Month;
use hearth_db::models::search_log::{DimensionCount, MonthlyReport};
use hearth_db::repositories::SearchLogRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::StaffUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl ReportParams {
    /// Both parameters are required and strict here, unlike browse filters:
    /// a report for a garbled month is meaningless rather than recoverable.
    fn resolve(&self) -> Result<(i32, u32), AppError> {
        let month: u32 = self
            .month
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| AppError::BadRequest("Invalid or missing month (1-12)".into()))?;
        let year: i32 = self
            .year
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|y| (1970..=9999).contains(y))
            .ok_or_else(|| AppError::BadRequest("Invalid or missing year".into()))?;
        Ok((year, month))
    }
}

/// GET /api/v1/staff/reports/search
pub async fn monthly_report(
    State(state): State<AppState>,
    _staff: StaffUser,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<MonthlyReport>>> {
    let (year, month) = params.resolve()?;
    let report = SearchLogRepo::monthly_report(&state.pool, year, month)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or missing month (1-12)".into()))?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/staff/reports/search/export
///
/// The same report rendered as a CSV attachment. A month with no recorded
/// searches exports nothing and returns 400.
pub async fn export_report(
    State(state): State<AppState>,
    _staff: StaffUser,
    Query(params): Query<ReportParams>,
) -> AppResult<Response<Body>> {
    let (year, month) = params.resolve()?;
    let report = SearchLogRepo::monthly_report(&state.pool, year, month)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or missing month (1-12)".into()))?;

    if report.is_empty() {
        return Err(AppError::BadRequest(format!(
            "No search data recorded for {year}-{month:02}"
        )));
    }

    let csv = render_csv(&report);
    let filename = format!("search-report-{year}-{month:02}.csv");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(csv))
        .map_err(|err| AppError::InternalError(format!("Failed to build CSV response: {err}")))
}

fn render_csv(report: &MonthlyReport) -> String {
    let month_name = Month::try_from(report.month as u8)
        .map(|m| m.name())
        .unwrap_or("Unknown");

    let mut csv = String::new();
    csv.push_str(&format!(
        "Search Analytics Report - {month_name} {}\n\n",
        report.year
    ));
    push_section(&mut csv, "Property Type", &report.by_property_type);
    push_section(&mut csv, "Neighborhood", &report.by_neighborhood);
    push_section(&mut csv, "Price Range", &report.by_price_bucket);
    csv
}

fn push_section(csv: &mut String, heading: &str, rows: &[DimensionCount]) {
    csv.push_str(&format!("{heading},Searches\n"));
    for row in rows {
        csv.push_str(&format!("{},{}\n", escape_csv(&row.name), row.count));
    }
    csv.push('\n');
}

/// Quote fields containing commas, quotes, or newlines per RFC 4180.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> MonthlyReport {
        MonthlyReport {
            year: 2025,
            month: 3,
            by_property_type: vec![DimensionCount {
                name: "Condo".into(),
                count: 4,
            }],
            by_neighborhood: vec![DimensionCount {
                name: "Old Town, North".into(),
                count: 2,
            }],
            by_price_bucket: vec![DimensionCount {
                name: "$250,000+".into(),
                count: 7,
            }],
        }
    }

    #[test]
    fn csv_has_title_and_sections() {
        let csv = render_csv(&sample_report());
        assert!(csv.starts_with("Search Analytics Report - March 2025\n"));
        assert!(csv.contains("Property Type,Searches\nCondo,4\n"));
        assert!(csv.contains("Neighborhood,Searches\n"));
        assert!(csv.contains("Price Range,Searches\n"));
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let csv = render_csv(&sample_report());
        assert!(csv.contains("\"Old Town, North\",2\n"));
        assert!(csv.contains("\"$250,000+\",7\n"));
    }

    #[test]
    fn params_reject_out_of_range_month() {
        let params = ReportParams {
            month: Some("13".into()),
            year: Some("2025".into()),
        };
        assert!(params.resolve().is_err());
    }

    #[test]
    fn params_accept_valid_input() {
        let params = ReportParams {
            month: Some("12".into()),
            year: Some("2024".into()),
        };
        assert_eq!(params.resolve().unwrap(), (2024, 12));
    }
}
