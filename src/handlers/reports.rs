use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::ServiceError,
    reports::{
        ExecutiveDashboard, OrderTrendsReport, StockPerformanceReport, SupplierAnalysisReport,
    },
    AppState,
};

/// Build the reports Router scoped under `/api/v1/reports`.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/stock-performance", get(stock_performance))
        .route("/supplier-analysis", get(supplier_analysis))
        .route("/executive-dashboard", get(executive_dashboard))
        .route("/order-trends", get(order_trends))
}

/// Query parameters shared by the windowed reports.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Number of days to look back (default: 30)
    #[param(minimum = 1, maximum = 365)]
    pub days: Option<i32>,
    /// Restrict to one product category
    pub category: Option<String>,
}

fn validated_days(days: Option<i32>) -> Result<u32, ServiceError> {
    let days = days.unwrap_or(30);
    if !(1..=365).contains(&days) {
        return Err(ServiceError::Validation(
            "Parâmetro 'days' deve estar entre 1 e 365".to_string(),
        ));
    }
    Ok(days as u32)
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/stock-performance",
    params(ReportQuery),
    responses(
        (status = 200, description = "Stock performance report", body = StockPerformanceReport),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn stock_performance(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<StockPerformanceReport>, ServiceError> {
    validated_days(params.days)?;
    // An empty category means no filter, matching the frontend's default.
    let category = params.category.as_deref().filter(|c| !c.is_empty());
    let report = state.report_service.stock_performance(category).await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/supplier-analysis",
    params(ReportQuery),
    responses(
        (status = 200, description = "Supplier analysis report", body = SupplierAnalysisReport),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn supplier_analysis(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<SupplierAnalysisReport>, ServiceError> {
    let days = validated_days(params.days)?;
    let report = state.report_service.supplier_analysis(days).await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/executive-dashboard",
    responses(
        (status = 200, description = "Executive dashboard", body = ExecutiveDashboard)
    ),
    tag = "Reports"
)]
pub async fn executive_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ExecutiveDashboard>, ServiceError> {
    let report = state.report_service.executive_dashboard().await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/order-trends",
    params(ReportQuery),
    responses(
        (status = 200, description = "Order trends report", body = OrderTrendsReport),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn order_trends(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<OrderTrendsReport>, ServiceError> {
    let days = validated_days(params.days)?;
    let report = state.report_service.order_trends(days).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_default_is_thirty() {
        assert_eq!(validated_days(None).unwrap(), 30);
    }

    #[test]
    fn days_bounds_reject_out_of_range() {
        assert!(validated_days(Some(0)).is_err());
        assert!(validated_days(Some(366)).is_err());
        assert!(validated_days(Some(-5)).is_err());
        assert_eq!(validated_days(Some(1)).unwrap(), 1);
        assert_eq!(validated_days(Some(365)).unwrap(), 365);
    }
}
