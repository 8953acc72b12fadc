use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Compras API",
        version = "1.0.0",
        description = r#"
# Sistema de Compras - Reporting and Notification API

Read-side API for a purchasing system: management reports over products,
suppliers, orders and quotes, plus operational notifications for the
dashboard.

## Reports

- **Stock performance**: stock levels classified against minimums, by category
- **Supplier analysis**: order aggregates and a 0-10 performance score per supplier
- **Executive dashboard**: KPIs, 30-day trends and critical alerts
- **Order trends**: weekly volumes, status mix and completion rate

## Notifications

Alert conditions are re-evaluated periodically from the database. Ids are
stable per source entity, so marking one as read persists across refreshes.
"#,
        contact(name = "Compras API Team")
    ),
    paths(
        crate::handlers::reports::stock_performance,
        crate::handlers::reports::supplier_analysis,
        crate::handlers::reports::executive_dashboard,
        crate::handlers::reports::order_trends,
        crate::handlers::notifications::list_notifications,
        crate::handlers::notifications::notification_summary,
        crate::handlers::notifications::mark_notification_read,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::scoring::StockLevel,
        crate::scoring::Severity,
        crate::reports::CountSeries,
        crate::reports::ValueSeries,
        crate::reports::WeeklySeries,
        crate::reports::StockProductRow,
        crate::reports::StockSummary,
        crate::reports::StockCharts,
        crate::reports::StockPerformanceReport,
        crate::reports::SupplierRow,
        crate::reports::SupplierSummary,
        crate::reports::SupplierCharts,
        crate::reports::SupplierAnalysisReport,
        crate::reports::DashboardKpis,
        crate::reports::DashboardTrends,
        crate::reports::DashboardAlert,
        crate::reports::ExecutiveDashboard,
        crate::reports::OrderRow,
        crate::reports::OrderSummary,
        crate::reports::OrderCharts,
        crate::reports::OrderTrendsReport,
        crate::notifications::NotificationKind,
        crate::notifications::Notification,
        crate::notifications::NotificationSummary,
        crate::handlers::notifications::NotificationListResponse,
        crate::handlers::notifications::NotificationSummaryResponse,
        crate::handlers::notifications::MarkReadResponse,
    )),
    tags(
        (name = "Reports", description = "Management reports"),
        (name = "Notifications", description = "Operational notifications"),
    )
)]
pub struct ApiDoc;

/// Swagger UI served at `/swagger-ui`, backed by `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
