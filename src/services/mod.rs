pub mod notifications;
pub mod reports;

pub use notifications::NotificationService;
pub use reports::ReportService;
