//! Reports page: dashboard summary and generated report tables

pub mod generate;
pub mod summary;

pub use generate::{
    NO_REPORT_MESSAGE, ReportGenerator, ReportRequest, ReportTable, ReportType, StatusColumn,
    StatusFilter,
};
pub use summary::{Summary, SummaryCalculator, SummaryReport, summarize};

/// Heading of the reports page
pub const REPORTS_TITLE: &str = "Business Reports & Analytics";
