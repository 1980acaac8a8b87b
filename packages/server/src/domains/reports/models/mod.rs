pub mod disaster_report;

pub use disaster_report::DisasterReport;
