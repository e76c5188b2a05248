pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod identity;
pub mod lead_service;
pub use lead_service::LeadService;
pub mod sync_service;
pub use sync_service::SyncService;
