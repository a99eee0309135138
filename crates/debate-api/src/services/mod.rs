//! Typed wrappers over the platform endpoints, one service per resource.

pub mod admins;
pub mod categories;
pub mod comments;
pub mod dashboard;
pub mod debates;
pub mod reports;
pub mod uploads;
pub mod users;

pub use admins::{AdminAccount, AdminManagementService, CreateAdminRequest};
pub use categories::{Category, CategoryService};
pub use comments::{CommentRecord, CommentService};
pub use dashboard::{DashboardService, DashboardStats};
pub use debates::{DebateService, DebateSummary, DebateUpdate};
pub use reports::{NewReport, ReportRecord, ReportService};
pub use uploads::UploadService;
pub use users::{UserService, UserSummary};
