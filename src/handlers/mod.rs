pub mod categories;
pub mod common;
pub mod importing_requests;
pub mod products;
pub mod suppliers;
pub mod work_assignments;
pub mod work_schedules;
pub mod work_shifts;

use crate::{db::DbPool, logging::component_logger, services};
use slog::Logger;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<services::products::ProductService>,
    pub categories: Arc<services::categories::CategoryService>,
    pub suppliers: Arc<services::suppliers::SupplierService>,
    pub work_schedules: Arc<services::work_schedules::WorkScheduleService>,
    pub work_shifts: Arc<services::work_shifts::WorkShiftService>,
    pub work_assignments: Arc<services::work_assignments::WorkAssignmentService>,
    pub importing_requests: Arc<services::importing_requests::ImportingRequestService>,
    pub users: Arc<services::users::UserService>,
}

impl AppServices {
    /// Builds every service with its own component-tagged child of `logger`
    pub fn new(db_pool: Arc<DbPool>, logger: &Logger) -> Self {
        Self {
            products: Arc::new(services::products::ProductService::new(
                db_pool.clone(),
                component_logger(logger, "product_service"),
            )),
            categories: Arc::new(services::categories::CategoryService::new(
                db_pool.clone(),
                component_logger(logger, "category_service"),
            )),
            suppliers: Arc::new(services::suppliers::SupplierService::new(
                db_pool.clone(),
                component_logger(logger, "supplier_service"),
            )),
            work_schedules: Arc::new(services::work_schedules::WorkScheduleService::new(
                db_pool.clone(),
                component_logger(logger, "work_schedule_service"),
            )),
            work_shifts: Arc::new(services::work_shifts::WorkShiftService::new(
                db_pool.clone(),
                component_logger(logger, "work_shift_service"),
            )),
            work_assignments: Arc::new(services::work_assignments::WorkAssignmentService::new(
                db_pool.clone(),
                component_logger(logger, "work_assignment_service"),
            )),
            importing_requests: Arc::new(
                services::importing_requests::ImportingRequestService::new(
                    db_pool.clone(),
                    component_logger(logger, "importing_request_service"),
                ),
            ),
            users: Arc::new(services::users::UserService::new(
                db_pool,
                component_logger(logger, "user_service"),
            )),
        }
    }
}
