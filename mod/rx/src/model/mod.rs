pub mod drug;
pub mod order;
pub mod sales_report;
pub mod supplier;
pub mod user;

pub use drug::{Drug, DrugDto};
pub use order::{Order, OrderDto};
pub use sales_report::{SalesReport, SalesReportDto};
pub use supplier::{Supplier, SupplierDto};
pub use user::{AdminUser, AdminUserDto, DoctorUser, DoctorUserDto, UserView};
