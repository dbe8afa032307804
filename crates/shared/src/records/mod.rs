//! Record kinds managed by the admin console, one module per collection.

mod customer;
mod employee;
mod media;
mod template;
mod user;

pub use customer::{Customer, CustomerDraft, CustomerField, CustomerSegment, CustomerStatus};
pub use employee::{Department, Employee, EmployeeDraft, EmployeeField, EmployeeStatus};
pub use media::{Media, MediaDraft, MediaField, MediaKind, MediaStatus};
pub use template::{Template, TemplateCategory, TemplateDraft, TemplateField, TemplateStatus};
pub use user::{User, UserDraft, UserField, UserRole, UserStatus};
