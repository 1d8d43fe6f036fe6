pub mod employee_service;
pub mod error;
pub mod form_service;

pub use employee_service::{EmployeeEntry, EmployeeService, Statistics, TemplateCount};
pub use error::ServiceError;
pub use form_service::{CreateForm, FieldInput, FormFields, FormPatch, FormService, FormSummary};
