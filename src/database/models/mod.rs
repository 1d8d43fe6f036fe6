pub mod employee;
pub mod form;

pub use employee::{EmployeeFilter, EmployeeRecord, NewEmployee};
pub use form::{FormChanges, FormTemplate, NewFormTemplate};
