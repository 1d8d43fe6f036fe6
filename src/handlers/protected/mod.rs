pub mod employees;
pub mod forms;
mod params;
