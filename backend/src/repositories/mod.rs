pub mod employee;
pub mod employee_repository;

pub use employee::JsonFileEmployeeRepository;
pub use employee_repository::EmployeeRepository;
