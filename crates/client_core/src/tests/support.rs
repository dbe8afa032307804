//! Fixtures shared by the unit tests.

use shared::{
    domain::EmployeeId,
    records::{Department, Employee, EmployeeStatus},
};

pub(crate) fn employee(
    id: &str,
    first_name: &str,
    last_name: &str,
    position: &str,
    department: Department,
    status: EmployeeStatus,
) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        phone: None,
        position: position.to_string(),
        department,
        status,
        hire_date: None,
        salary: None,
    }
}

/// The five employees the list page scenarios start from.
pub(crate) fn seeded_employees() -> Vec<Employee> {
    vec![
        employee(
            "1",
            "John",
            "Doe",
            "Software Engineer",
            Department::Engineering,
            EmployeeStatus::Active,
        ),
        employee(
            "2",
            "Jane",
            "Smith",
            "Marketing Manager",
            Department::Marketing,
            EmployeeStatus::Active,
        ),
        employee(
            "3",
            "Bob",
            "Johnson",
            "Sales Representative",
            Department::Sales,
            EmployeeStatus::Active,
        ),
        employee(
            "4",
            "Alice",
            "Williams",
            "QA Engineer",
            Department::Engineering,
            EmployeeStatus::OnLeave,
        ),
        employee(
            "5",
            "Charlie",
            "Brown",
            "Accountant",
            Department::Finance,
            EmployeeStatus::Inactive,
        ),
    ]
}

/// `count` employees alternating between engineering and sales.
pub(crate) fn numbered_employees(count: usize) -> Vec<Employee> {
    (1..=count)
        .map(|n| {
            let department = if n % 2 == 0 {
                Department::Sales
            } else {
                Department::Engineering
            };
            employee(
                &n.to_string(),
                &format!("Worker{n}"),
                "Example",
                "Associate",
                department,
                EmployeeStatus::Active,
            )
        })
        .collect()
}
