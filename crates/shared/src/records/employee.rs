use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{closed_enum, EmployeeId, Record, ResourceKind};

closed_enum!(Department {
    Engineering => "engineering",
    Marketing => "marketing",
    Sales => "sales",
    Finance => "finance",
    HumanResources => "hr",
    Operations => "operations",
    Support => "support",
});

closed_enum!(EmployeeStatus {
    Active => "active",
    OnLeave => "on_leave",
    Inactive => "inactive",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
    pub department: Department,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
    pub department: Department,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl Record for Employee {
    type Id = EmployeeId;
    type Category = Department;
    type Status = EmployeeStatus;
    type Field = EmployeeField;
    type Draft = EmployeeDraft;

    const KIND: ResourceKind = ResourceKind::Employees;
    const DEFAULT_SEARCH_FIELDS: &'static [EmployeeField] = &[
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::Email,
        EmployeeField::Position,
    ];

    fn id(&self) -> &EmployeeId {
        &self.id
    }

    fn field_text(&self, field: EmployeeField) -> Option<&str> {
        match field {
            EmployeeField::FirstName => Some(self.first_name.as_str()),
            EmployeeField::LastName => Some(self.last_name.as_str()),
            EmployeeField::Email => Some(self.email.as_str()),
            EmployeeField::Phone => self.phone.as_deref(),
            EmployeeField::Position => Some(self.position.as_str()),
        }
    }

    fn category(&self) -> Option<Department> {
        Some(self.department)
    }

    fn status(&self) -> Option<EmployeeStatus> {
        Some(self.status)
    }

    fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            position: self.position.clone(),
            department: self.department,
            status: self.status,
            hire_date: self.hire_date,
            salary: self.salary,
        }
    }

    fn title(&self) -> String {
        self.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_payload() {
        let employee: Employee = serde_json::from_str(
            r#"{
                "id": "1",
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "position": "Engineer",
                "department": "engineering",
                "status": "on_leave",
                "hireDate": "2021-03-01"
            }"#,
        )
        .expect("employee payload");

        assert_eq!(employee.id, EmployeeId::new("1"));
        assert_eq!(employee.status, EmployeeStatus::OnLeave);
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2021, 3, 1));
        assert_eq!(employee.phone, None);
        assert_eq!(employee.title(), "John Doe");
    }

    #[test]
    fn human_resources_uses_short_wire_name() {
        assert_eq!("HR".parse::<Department>(), Ok(Department::HumanResources));
        assert_eq!(
            serde_json::to_string(&Department::HumanResources).expect("encode"),
            "\"hr\""
        );
    }
}
