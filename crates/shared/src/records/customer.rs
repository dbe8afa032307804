use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{closed_enum, CustomerId, Record, ResourceKind};

closed_enum!(CustomerSegment {
    Retail => "retail",
    Wholesale => "wholesale",
    Vip => "vip",
    Enterprise => "enterprise",
});

closed_enum!(CustomerStatus {
    Active => "active",
    Inactive => "inactive",
    Blocked => "blocked",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Company,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub segment: CustomerSegment,
    pub status: CustomerStatus,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub segment: CustomerSegment,
    pub status: CustomerStatus,
}

impl Record for Customer {
    type Id = CustomerId;
    type Category = CustomerSegment;
    type Status = CustomerStatus;
    type Field = CustomerField;
    type Draft = CustomerDraft;

    const KIND: ResourceKind = ResourceKind::Customers;
    const DEFAULT_SEARCH_FIELDS: &'static [CustomerField] = &[
        CustomerField::Name,
        CustomerField::Email,
        CustomerField::Company,
    ];

    fn id(&self) -> &CustomerId {
        &self.id
    }

    fn field_text(&self, field: CustomerField) -> Option<&str> {
        match field {
            CustomerField::Name => Some(self.name.as_str()),
            CustomerField::Email => Some(self.email.as_str()),
            CustomerField::Phone => self.phone.as_deref(),
            CustomerField::Company => self.company.as_deref(),
        }
    }

    fn category(&self) -> Option<CustomerSegment> {
        Some(self.segment)
    }

    fn status(&self) -> Option<CustomerStatus> {
        Some(self.status)
    }

    fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            segment: self.segment,
            status: self.status,
        }
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}
