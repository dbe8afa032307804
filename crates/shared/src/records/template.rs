use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{closed_enum, Record, ResourceKind, TemplateId};

closed_enum!(TemplateCategory {
    Email => "email",
    Landing => "landing",
    Product => "product",
    Blog => "blog",
});

closed_enum!(TemplateStatus {
    Draft => "draft",
    Published => "published",
    Archived => "archived",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateField {
    Name,
    Description,
    Content,
}

/// A reusable content template; `content` is the rich-text editor's HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    pub status: TemplateStatus,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub status: TemplateStatus,
    pub content: String,
}

impl Record for Template {
    type Id = TemplateId;
    type Category = TemplateCategory;
    type Status = TemplateStatus;
    type Field = TemplateField;
    type Draft = TemplateDraft;

    const KIND: ResourceKind = ResourceKind::Templates;
    const DEFAULT_SEARCH_FIELDS: &'static [TemplateField] =
        &[TemplateField::Name, TemplateField::Description];

    fn id(&self) -> &TemplateId {
        &self.id
    }

    fn field_text(&self, field: TemplateField) -> Option<&str> {
        match field {
            TemplateField::Name => Some(self.name.as_str()),
            TemplateField::Description => Some(self.description.as_str()),
            TemplateField::Content => Some(self.content.as_str()),
        }
    }

    fn category(&self) -> Option<TemplateCategory> {
        Some(self.category)
    }

    fn status(&self) -> Option<TemplateStatus> {
        Some(self.status)
    }

    fn to_draft(&self) -> TemplateDraft {
        TemplateDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            status: self.status,
            content: self.content.clone(),
        }
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}
