use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{closed_enum, MediaId, Record, ResourceKind};

closed_enum!(MediaKind {
    Image => "image",
    Video => "video",
    Audio => "audio",
    Document => "document",
});

closed_enum!(MediaStatus {
    Active => "active",
    Archived => "archived",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaField {
    Filename,
    AltText,
    MimeType,
}

/// An uploaded asset in the media library. Only its metadata is editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub mime_type: String,
    pub kind: MediaKind,
    pub status: MediaStatus,
    #[serde(default)]
    pub size_bytes: u64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDraft {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub kind: MediaKind,
    pub status: MediaStatus,
}

impl Record for Media {
    type Id = MediaId;
    type Category = MediaKind;
    type Status = MediaStatus;
    type Field = MediaField;
    type Draft = MediaDraft;

    const KIND: ResourceKind = ResourceKind::Media;
    const DEFAULT_SEARCH_FIELDS: &'static [MediaField] =
        &[MediaField::Filename, MediaField::AltText];

    fn id(&self) -> &MediaId {
        &self.id
    }

    fn field_text(&self, field: MediaField) -> Option<&str> {
        match field {
            MediaField::Filename => Some(self.filename.as_str()),
            MediaField::AltText => self.alt_text.as_deref(),
            MediaField::MimeType => Some(self.mime_type.as_str()),
        }
    }

    fn category(&self) -> Option<MediaKind> {
        Some(self.kind)
    }

    fn status(&self) -> Option<MediaStatus> {
        Some(self.status)
    }

    fn to_draft(&self) -> MediaDraft {
        MediaDraft {
            filename: self.filename.clone(),
            alt_text: self.alt_text.clone(),
            kind: self.kind,
            status: self.status,
        }
    }

    fn title(&self) -> String {
        self.filename.clone()
    }
}
