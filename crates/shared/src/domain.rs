use std::{fmt, str::FromStr};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(EmployeeId);
id_newtype!(CustomerId);
id_newtype!(TemplateId);
id_newtype!(UserId);
id_newtype!(MediaId);

/// A textual value that does not name any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Declares a closed categorical enumeration with its wire spelling.
///
/// The first variant is the `Default`, which is what an empty create form
/// starts with.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident => $first_text:literal
            $(, $variant:ident => $text:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            #[serde(rename = $first_text)]
            $first,
            $(
                #[serde(rename = $text)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$variant)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $name::$first => $first_text,
                    $($name::$variant => $text,)*
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::UnknownVariant;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let input = input.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(input))
                    .ok_or_else(|| $crate::domain::UnknownVariant {
                        kind: stringify!($name),
                        value: input.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|variant| variant.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

pub(crate) use closed_enum;

closed_enum!(
    /// The record collections the admin backend exposes.
    ResourceKind {
        Employees => "employees",
        Customers => "customers",
        Templates => "templates",
        Users => "users",
        Media => "media",
    }
);

impl ResourceKind {
    /// Singular noun used in user-facing messages.
    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Employees => "employee",
            ResourceKind::Customers => "customer",
            ResourceKind::Templates => "template",
            ResourceKind::Users => "user",
            ResourceKind::Media => "media asset",
        }
    }
}

/// Equality filter over a closed enumeration, with an explicit "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: Copy + PartialEq> Filter<T> {
    pub fn matches(&self, value: Option<T>) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => value == Some(*wanted),
        }
    }

    pub fn value(&self) -> Option<T> {
        match self {
            Filter::All => None,
            Filter::Only(value) => Some(*value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Filter::Only(value),
            None => Filter::All,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        input.parse().map(Filter::Only)
    }
}

/// One item of a managed collection.
///
/// Records are owned by the remote API; locally they are only ever replaced
/// wholesale by the representation a successful round trip returns.
pub trait Record:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Id: Clone + fmt::Debug + fmt::Display + Eq + Send + Sync + 'static;
    type Category: Copy
        + fmt::Debug
        + fmt::Display
        + FromStr<Err = UnknownVariant>
        + Eq
        + Send
        + Sync
        + 'static;
    type Status: Copy
        + fmt::Debug
        + fmt::Display
        + FromStr<Err = UnknownVariant>
        + Eq
        + Send
        + Sync
        + 'static;
    /// Field selector for free-text search.
    type Field: Copy + fmt::Debug + Eq + Send + Sync + 'static;
    /// Editable fields, submitted wholesale on create and update.
    type Draft: Clone
        + fmt::Debug
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    const KIND: ResourceKind;
    const DEFAULT_SEARCH_FIELDS: &'static [Self::Field];

    fn id(&self) -> &Self::Id;
    fn field_text(&self, field: Self::Field) -> Option<&str>;
    fn category(&self) -> Option<Self::Category>;
    fn status(&self) -> Option<Self::Status>;
    fn to_draft(&self) -> Self::Draft;
    /// Short label for list rows and dialogs.
    fn title(&self) -> String;
}
