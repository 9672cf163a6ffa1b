//! Backend-owned records displayed and mutated by the console
//!
//! The backend serializes enumerations inconsistently: the same field can
//! arrive as its numeric code or as its name. Every coded enum here accepts
//! both and always sends the numeric code back.

use serde::{Deserialize, Serialize};

/// Wire shape of a coded enumeration
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum CodeOrName {
    Code(i64),
    Name(String),
    Other(serde::de::IgnoredAny),
}

/// Declares an enumeration with a stable numeric code and a wire name
///
/// Unknown names, unknown codes and `null` decode to the first (default)
/// variant so one odd record never fails a whole list. Parsing from a
/// string still rejects unknown values.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants in code order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Numeric code used on the wire
            pub const fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            /// Name used on the wire
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            /// Look a variant up by numeric code
            pub fn from_code(code: i64) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }

            /// Look a variant up by wire name, ignoring ASCII case
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(name.trim()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                if let Ok(code) = s.trim().parse::<i64>() {
                    return Self::from_code(code).ok_or_else(|| {
                        crate::Error::validation(stringify!($name), format!("unknown code {code}"))
                    });
                }
                Self::from_name(s).ok_or_else(|| {
                    crate::Error::validation(stringify!($name), format!("unknown value '{s}'"))
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.code())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let decoded = match crate::types::CodeOrName::deserialize(deserializer)? {
                    crate::types::CodeOrName::Code(code) => Self::from_code(code),
                    crate::types::CodeOrName::Name(name) => Self::from_name(&name),
                    crate::types::CodeOrName::Other(_) => None,
                };
                Ok(decoded.unwrap_or_else(|| {
                    tracing::debug!(kind = stringify!($name), "Unrecognized value, using the default");
                    Self::default()
                }))
            }
        }
    };
}

pub(crate) use coded_enum;

pub mod blog;
pub mod contact;
pub mod dashboard;
pub mod notification;
pub mod rating;
pub mod reservation;
pub mod service;
pub mod user;

pub use blog::{slugify, BlogPost, BlogPostInput, BlogStatus, DEFAULT_CATEGORY};
pub use contact::ContactForm;
pub use dashboard::{
    DashboardSummary, LastMonthFigures, MonthComparison, MonthlyDashboard, MonthlyFigures,
};
pub use notification::{NotificationReceiver, NotificationReceiverInput, NotificationType};
pub use rating::Rating;
pub use reservation::{
    PaymentInput, PaymentMethod, PaymentStatus, Reservation, ReservationStatus, ReservationUpdate,
};
pub use service::{Service, ServiceInput};
pub use user::{User, UserProfile};

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Current page (1-based)
    pub current_page: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Total number of records across all pages
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Slice an in-memory collection into a page
    ///
    /// `page` is 1-based and clamped into range; `page_size` of zero is
    /// treated as one.
    pub fn from_vec(items: Vec<T>, page: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let total_count = items.len() as u64;
        let total_pages = u32::try_from(total_count.div_ceil(u64::from(page_size)))
            .unwrap_or(u32::MAX)
            .max(1);
        let current_page = page.clamp(1, total_pages);
        let skip = (current_page as usize - 1).saturating_mul(page_size as usize);

        Self {
            items: items.into_iter().skip(skip).take(page_size as usize).collect(),
            current_page,
            total_pages,
            total_count,
        }
    }

    /// Whether a following page exists
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a preceding page exists
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Timestamp (de)serialization tolerant of the backend's naive date-times
///
/// Values without an offset (`2024-03-15T14:25:30.123`) are taken as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse an RFC 3339, naive date-time, or plain date string
    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Serialize as RFC 3339
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// Deserialize from any accepted format
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    /// Same as the parent module for optional fields; empty strings become `None`
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serialize as RFC 3339 or null
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize from any accepted format, null, or empty string
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
            }
        }
    }
}
