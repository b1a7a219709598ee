//! Status column configuration with flexible parsing.
//!
//! A status can be written in two formats:
//!
//! - Short format: `"todo"`
//! - Full format: `{ "name": "done", "show_duration": false }`
//!
//! # Examples
//!
//! ```
//! use taskwatch_config::StatusConfig;
//!
//! let status: StatusConfig = serde_json::from_str(r#""todo""#).unwrap();
//! assert_eq!(status.name(), "todo");
//! assert!(status.show_duration());
//!
//! let status: StatusConfig =
//!     serde_json::from_str(r#"{"name": "done", "show_duration": false}"#).unwrap();
//! assert!(!status.show_duration());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A single status on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    name: String,
    show_duration: Option<bool>,
}

impl StatusConfig {
    /// Creates a status that shows durations (the default).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show_duration: None,
        }
    }

    /// Creates a status with an explicit duration setting.
    #[must_use]
    pub fn with_duration(name: impl Into<String>, show_duration: bool) -> Self {
        Self {
            name: name.into(),
            show_duration: Some(show_duration),
        }
    }

    /// Parses the short string format.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn parse_short(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidStatuses {
                reason: "status names cannot be empty".to_string(),
            });
        }
        Ok(Self::new(name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether cards in this status show their age in the bottom border.
    #[must_use]
    pub fn show_duration(&self) -> bool {
        self.show_duration.unwrap_or(true)
    }
}

impl Serialize for StatusConfig {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.show_duration {
            None => serializer.serialize_str(&self.name),
            Some(show_duration) => {
                use serde::ser::SerializeStruct;
                let mut state = serializer.serialize_struct("StatusConfig", 2)?;
                state.serialize_field("name", &self.name)?;
                state.serialize_field("show_duration", &show_duration)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for StatusConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct StatusVisitor;

        impl<'de> Visitor<'de> for StatusVisitor {
            type Value = StatusConfig;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a status name or an object with name and show_duration")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                StatusConfig::parse_short(v).map_err(de::Error::custom)
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut show_duration: Option<bool> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "show_duration" => show_duration = Some(map.next_value()?),
                        _ => {
                            let _ = map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }

                let name = name.ok_or_else(|| de::Error::missing_field("name"))?;
                let mut status = StatusConfig::parse_short(&name).map_err(de::Error::custom)?;
                status.show_duration = show_duration;
                Ok(status)
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}
