//! Channel registry derived from one-hot schema columns.
//!
//! The model encodes channel identity as one-hot indicator columns named
//! `channel_name_<channel>`. The registry strips that prefix to recover the
//! set of channels the model knows about; the presentation layer renders it
//! as the selectable options. Derived once at startup, read-only thereafter.

use crate::error::{Result, ViewcastError};
use crate::schema::Schema;

/// Prefix marking one-hot channel indicator columns.
pub const CHANNEL_PREFIX: &str = "channel_name_";

/// Set of channel names the model was trained on.
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    /// Channel names in schema order.
    channels: Vec<String>,
}

impl ChannelRegistry {
    /// Derives the registry from the schema. The remainder after the prefix is
    /// preserved exactly, spaces and casing included. Zero matching columns is
    /// a fatal configuration error: no channel choice can ever be offered.
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let channels: Vec<String> = schema
            .columns()
            .iter()
            .filter_map(|col| col.strip_prefix(CHANNEL_PREFIX))
            .map(|name| name.to_string())
            .collect();

        if channels.is_empty() {
            return Err(ViewcastError::Config(format!(
                "no '{}' columns in the schema; no channel choice can be offered",
                CHANNEL_PREFIX
            )));
        }

        Ok(Self { channels })
    }

    /// Channel names in schema order.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Whether the model was trained with this channel.
    pub fn contains(&self, name: &str) -> bool {
        self.channels.iter().any(|c| c == name)
    }

    /// Schema column name carrying the indicator for a channel.
    pub fn column_for(&self, name: &str) -> String {
        format!("{}{}", CHANNEL_PREFIX, name)
    }
}
