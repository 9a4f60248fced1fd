//! Caller context for explorer-triggered commands.
//!
//! A command can be launched from a table node, from a service (instance)
//! node, or from the command palette with no node at all. Callers resolve
//! which one applies before invoking shared logic.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExplorerContext {
    /// Launched from a table node: region and table group are known.
    TableNode { region: String, group: String },
    /// Launched from the service node of a region.
    InstanceNode { region: String },
    /// Launched without any explorer node.
    None,
}

impl ExplorerContext {
    /// Resolve a context from optional region and group.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a group is given without a region.
    pub fn from_parts(region: Option<&str>, group: Option<&str>) -> Result<Self, CoreError> {
        let region = region.map(str::trim).filter(|r| !r.is_empty());
        let group = group.map(str::trim).filter(|g| !g.is_empty());

        match (region, group) {
            (Some(region), Some(group)) => Ok(Self::TableNode {
                region: region.to_string(),
                group: group.to_string(),
            }),
            (Some(region), None) => Ok(Self::InstanceNode {
                region: region.to_string(),
            }),
            (None, Some(group)) => Err(CoreError::Validation(format!(
                "table group '{group}' requires a region"
            ))),
            (None, None) => Ok(Self::None),
        }
    }

    /// Where the command was launched from, as reported to callers.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        match self {
            Self::TableNode { .. } => "ExplorerDynamoDbTableNode",
            Self::InstanceNode { .. } => "ExplorerServiceNode",
            Self::None => "Command",
        }
    }

    /// Region and group, only when launched from a table node.
    #[must_use]
    pub fn table_info(&self) -> Option<(&str, &str)> {
        match self {
            Self::TableNode { region, group } => Some((region, group)),
            Self::InstanceNode { .. } | Self::None => None,
        }
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        match self {
            Self::TableNode { region, .. } | Self::InstanceNode { region } => Some(region),
            Self::None => None,
        }
    }
}
