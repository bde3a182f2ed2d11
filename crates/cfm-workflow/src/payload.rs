//! Workflow items and their payloads

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a workflow payload identifies its resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadType {
    /// Repository path of the resource
    JcrPath,
    /// Repository identifier of the resource
    JcrUuid,
    /// External URL
    Url,
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PayloadType::JcrPath => "JCR_PATH",
            PayloadType::JcrUuid => "JCR_UUID",
            PayloadType::Url => "URL",
        };
        f.write_str(tag)
    }
}

/// A unit of work handed to the step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub payload_type: PayloadType,
    pub payload: String,
}

impl WorkItem {
    /// Create a work item whose payload is a repository path
    pub fn for_path(path: impl Into<String>) -> Self {
        let payload = path.into();
        Self {
            id: format!("item:{payload}"),
            payload_type: PayloadType::JcrPath,
            payload,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The payload path, if the payload is a path
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self.payload_type {
            PayloadType::JcrPath => Some(&self.payload),
            _ => None,
        }
    }
}
