use serde::{Deserialize, Serialize};

/// Top-level container of columns, server-owned. Fetched, never mutated
/// locally outside the explicit create-board flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    #[serde(rename = "Id")]
    pub id: u64,

    #[serde(rename = "Name")]
    pub name: String,
}

/// Ordered bucket of tasks within a board. The owning board is implicit in
/// the query that fetched it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    #[serde(rename = "Id")]
    pub id: u64,

    #[serde(rename = "Name")]
    pub name: String,
}

/// Server-owned work item, read-only in this client. Both fields may be
/// absent on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskCard {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,

    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

/// One entry of the remote theme list. At most one entry is expected to be
/// flagged active; the first active entry wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeEntry {
    #[serde(rename = "Label")]
    pub label: String,

    #[serde(rename = "Is_Active", default)]
    pub is_active: bool,
}

/// Client-owned ad-hoc to-do list, unrelated to server boards. Identity is
/// positional within the stored collection; there is no persistent key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskBlock {
    pub title: String,

    #[serde(default)]
    pub tasks: Vec<String>,
}

impl TaskBlock {
    pub fn new(title: String) -> Self {
        Self {
            title,
            tasks: vec![],
        }
    }
}

/// Full-replacement mirror payload. Every block mutation re-sends the whole
/// collection, never a delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockSnapshot {
    pub blocks: Vec<TaskBlock>,
}

/// Create-board request body.
#[derive(Debug, Clone, Serialize)]
pub struct NewBoard {
    pub name: String,
}

/// Create-board success response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedBoard {
    pub name: String,
}

/// Error body returned by the backend when a request is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Locally stored user, consulted only for the greeting line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    pub name: String,
}
