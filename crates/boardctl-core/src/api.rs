use anyhow::{Context, anyhow};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::model::{
    ApiMessage, BlockSnapshot, Board, Column, CreatedBoard, NewBoard, TaskCard, ThemeEntry,
};

/// Result of mirroring the block snapshot. Mirroring is best-effort; the
/// outcome is handed back to the caller instead of disappearing into a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Accepted(Value),
    Failed(String),
}

/// Result of the create-board flow. All three arms are user-visible, so
/// they are data rather than errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBoardOutcome {
    Created(String),
    Rejected(String),
    Unreachable,
}

/// Remote surface of the task-board backend. The seam exists so commands
/// can be exercised against an in-memory fake.
pub trait BoardService {
    fn boards(&self) -> anyhow::Result<Vec<Board>>;

    fn columns(&self, board_id: u64) -> anyhow::Result<Vec<Column>>;

    /// Tasks for one column. Failures resolve to the empty list: a column
    /// whose fetch failed renders exactly like a column with no tasks.
    fn tasks(&self, column_id: u64) -> Vec<TaskCard>;

    fn themes(&self) -> anyhow::Result<Vec<ThemeEntry>>;

    fn mirror_blocks(&self, snapshot: &BlockSnapshot) -> SyncOutcome;

    fn create_board(&self, name: &str) -> CreateBoardOutcome;
}

/// Blocking HTTP implementation. No timeouts are configured: a hung
/// request hangs the section it was feeding, as in the original client.
#[derive(Debug)]
pub struct HttpBoardService {
    agent: ureq::Agent,
    base: String,
    service: String,
}

pub const DEFAULT_API_BASE: &str =
    "https://personal-ga2xwx9j.outsystemscloud.com/TaskBoard_CS/rest/TaskBoard";

impl HttpBoardService {
    pub fn new(cfg: &Config) -> Self {
        let base = cfg
            .get("api.base")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let service = cfg
            .get("api.service")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Self {
            agent: ureq::agent(),
            base: base.trim_end_matches('/').to_string(),
            service: service.trim_end_matches('/').to_string(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        debug!(url, "issuing GET");
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| anyhow!("request failed for {url}: {err}"))?;

        response
            .into_json::<T>()
            .with_context(|| format!("failed to decode response from {url}"))
    }
}

impl BoardService for HttpBoardService {
    #[instrument(skip(self))]
    fn boards(&self) -> anyhow::Result<Vec<Board>> {
        self.get_json(&format!("{}/Boards", self.base))
    }

    #[instrument(skip(self))]
    fn columns(&self, board_id: u64) -> anyhow::Result<Vec<Column>> {
        self.get_json(&format!(
            "{}/ColumnByBoardId?BoardId={board_id}",
            self.base
        ))
    }

    #[instrument(skip(self))]
    fn tasks(&self, column_id: u64) -> Vec<TaskCard> {
        let url = format!("{}/TasksByColumnId?ColumnId={column_id}", self.service);
        match self.get_json::<Vec<TaskCard>>(&url) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(column_id, error = %err, "task fetch failed; rendering column empty");
                vec![]
            }
        }
    }

    #[instrument(skip(self))]
    fn themes(&self) -> anyhow::Result<Vec<ThemeEntry>> {
        self.get_json(&format!("{}/Themes", self.service))
    }

    #[instrument(skip(self, snapshot), fields(blocks = snapshot.blocks.len()))]
    fn mirror_blocks(&self, snapshot: &BlockSnapshot) -> SyncOutcome {
        let result = self.agent.post(&self.service).send_json(snapshot);

        match result {
            Ok(response) => match response.into_json::<Value>() {
                Ok(body) => {
                    debug!(%body, "mirror accepted");
                    SyncOutcome::Accepted(body)
                }
                Err(err) => {
                    warn!(error = %err, "mirror accepted but response body was unreadable");
                    SyncOutcome::Accepted(Value::Null)
                }
            },
            Err(err) => {
                warn!(error = %err, "mirror POST failed");
                SyncOutcome::Failed(err.to_string())
            }
        }
    }

    #[instrument(skip(self))]
    fn create_board(&self, name: &str) -> CreateBoardOutcome {
        let url = format!("{}/boards", self.service);
        let body = NewBoard {
            name: name.to_string(),
        };

        match self.agent.post(&url).send_json(&body) {
            Ok(response) => match response.into_json::<CreatedBoard>() {
                Ok(created) => CreateBoardOutcome::Created(created.name),
                Err(err) => {
                    warn!(error = %err, "create-board response was unreadable");
                    CreateBoardOutcome::Created(name.to_string())
                }
            },
            Err(ureq::Error::Status(code, response)) => {
                let message = response
                    .into_json::<ApiMessage>()
                    .map(|payload| payload.message)
                    .unwrap_or_else(|_| format!("HTTP {code}"));
                warn!(code, %message, "create-board rejected");
                CreateBoardOutcome::Rejected(message)
            }
            Err(err) => {
                warn!(error = %err, "create-board request failed");
                CreateBoardOutcome::Unreachable
            }
        }
    }
}
