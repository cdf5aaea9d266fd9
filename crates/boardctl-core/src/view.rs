//! Server records projected into view models. No I/O happens here, so the
//! projection is testable without a terminal.

use crate::model::{Column, StoredUser, TaskCard};

pub const MISSING_TITLE: &str = "Sem título";
pub const MISSING_DESCRIPTION: &str = "Sem descrição";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub name: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub title: String,
    pub columns: Vec<ColumnView>,
}

pub fn card_view(task: &TaskCard) -> CardView {
    CardView {
        title: field_or(task.title.as_deref(), MISSING_TITLE),
        description: field_or(task.description.as_deref(), MISSING_DESCRIPTION),
    }
}

fn field_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// Builds the full board projection. The column list starts empty on every
/// call: switching boards can never leak stale columns into the view.
/// `fetch_tasks` is called once per column, and a column whose fetch came
/// back empty (including after a swallowed failure) simply has no cards.
pub fn build_board_view(
    title: &str,
    columns: &[Column],
    mut fetch_tasks: impl FnMut(u64) -> Vec<TaskCard>,
) -> BoardView {
    let mut view = BoardView {
        title: title.to_string(),
        columns: Vec::with_capacity(columns.len()),
    };

    for column in columns {
        let cards = fetch_tasks(column.id).iter().map(card_view).collect();
        view.columns.push(ColumnView {
            name: column.name.clone(),
            cards,
        });
    }

    view
}

/// Greeting line derived from the stored user: first name only, or the
/// unidentified-user fallback.
pub fn greeting(user: Option<&StoredUser>) -> String {
    match user {
        Some(user) => match user.name.split_whitespace().next() {
            Some(first) => format!("Olá, {first}"),
            None => "Usuário não identificado".to_string(),
        },
        None => "Usuário não identificado".to_string(),
    }
}
