//! Command-line interface of the `quiz-order` binary.

use clap::{Parser, Subcommand};
use quiz_order_engine::ItemId;
use serde_json::{json, Value};

#[derive(Debug, Parser)]
#[command(name = "quiz-order")]
#[command(about = "Reorder the questions of a quiz against its backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command; listing is the default.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::List)
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the current order
    List,
    /// Move a question to a 0-based index
    Move { id: ItemId, index: usize },
    /// Remove a question from the quiz
    Remove { id: ItemId },
    /// Attach existing questions to the end of the quiz
    Attach {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },
    /// Create a new question and append it to the quiz
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long = "type", default_value = "MULTIPLE_CHOICE")]
        kind: String,
        #[arg(long, default_value = "MEDIUM")]
        difficulty: String,
        #[arg(long, default_value_t = 1)]
        points: u32,
    },
}

impl Command {
    /// Request body for [`Command::Create`].
    pub fn create_payload(&self) -> Option<Value> {
        match self {
            Command::Create {
                title,
                content,
                kind,
                difficulty,
                points,
            } => Some(json!({
                "title": title,
                "content": content.as_deref().unwrap_or(title),
                "type": kind,
                "difficulty": difficulty,
                "points": points,
            })),
            _ => None,
        }
    }
}
