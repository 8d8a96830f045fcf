//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod add_expense;
pub mod common;
pub mod list_expenses;
pub mod summarize;

pub use add_expense::{AddExpenseParams, AddExpenseTool};
pub use list_expenses::{ListExpensesParams, ListExpensesTool};
pub use summarize::{SummarizeParams, SummarizeTool};
