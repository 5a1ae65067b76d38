pub mod budgets;
pub mod config_cmd;
pub mod retrieve;
pub mod score;
