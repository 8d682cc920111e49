//! Common test utilities for integration tests
#![allow(dead_code)]

use acadflow_mcp::{AcadflowServerHandler, Config};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Fixed "today" used by every integration test
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn test_config() -> Config {
    Config {
        today: Some(test_today()),
        reference_data: None,
    }
}

/// Create a test handler with temporary storage and the built-in reference data
pub fn get_test_handler() -> (AcadflowServerHandler, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let handler = AcadflowServerHandler::new(temp_dir.path(), &test_config()).unwrap();
    (handler, temp_dir)
}

/// Reopen the data directory the way a restarted server would
pub fn reopen_handler(temp_dir: &TempDir) -> AcadflowServerHandler {
    AcadflowServerHandler::new(temp_dir.path(), &test_config()).unwrap()
}
