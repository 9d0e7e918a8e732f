pub mod board_api;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod due;
pub mod error;
pub mod filter;
pub mod model;
pub mod priority;
pub mod progress;
pub mod storage;
pub mod timeline;
