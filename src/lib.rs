pub mod board;
pub mod config;
pub mod drag;
pub mod logging;
pub mod storage;
pub mod tui;
