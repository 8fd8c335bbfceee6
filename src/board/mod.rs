mod models;

pub use models::{Board, Column, Status, Task, TaskPos};
