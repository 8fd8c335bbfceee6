mod app;
pub mod board;
pub mod input;
pub mod layout;

pub use app::App;
