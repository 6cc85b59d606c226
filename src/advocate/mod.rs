// Public API - what other modules can use
pub use handlers::{get_advocate, list_advocates};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
