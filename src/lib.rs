pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod gesture;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod speed;
pub mod terminal_input;
pub mod terminal_runtime;
pub mod ui;
