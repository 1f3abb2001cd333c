//! Terminal front end: event loop, effect execution and rendering.
mod app;
mod effects;
mod input;
mod logging;
mod terminal;
mod ui;

pub use app::run_app;
