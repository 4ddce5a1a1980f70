pub mod app;
pub mod assets;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod menu;
pub mod paths;
pub mod renderer;
pub mod saves;
pub mod ui;
pub mod window;
