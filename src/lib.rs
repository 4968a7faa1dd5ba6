#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod draft;
pub mod editor;
pub mod export;
pub mod fill;
pub mod io;
pub mod logger;
pub mod viewport;
