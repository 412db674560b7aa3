pub mod cli;
pub mod figure;
pub mod report;
pub mod runner;
pub mod svg_renderer;
pub mod terminal_renderer;
