pub mod app;
pub mod cli;
pub mod config;
pub mod directory;
pub mod engine;
pub mod filter;
pub mod output;
pub mod window;

#[cfg(test)]
mod tests;
