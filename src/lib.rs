pub mod config;
pub mod console;
pub mod data_models;
pub mod duckduckgo;
pub mod error;
pub mod fetcher;
pub mod llm;
pub mod quiz;
pub mod quiz_runner;
pub mod searcher;
pub mod session;
pub mod summarizer;
