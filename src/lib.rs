//! docent - A CLI tool for PDF question answering with RAG
//!
//! This crate provides:
//! - CLI commands for ingesting a PDF into a pgvector collection
//! - Vector similarity search over the ingested chunks
//! - An interactive chat loop answering strictly from retrieved context

pub mod answer;
pub mod chunk;
pub mod commands;
pub mod config;
pub mod embed;
pub mod error;
pub mod gemini;
pub mod llm;
pub mod loader;
pub mod prompt;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
