//! Text processing and scoring module

pub mod text_processor;
pub mod skills;
pub mod skill_comparator;
pub mod embeddings;
pub mod embedding_manager;
pub mod scoring;
pub mod matcher;
