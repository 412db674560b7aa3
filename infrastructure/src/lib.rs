pub mod clusterer;
pub mod config;
pub mod embedder;
pub mod openai_client;
pub mod reducer;
