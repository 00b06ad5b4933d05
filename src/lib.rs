pub mod db;
pub mod handlers;
pub mod llm_wrapper;
pub mod logging;
pub mod prompts;
pub mod schemas;
pub mod settings;
