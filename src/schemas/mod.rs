pub mod llm_response;
pub mod study_guide;
