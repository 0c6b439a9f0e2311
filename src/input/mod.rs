//! Input processing module
//! Handles format detection, text decoding, and cached file reads

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
