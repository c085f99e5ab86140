pub mod acceptance;
pub mod circle_recognizer;
pub mod recognizer_config;
