//! Core data structures

pub mod gray;

pub use gray::GrayImage;
