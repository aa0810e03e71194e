//! Gemini Adapter
//!
//! Implementation of the TextGenerator port using the Gemini
//! `generateContent` REST endpoint.

mod client;
mod types;

pub use client::{GeminiClient, GeminiConfig};
