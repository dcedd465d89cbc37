//! photo-pdf
//!
//! ギャラリーの写真を選んで1つのPDFにまとめ、保存または共有する

pub mod assembler;
pub mod cli;
pub mod config;
pub mod error;
pub mod gallery;
pub mod interactive;
pub mod output;
pub mod permission;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod session;
