pub mod config;
pub mod convert;
pub mod extractor;
pub mod server;
pub mod storage;
