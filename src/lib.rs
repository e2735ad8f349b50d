pub mod config;
pub mod fetch;
pub mod merge;
pub mod normalize;
pub mod output;
