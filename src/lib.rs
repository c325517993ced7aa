pub mod aggregate;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod keywords;
pub mod output;
pub mod query;
pub mod splitter;
pub mod web;
