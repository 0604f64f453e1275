pub mod cbl;
pub mod config;
pub mod corpus;
pub mod error;
pub mod parser;
pub mod report;
pub mod running_average;
pub mod types;
pub mod util;
