pub mod consts;
pub mod error;
pub mod options;
pub mod tokens;
pub mod config;
pub mod resolve;
pub mod script;
pub mod settings;
pub mod execute;
