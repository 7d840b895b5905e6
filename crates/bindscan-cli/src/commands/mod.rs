pub mod fetch;
pub mod resolve;
