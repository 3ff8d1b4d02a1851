pub mod env;
pub mod filter;
pub mod tree;
