mod batch;
mod common;
mod filter;
