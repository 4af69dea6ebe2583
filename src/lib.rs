pub mod cli_args;
pub mod error;
mod extractor;
mod middleware;
pub mod openapi;
mod route;
mod schema;
pub mod server;
pub mod state;
pub mod store;
pub mod types;
mod utils;

#[cfg(test)]
mod test;
