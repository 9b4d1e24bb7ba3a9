pub mod config;
pub mod logger;
pub mod server;
pub mod post;
pub mod store;
pub mod related;
pub mod series;
#[cfg(test)]
mod test_data;
mod render_cache;
mod text_utils;
mod query_string;
mod paginator;
mod view;
