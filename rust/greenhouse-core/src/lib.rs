pub mod db;
pub mod models;

pub use db::Db;
pub use models::{Newsletter, NewsletterFields, Plant, PlantFields};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
