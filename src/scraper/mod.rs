mod models;
mod scraper;
mod scraper_error;

pub use scraper::{collect_once, run_background_collection, NaverLandClient};
pub use scraper_error::ScrapeError;
