pub mod scraped_page;

pub use scraped_page::ScrapedPage;
