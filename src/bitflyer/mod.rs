pub mod rest;
pub mod types;
pub mod ws;

pub use rest::BitflyerRestClient;
pub use ws::BitflyerWsClient;
