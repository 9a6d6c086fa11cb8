pub mod blockchair;
pub mod dashboard;
pub mod request;

pub use dashboard::*;
pub use request::*;
