pub mod claims;
pub mod config;
pub mod error;
pub mod navigation;

pub use claims::*;
pub use config::*;
pub use error::*;
pub use navigation::*;
