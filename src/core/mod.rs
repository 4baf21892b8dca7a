pub mod config_loader;
pub mod error;
pub mod request;
pub mod traits;

pub use config_loader::*;
pub use error::*;
pub use request::*;
pub use traits::*;
