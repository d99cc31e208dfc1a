pub mod error;
pub mod traits;
pub mod types;
pub mod window;

pub use error::*;
pub use traits::*;
pub use types::*;
pub use window::*;
