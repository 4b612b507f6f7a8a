mod directory;
mod error;
mod folders;
mod interface;
mod memory;
mod paged;

pub use directory::*;
pub use error::*;
pub use folders::*;
pub use interface::*;
pub use memory::*;
pub use paged::*;
