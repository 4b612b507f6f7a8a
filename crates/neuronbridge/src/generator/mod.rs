mod interface;
mod jacs;
mod policy;
mod status;

pub use interface::*;
pub use jacs::*;
pub use policy::*;
pub use status::*;
