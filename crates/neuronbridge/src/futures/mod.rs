mod generator_ext;
mod sleep_provider;
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
mod tokio_sleep;

pub use generator_ext::*;
pub use sleep_provider::*;
#[cfg(feature = "async-tokio")]
pub use tokio_sleep::*;
