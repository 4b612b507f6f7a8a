mod uid;

pub use uid::*;
