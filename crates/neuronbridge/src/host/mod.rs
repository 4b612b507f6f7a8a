mod resolver;
mod source;
#[cfg(test)]
mod tests;

pub use resolver::*;
pub use source::*;
