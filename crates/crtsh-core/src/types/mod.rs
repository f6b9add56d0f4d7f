mod hostname;
mod record;
mod resolution;

pub use hostname::*;
pub use record::*;
pub use resolution::*;
