pub mod error;
pub mod record;
pub mod tag;
pub mod value;

pub use error::*;
pub use record::*;
pub use tag::*;
pub use value::*;
