//! Static catalogs: browsable subjects, curated top-rated games and the starter community feed.

mod community;
mod subjects;
mod top_rated;

pub use community::*;
pub use subjects::*;
pub use top_rated::*;
