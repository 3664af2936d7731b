pub mod envelope;
pub mod page;
pub mod query;

pub use envelope::{Record, ResultEnvelope, Statistics, Status};
pub use page::Page;
pub use query::{DATE_FORMAT, DateRange, Location, Query, Scheme};
