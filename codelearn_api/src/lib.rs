mod client;
mod errors;
mod query;
mod session;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{
    ClassQuery, ContestQuery, CourseQuery, ProblemQuery, Query, QueryCommon,
};
pub use self::session::Session;
