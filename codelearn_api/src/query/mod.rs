mod common;
pub use self::common::{Query, QueryCommon};

mod course;
pub use self::course::CourseQuery;

mod contest;
pub use self::contest::ContestQuery;

mod problem;
pub use self::problem::ProblemQuery;

mod class;
pub use self::class::ClassQuery;
