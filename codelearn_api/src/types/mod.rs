mod meta;
pub use self::meta::{ApiResponse, PageData, PaginatedResponse};

mod user;
pub use self::user::{LoginData, LoginRequest, LogoutRequest, Role, UserProfile, UserSummary};

mod course;
pub use self::course::{Course, CourseID, Lesson, Module};

mod contest;
pub use self::contest::{Contest, ContestID};

mod problem;
pub use self::problem::{Difficulty, Problem, ProblemID, Testcase};

mod class;
pub use self::class::{ClassID, ClassRoom, CourseRef};
