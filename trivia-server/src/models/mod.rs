//! Domain models with validation at construction
//!
//! Create input is validated when building these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod question;
pub mod pagination;

pub use validation::ValidationError;
pub use category::{category_map, Category, CategoryMap, DEFAULT_CATEGORIES};
pub use question::{lenient_i64, NewQuestion, Question};
pub use pagination::{Pagination, PaginationParams, QUESTIONS_PER_PAGE};
