pub mod conditions;
pub mod filter;
pub mod order;

pub use conditions::{Cond, FilterValue};
pub use filter::{Filter, SqlResult};
pub use order::{sort_column, sort_direction, OrderBy, SortDirection};
