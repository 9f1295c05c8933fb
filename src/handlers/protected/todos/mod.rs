pub mod todo_delete;
pub mod todo_get;
pub mod todo_put;
pub mod todos_get;
pub mod todos_post;

pub use todo_delete::todo_delete;
pub use todo_get::todo_get;
pub use todo_put::todo_put;
pub use todos_get::todos_get;
pub use todos_post::todos_post;
