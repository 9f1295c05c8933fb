pub mod account_delete;
pub mod profile_get;
pub mod profile_put;

pub use account_delete::account_delete;
pub use profile_get::profile_get;
pub use profile_put::profile_put;
