pub mod signin_post;
pub mod signup_post;

pub use signin_post::signin_post;
pub use signup_post::signup_post;
