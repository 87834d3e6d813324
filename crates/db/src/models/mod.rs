pub mod live_token;
pub mod note;
pub mod user;
