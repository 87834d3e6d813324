pub mod live_token_repo;
pub mod note_repo;
pub mod user_repo;

pub use live_token_repo::LiveTokenRepo;
pub use note_repo::NoteRepo;
pub use user_repo::UserRepo;
