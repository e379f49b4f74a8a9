//! Session collaborator

mod session;
mod token;

pub use session::SessionProvider;
pub use session::StaticSession;
pub use session::UserProfile;
pub use session::current_profile;
pub use token::AccessToken;
