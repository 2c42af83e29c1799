mod credentials;
mod key_segment;
mod session_token;

pub use credentials::{Credentials, Identity};
pub use key_segment::KeySegment;
pub use session_token::SessionToken;
