mod duolingo;
mod firefox;
mod gravatar;
mod spotify;

pub use duolingo::Duolingo;
pub use firefox::Firefox;
pub use gravatar::Gravatar;
pub use spotify::Spotify;

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
