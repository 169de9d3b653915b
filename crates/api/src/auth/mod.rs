//! Credentials for the single site owner: Argon2id password checks
//! ([`password`]) and the HS256 bearer tokens issued at login ([`jwt`]).

pub mod jwt;
pub mod password;
