mod file_identity;

pub use file_identity::FileIdentityProvider;
