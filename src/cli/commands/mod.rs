pub mod consent;
pub mod init;
pub mod keys;
pub mod locale;
pub mod render;
pub mod resolve;
