pub mod debug;
pub mod public;
pub mod secure;
