pub mod campaign;
pub mod helpers;
pub mod logging;
pub mod profile;
pub mod purchase;
pub mod store;
