//! Terminal interface: the event loop, views and the services that feed it.

pub mod app;
pub mod events;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
