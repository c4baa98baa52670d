//! Session change notifications.

pub mod bus;
