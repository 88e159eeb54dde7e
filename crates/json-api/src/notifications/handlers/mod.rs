//! Notification Handlers

pub(crate) mod create;
pub(crate) mod list;
