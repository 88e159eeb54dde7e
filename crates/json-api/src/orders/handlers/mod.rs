//! Order Handlers

pub(crate) mod create;
pub(crate) mod list;
pub(crate) mod update_notes;
pub(crate) mod update_status;
