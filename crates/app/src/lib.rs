//! Shared application domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

mod amounts;

#[cfg(test)]
mod test;
