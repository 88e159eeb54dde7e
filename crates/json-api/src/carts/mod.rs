//! Carts (panier)

mod errors;
mod handlers;
mod responses;

pub(crate) use handlers::*;
