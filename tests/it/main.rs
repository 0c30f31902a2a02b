#![allow(missing_docs)]
pub mod utils;

mod mux;
