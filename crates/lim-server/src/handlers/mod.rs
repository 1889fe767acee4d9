//! HTTP request handlers

mod coach;

pub use coach::*;
