//! Integration test support for the billing authentication API

pub mod helpers;
