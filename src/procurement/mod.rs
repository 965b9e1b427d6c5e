//! Procurement Module
//!
//! Physics plausibility screening of manufacturer offers. Evaluation is a
//! pure function of the offer, the site figures and `BidConfig`.

pub mod bid_validator;

pub use bid_validator::{classify, evaluate};
