//! carryquiz-core: problem generation, grading and the practice session.
//!
//! This crate holds everything about a column addition/subtraction quiz that
//! does not depend on how it is shown: the data model, the generator with its
//! carry/borrow checks, the scorer, the digit-box answer editor and the
//! session state machine that ties them together.

pub mod digits;
pub mod error;
pub mod generator;
pub mod model;
pub mod scoring;
pub mod session;
pub mod source;
pub mod worksheet;
