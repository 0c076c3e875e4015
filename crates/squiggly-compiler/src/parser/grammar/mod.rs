//! Grammar productions for the filter language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.

mod args;
mod chains;
mod expressions;
mod filters;
mod heads;
