pub mod check;
pub mod cst;
pub mod dump;
pub mod filter_loader;

#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod dump_tests;
