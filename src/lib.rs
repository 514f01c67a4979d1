pub mod branches;
pub mod cli;
pub mod git;
pub mod list;
pub mod native;
pub mod purge;
pub mod status;

#[cfg(test)]
mod testing;
