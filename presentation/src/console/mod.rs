//! Interactive operator console

mod repl;

pub use repl::OperatorRepl;
