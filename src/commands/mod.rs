pub mod parse;
pub mod states;
