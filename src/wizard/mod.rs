pub mod machine;
pub mod script;
