pub mod ids;
pub mod phone;
pub mod time;
