pub mod category;
pub mod record;
pub mod status;
pub mod student;
