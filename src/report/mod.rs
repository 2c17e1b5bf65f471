pub mod console;
pub mod record;
