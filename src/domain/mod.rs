pub mod error;

// Uploaded tables and the values derived from them
pub mod table;
