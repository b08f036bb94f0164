pub mod locale_formatter;
pub mod table_editor;
pub mod table_export;
pub mod table_loader;
