// File intake boundary

pub mod reader;

pub use reader::read_csv_file;
