pub mod csv_export;
pub mod csv_import;
pub mod file;

pub use file::{default_data_path, load_data, save_data};
