
/// Register file views and the zero register.
pub mod register_file;
