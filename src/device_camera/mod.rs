pub mod impl_fake;
pub mod impl_still_file;
pub mod interface;
