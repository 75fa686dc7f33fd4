pub mod decode;

pub use decode::{PreparedImage, load_image};
