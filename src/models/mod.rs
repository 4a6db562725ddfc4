pub mod image;
pub mod request;
pub mod response;

pub use image::*;
pub use request::*;
pub use response::*;
