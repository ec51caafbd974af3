//! Page image loading and cropping

pub mod image;

pub use self::image::PageImage;
