pub mod codec;
pub mod pipeline;

pub use codec::{load_image, save_image, ImageCodec, PngCodec, RowOrder};
pub use pipeline::Pipeline;
