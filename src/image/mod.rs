pub mod frame;
pub mod io;
pub mod mask;
pub mod traits;

pub use self::frame::{Frame, Rgb};
pub use self::mask::Mask;
pub use self::traits::{ImageView, ImageViewMut, Rows};
