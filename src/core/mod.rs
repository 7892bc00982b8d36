pub mod bisect;
pub mod curve;
pub mod layout;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use bisect::{bisect_center, bisect_center_f64, bisect_left, bisect_right};
pub use curve::{CubicSegment, SubPath, monotone_subpath};
pub use layout::{Margins, PanelLayout};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{PlotRect, Viewport};
pub use value_scale::ValueScale;
