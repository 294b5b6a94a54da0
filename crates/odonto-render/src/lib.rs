pub mod display_list;
pub mod frame;
pub mod hit;
pub mod overlay;
pub mod surface;
pub mod symbols;
pub mod theme;
pub mod vello_scene;

pub use display_list::{DisplayList, DrawOp};
pub use frame::{ChartPainter, build_static_layer, draw_items};
pub use hit::{HitTarget, hit_test};
pub use overlay::{Overlay, draw_overlay};
pub use surface::{DrawSurface, TextAlign};
pub use theme::ChartTheme;
pub use vello_scene::VelloSurface;
