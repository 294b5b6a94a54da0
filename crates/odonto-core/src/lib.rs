pub mod geometry;
pub mod layout;
pub mod mode;
pub mod model;
pub mod save;
pub mod status;
pub mod style;
pub mod tooth;

pub use geometry::{Bounds, Point, Quad};
pub use layout::{ChartLayout, LayoutConfig, ToothLayout, Viewport, compute_layout};
pub use mode::{ConditionCode, IndicatorType, Mode, ModeGroup};
pub use model::*;
pub use save::{SaveBatches, prepare_save};
pub use status::{
    ChartItem, Classification, DiagnosisStatus, TreatmentStatus, Worklist, Worklists, classify,
    partition,
};
pub use style::{Color, Glyph, Hatch, SymbolStyle};
pub use tooth::{FDI_SEQUENCE, Surface, ToothId, ToothKind, ToothSequence};
