pub mod app;
pub mod binding;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gpu;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod math;
pub mod overlay;
pub mod panel;
pub mod params;
pub mod scene;
pub mod shapes;
pub mod traits;
pub mod viewport;

pub use error::{PanelError, ParamError, SessionError};
pub use lifecycle::{LifecycleState, PreviewSession};
pub use params::{ParamRecord, ParamValue};
pub use shapes::{ShapeDescriptor, ShapeKind};
