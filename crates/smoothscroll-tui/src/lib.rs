pub mod app;
pub mod event;
pub mod input;
pub mod theme;
pub mod viewport;
pub mod wheel;
pub mod widgets;

pub use app::App;
pub use theme::GruvboxMaterial;
pub use viewport::Viewport;
pub use wheel::{WheelEvent, WheelOutcome, WheelRouter};
