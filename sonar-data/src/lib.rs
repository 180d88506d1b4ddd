pub mod event;
pub mod polar;
pub mod reading;

pub use event::SweepEvent;
pub use polar::PolarPoint;
pub use reading::Reading;
