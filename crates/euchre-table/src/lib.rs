pub mod scheduler;
pub mod seats;
pub mod session;

pub use scheduler::{CpuActivation, TurnScheduler};
pub use seats::{Occupant, SeatError, SeatMap};
pub use session::{GameSession, NotificationSink, SessionError, SessionEvent};
