pub mod animal;
pub mod auth;
pub mod booking;
pub mod show_round;
pub mod stage;
pub mod user;

pub use animal::{Animal, AnimalChanges, NewAnimal};
pub use auth::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokenPair};
pub use booking::{Booking, BookingChanges, NewBooking};
pub use show_round::{NewShowRound, ShowRound, ShowRoundChanges};
pub use stage::{NewStage, PerformanceStage, StageChanges};
pub use user::{User, UserChanges, UserRecord, UserUpdate, DEFAULT_ROLE};
