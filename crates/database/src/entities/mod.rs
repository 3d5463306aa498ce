//! Domain entities for the database layer

pub mod member;
pub mod workout;

pub use member::{Member, NewMember};
pub use workout::{NewWorkout, Workout, WorkoutChanges};
