//! Workout entity definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single exercise session belonging to one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
    pub id: i64,
    pub member_id: i64,
    pub workout_date: NaiveDate,
    pub workout_type: String,
    pub duration: f64,
    pub intensity: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub member_id: i64,
    pub workout_date: NaiveDate,
    pub workout_type: String,
    pub duration: f64,
    pub intensity: Option<String>,
    pub notes: Option<String>,
}

impl NewWorkout {
    pub fn into_workout(self, id: i64) -> Workout {
        Workout {
            id,
            member_id: self.member_id,
            workout_date: self.workout_date,
            workout_type: self.workout_type,
            duration: self.duration,
            intensity: self.intensity,
            notes: self.notes,
        }
    }
}

/// Replacement values for an existing workout. The owning member never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutChanges {
    pub workout_date: NaiveDate,
    pub workout_type: String,
    pub duration: f64,
    pub intensity: Option<String>,
    pub notes: Option<String>,
}
