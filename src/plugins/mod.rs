//! Roster subsystems: guardians, adolescents, and the study-outline helper.

pub mod adolescent;
pub mod guardian;
pub mod study;
