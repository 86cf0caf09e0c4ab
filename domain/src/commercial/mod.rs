//! Commercial terms of a deal: commission, payment plans, schedules

pub mod schedule;
pub mod terms;
