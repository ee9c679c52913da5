/// Application-level constants and seed data.
use crate::models::Doctor;

pub const APP_NAME: &str = "Doctor Appointment Booking System";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "easybook=info"
}

const SEED: &[(&str, &str, &[&str])] = &[
    ("D101", "Dr. Mehta", &["10AM", "11AM", "12PM"]),
    ("D102", "Dr. Sharma", &["2PM", "3PM", "4PM"]),
    ("D103", "Dr. Verma", &["9AM", "1PM", "5PM"]),
];

/// The fixed doctor roster loaded on every start.
pub fn seed_doctors() -> Vec<Doctor> {
    SEED.iter()
        .map(|(id, name, slots)| {
            Doctor::new(
                id.to_string(),
                name.to_string(),
                slots.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}
