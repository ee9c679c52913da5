/// Data models for the booking ledger.
///
/// This module defines the core data structures used throughout the system:
/// - Doctor: a doctor and the slot labels still open for booking
/// - Appointment: a booked doctor/slot pair for one patient
/// - AppointmentSummary: the display form of an appointment
use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};

/// A doctor and their open time slots.
///
/// Slots keep their seed order. A slot returned by a cancellation is
/// appended at the end rather than put back in its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    available_slots: Vec<String>,
}

impl Doctor {
    pub fn new(id: String, name: String, slots: Vec<String>) -> Self {
        let mut available_slots: Vec<String> = Vec::with_capacity(slots.len());
        for slot in slots {
            if !available_slots.contains(&slot) {
                available_slots.push(slot);
            }
        }

        Doctor {
            id,
            name,
            available_slots,
        }
    }

    /// Open slots in current order.
    pub fn available_slots(&self) -> &[String] {
        &self.available_slots
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.available_slots.iter().any(|s| s == slot)
    }

    /// Remove a slot from the open list. Returns false if it was not open.
    pub(crate) fn take_slot(&mut self, slot: &str) -> bool {
        match self.available_slots.iter().position(|s| s == slot) {
            Some(index) => {
                self.available_slots.remove(index);
                true
            }
            None => false,
        }
    }

    /// Put a slot back at the end of the open list.
    pub(crate) fn release_slot(&mut self, slot: String) {
        if !self.has_slot(&slot) {
            self.available_slots.push(slot);
        }
    }
}

impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A booked appointment.
///
/// The doctor is referenced by id; the ledger owns the `Doctor` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub appointment_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub time_slot: String,
    pub booked_at: DateTime<Local>,
}

impl Appointment {
    /// Create a new appointment with validation.
    ///
    /// Patient id and name are trimmed before they are checked and stored.
    pub fn new(
        patient_id: &str,
        patient_name: &str,
        doctor_id: &str,
        time_slot: &str,
    ) -> LedgerResult<Self> {
        let patient_id = patient_id.trim();
        let patient_name = patient_name.trim();

        if patient_id.is_empty() {
            return Err(LedgerError::validation("Patient ID cannot be empty"));
        }
        if patient_name.is_empty() {
            return Err(LedgerError::validation("Patient name cannot be empty"));
        }
        if doctor_id.is_empty() {
            return Err(LedgerError::validation("Please select a doctor"));
        }
        if time_slot.is_empty() {
            return Err(LedgerError::validation("Please select a time slot"));
        }

        Ok(Appointment {
            appointment_id: Uuid::new_v4().to_string(),
            patient_id: patient_id.to_string(),
            patient_name: patient_name.to_string(),
            doctor_id: doctor_id.to_string(),
            time_slot: time_slot.to_string(),
            booked_at: Local::now(),
        })
    }

    /// Case-insensitive patient id match, compared one character at a time.
    pub fn belongs_to(&self, patient_id: &str) -> bool {
        self.patient_id.chars().count() == patient_id.chars().count()
            && self
                .patient_id
                .chars()
                .zip(patient_id.chars())
                .all(|(a, b)| chars_eq_ignore_case(a, b))
    }
}

/// Two chars match if they are equal after folding to upper case, or
/// after folding that upper-case form back to lower case.
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let (ua, ub) = (simple_upper(a), simple_upper(b));
    ua == ub || simple_lower(ua) == simple_lower(ub)
}

// Single-char mappings only; multi-char expansions such as 'ß' -> "SS" keep the char.
fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

// 'İ' lowers to "i\u{307}"; its leading 'i' is the single-char mapping.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// What the appointment list shows for one booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentSummary {
    pub patient_name: String,
    pub doctor_name: String,
    pub time_slot: String,
}

impl std::fmt::Display for AppointmentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} booked with {} at {}",
            self.patient_name, self.doctor_name, self.time_slot
        )
    }
}
