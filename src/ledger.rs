/// Booking ledger: the doctor roster and the list of booked appointments.
///
/// All mutation goes through `book` and `cancel`. Both either succeed
/// completely or leave the ledger untouched.
use tracing::{debug, info, warn};

use crate::config;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Appointment, AppointmentSummary, Doctor};

#[derive(Debug, Clone)]
pub struct BookingLedger {
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
}

impl BookingLedger {
    /// Create a ledger over the given doctors with no appointments.
    pub fn new(doctors: Vec<Doctor>) -> Self {
        debug!(doctors = doctors.len(), "ledger seeded");
        BookingLedger {
            doctors,
            appointments: Vec::new(),
        }
    }

    /// Create a ledger over the fixed seed roster.
    pub fn seeded() -> Self {
        Self::new(config::seed_doctors())
    }

    /// All doctors in seed order.
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn find_doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    fn find_doctor_mut(&mut self, doctor_id: &str) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| d.id == doctor_id)
    }

    /// Open slots for a doctor in current order.
    pub fn available_slots(&self, doctor_id: &str) -> LedgerResult<&[String]> {
        self.find_doctor(doctor_id)
            .map(Doctor::available_slots)
            .ok_or_else(|| LedgerError::not_found(format!("Doctor not found: {}", doctor_id)))
    }

    /// Raw appointments in booking order.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Book `time_slot` with `doctor_id` for a patient.
    pub fn book(
        &mut self,
        patient_id: &str,
        patient_name: &str,
        doctor_id: &str,
        time_slot: &str,
    ) -> LedgerResult<Appointment> {
        let appointment = Appointment::new(patient_id, patient_name, doctor_id, time_slot)
            .map_err(|e| {
                warn!(error = %e, "booking rejected");
                e
            })?;

        let doctor = match self.find_doctor_mut(doctor_id) {
            Some(doctor) => doctor,
            None => {
                warn!(doctor_id, "booking rejected: unknown doctor");
                return Err(LedgerError::validation(format!(
                    "Doctor not found: {}",
                    doctor_id
                )));
            }
        };

        if !doctor.take_slot(time_slot) {
            warn!(doctor_id, time_slot, "booking rejected: slot not available");
            return Err(LedgerError::validation(format!(
                "Time slot {} is not available for {}",
                time_slot, doctor.name
            )));
        }

        info!(
            appointment_id = %appointment.appointment_id,
            patient_id = %appointment.patient_id,
            doctor_id,
            time_slot,
            "appointment booked"
        );
        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Cancel the first appointment booked under `patient_id`.
    ///
    /// Matching ignores case. The freed slot goes to the end of the
    /// doctor's open list.
    pub fn cancel(&mut self, patient_id: &str) -> LedgerResult<Appointment> {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            warn!("cancellation rejected: empty patient id");
            return Err(LedgerError::validation("Patient ID cannot be empty"));
        }

        let index = match self
            .appointments
            .iter()
            .position(|apt| apt.belongs_to(patient_id))
        {
            Some(index) => index,
            None => {
                warn!(patient_id, "cancellation found no appointment");
                return Err(LedgerError::not_found(
                    "No appointment found for the given Patient ID.",
                ));
            }
        };

        let appointment = self.appointments.remove(index);
        if let Some(doctor) = self.find_doctor_mut(&appointment.doctor_id) {
            doctor.release_slot(appointment.time_slot.clone());
        }

        info!(
            appointment_id = %appointment.appointment_id,
            patient_id = %appointment.patient_id,
            doctor_id = %appointment.doctor_id,
            time_slot = %appointment.time_slot,
            "appointment cancelled"
        );
        Ok(appointment)
    }

    /// Appointments in booking order, resolved against the doctor roster.
    pub fn list_appointments(&self) -> Vec<AppointmentSummary> {
        self.appointments
            .iter()
            .map(|apt| AppointmentSummary {
                patient_name: apt.patient_name.clone(),
                doctor_name: self
                    .find_doctor(&apt.doctor_id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| apt.doctor_id.clone()),
                time_slot: apt.time_slot.clone(),
            })
            .collect()
    }
}

impl std::fmt::Display for BookingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BookingLedger(doctors={}, appointments={})",
            self.doctors.len(),
            self.appointments.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(ledger: &BookingLedger) -> Vec<String> {
        ledger
            .list_appointments()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn book_then_cancel_scenario() {
        let mut ledger = BookingLedger::seeded();

        ledger.book("P1", "Alice", "D101", "10AM").unwrap();
        assert_eq!(ledger.available_slots("D101").unwrap(), ["11AM", "12PM"]);
        assert_eq!(lines(&ledger), ["Alice booked with Dr. Mehta at 10AM"]);

        let cancelled = ledger.cancel("p1").unwrap();
        assert_eq!(cancelled.patient_name, "Alice");
        assert_eq!(cancelled.time_slot, "10AM");
        assert_eq!(
            ledger.available_slots("D101").unwrap(),
            ["11AM", "12PM", "10AM"]
        );
        assert!(lines(&ledger).is_empty());
    }

    #[test]
    fn booked_slot_is_hidden_until_cancelled() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("P2", "Bob", "D102", "3PM").unwrap();
        assert!(!ledger.available_slots("D102").unwrap().contains(&"3PM".to_string()));

        ledger.cancel("P2").unwrap();
        assert!(ledger.available_slots("D102").unwrap().contains(&"3PM".to_string()));
    }

    #[test]
    fn book_cancel_restores_slot_set_and_count() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("P9", "Zed", "D103", "9AM").unwrap();

        let mut before: Vec<String> = ledger.available_slots("D103").unwrap().to_vec();
        let count_before = ledger.appointments().len();

        ledger.book("P1", "Alice", "D103", "1PM").unwrap();
        ledger.cancel("P1").unwrap();

        let mut after: Vec<String> = ledger.available_slots("D103").unwrap().to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(ledger.appointments().len(), count_before);
    }

    #[test]
    fn taken_slot_is_rejected_without_mutation() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("P1", "Alice", "D101", "10AM").unwrap();

        let err = ledger.book("P2", "Bob", "D101", "10AM").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(ledger.appointments().len(), 1);
        assert_eq!(ledger.available_slots("D101").unwrap(), ["11AM", "12PM"]);
    }

    #[test]
    fn slot_of_another_doctor_is_rejected() {
        let mut ledger = BookingLedger::seeded();
        let err = ledger.book("P1", "Alice", "D101", "2PM").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(ledger.available_slots("D102").unwrap(), ["2PM", "3PM", "4PM"]);
    }

    #[test]
    fn unknown_doctor_is_a_validation_error() {
        let mut ledger = BookingLedger::seeded();
        let err = ledger.book("P1", "Alice", "D999", "10AM").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(ledger.appointments().is_empty());
    }

    #[test]
    fn empty_fields_are_rejected_without_mutation() {
        let mut ledger = BookingLedger::seeded();
        assert!(ledger.book("", "Alice", "D101", "10AM").is_err());
        assert!(ledger.book("P1", "  ", "D101", "10AM").is_err());
        assert!(ledger.book("P1", "Alice", "", "10AM").is_err());
        assert!(ledger.book("P1", "Alice", "D101", "").is_err());

        assert!(ledger.appointments().is_empty());
        assert_eq!(
            ledger.available_slots("D101").unwrap(),
            ["10AM", "11AM", "12PM"]
        );
    }

    #[test]
    fn cancel_unknown_patient_is_not_found() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("P1", "Alice", "D101", "10AM").unwrap();

        let err = ledger.cancel("P404").unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert_eq!(ledger.appointments().len(), 1);
        assert_eq!(ledger.available_slots("D101").unwrap(), ["11AM", "12PM"]);
    }

    #[test]
    fn cancel_is_case_insensitive() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("p1", "Alice", "D101", "10AM").unwrap();
        assert!(ledger.cancel("P1").is_ok());

        ledger.book("i1", "Ivan", "D103", "9AM").unwrap();
        let cancelled = ledger.cancel("\u{130}1").unwrap();
        assert_eq!(cancelled.patient_name, "Ivan");
        assert_eq!(ledger.available_slots("D103").unwrap(), ["1PM", "5PM", "9AM"]);
    }

    #[test]
    fn cancel_with_blank_id_is_rejected() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("P1", "Alice", "D101", "10AM").unwrap();
        let err = ledger.cancel("   ").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(ledger.appointments().len(), 1);
    }

    #[test]
    fn cancel_removes_only_the_first_match() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("P1", "Alice", "D101", "10AM").unwrap();
        ledger.book("P1", "Alice", "D102", "2PM").unwrap();

        let cancelled = ledger.cancel("P1").unwrap();
        assert_eq!(cancelled.doctor_id, "D101");
        assert_eq!(lines(&ledger), ["Alice booked with Dr. Sharma at 2PM"]);
        assert_eq!(ledger.available_slots("D102").unwrap(), ["3PM", "4PM"]);
    }

    #[test]
    fn list_keeps_booking_order() {
        let mut ledger = BookingLedger::seeded();
        ledger.book("P3", "Carol", "D103", "5PM").unwrap();
        ledger.book("P1", "Alice", "D101", "12PM").unwrap();
        ledger.book("P2", "Bob", "D102", "2PM").unwrap();

        assert_eq!(
            lines(&ledger),
            [
                "Carol booked with Dr. Verma at 5PM",
                "Alice booked with Dr. Mehta at 12PM",
                "Bob booked with Dr. Sharma at 2PM",
            ]
        );
    }

    #[test]
    fn slots_never_contain_duplicates() {
        let mut ledger = BookingLedger::seeded();
        for slot in ["10AM", "11AM", "12PM"] {
            ledger.book("P1", "Alice", "D101", slot).unwrap();
        }
        assert!(ledger.available_slots("D101").unwrap().is_empty());
        for _ in 0..3 {
            ledger.cancel("P1").unwrap();
        }

        let slots = ledger.available_slots("D101").unwrap().to_vec();
        assert_eq!(slots, ["10AM", "11AM", "12PM"]);
        let mut deduped = slots.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), slots.len());
    }

    #[test]
    fn available_slots_for_unknown_doctor() {
        let ledger = BookingLedger::seeded();
        assert!(matches!(
            ledger.available_slots("D000"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn doctors_keep_seed_order() {
        let ledger = BookingLedger::seeded();
        let ids: Vec<&str> = ledger.doctors().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["D101", "D102", "D103"]);
        assert_eq!(ledger.to_string(), "BookingLedger(doctors=3, appointments=0)");
    }
}
