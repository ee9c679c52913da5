/// Command-line interface for the doctor appointment booking system.
///
/// This module provides an interactive menu for listing doctors, viewing
/// open slots, booking and cancelling appointments, and viewing the
/// current bookings.
mod config;
mod error;
mod ledger;
mod models;

use std::io::{self, BufRead, Write};

use ledger::BookingLedger;
use tracing_subscriber::EnvFilter;

struct BookingCli<R, W> {
    ledger: BookingLedger,
    input: R,
    output: W,
    running: bool,
}

impl<R: BufRead, W: Write> BookingCli<R, W> {
    fn new(ledger: BookingLedger, input: R, output: W) -> Self {
        BookingCli {
            ledger,
            input,
            output,
            running: true,
        }
    }

    fn print_header(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(60))?;
        writeln!(self.output, "       {}", config::APP_NAME.to_uppercase())?;
        writeln!(self.output, "{}", "=".repeat(60))
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Main Menu ---")?;
        writeln!(self.output, "1. List doctors")?;
        writeln!(self.output, "2. View available slots")?;
        writeln!(self.output, "3. Book appointment")?;
        writeln!(self.output, "4. Cancel appointment")?;
        writeln!(self.output, "5. View appointments")?;
        writeln!(self.output, "6. Exit")?;
        writeln!(self.output, "{}", "-".repeat(20))
    }

    /// Prompt and read one trimmed line. `None` means end of input.
    fn get_input(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Pick one entry of a numbered list. Outer `None` means end of input.
    fn get_choice(&mut self, prompt: &str, len: usize) -> io::Result<Option<Option<usize>>> {
        let Some(input) = self.get_input(prompt)? else {
            return Ok(None);
        };
        match input.parse::<usize>() {
            Ok(n) if n >= 1 && n <= len => Ok(Some(Some(n - 1))),
            _ => {
                writeln!(self.output, "Invalid choice")?;
                Ok(Some(None))
            }
        }
    }

    fn list_doctors(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Doctors ---")?;
        for (i, doctor) in self.ledger.doctors().iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, doctor)?;
        }
        Ok(())
    }

    /// Outer `None` means end of input. `Some("")` means the choice was
    /// invalid; otherwise the chosen doctor's id.
    fn select_doctor(&mut self) -> io::Result<Option<String>> {
        self.list_doctors()?;
        let count = self.ledger.doctors().len();
        let Some(choice) = self.get_choice("Select doctor", count)? else {
            return Ok(None);
        };
        Ok(Some(
            choice
                .map(|i| self.ledger.doctors()[i].id.clone())
                .unwrap_or_default(),
        ))
    }

    fn print_slots(&mut self, doctor_id: &str) -> io::Result<Vec<String>> {
        let slots = match self.ledger.available_slots(doctor_id) {
            Ok(slots) => slots.to_vec(),
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                return Ok(Vec::new());
            }
        };

        if slots.is_empty() {
            writeln!(self.output, "\nNo available time slots")?;
        } else {
            writeln!(self.output, "\n--- Available Slots ---")?;
            for (i, slot) in slots.iter().enumerate() {
                writeln!(self.output, "  {}. {}", i + 1, slot)?;
            }
        }
        Ok(slots)
    }

    fn view_available_slots(&mut self) -> io::Result<()> {
        let Some(doctor_id) = self.select_doctor()? else {
            self.running = false;
            return Ok(());
        };
        if !doctor_id.is_empty() {
            self.print_slots(&doctor_id)?;
        }
        Ok(())
    }

    fn view_appointments(&mut self) -> io::Result<()> {
        let summaries = self.ledger.list_appointments();
        if summaries.is_empty() {
            writeln!(self.output, "\nNo appointments booked")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "\n--- Appointments ({}) ---",
            self.ledger.appointments().len()
        )?;
        for summary in &summaries {
            writeln!(self.output, "  {}", summary)?;
        }
        Ok(())
    }

    fn book_appointment(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Book Appointment ---")?;

        let Some(patient_id) = self.get_input("Patient ID")? else {
            self.running = false;
            return Ok(());
        };
        let Some(patient_name) = self.get_input("Patient name")? else {
            self.running = false;
            return Ok(());
        };
        let Some(doctor_id) = self.select_doctor()? else {
            self.running = false;
            return Ok(());
        };

        // Slot choices are re-read after every doctor selection.
        let mut slot = String::new();
        if !doctor_id.is_empty() {
            let slots = self.print_slots(&doctor_id)?;
            if !slots.is_empty() {
                let Some(choice) = self.get_choice("Select slot", slots.len())? else {
                    self.running = false;
                    return Ok(());
                };
                if let Some(i) = choice {
                    slot = slots[i].clone();
                }
            }
        }

        match self
            .ledger
            .book(&patient_id, &patient_name, &doctor_id, &slot)
        {
            Ok(appointment) => {
                writeln!(self.output, "\nAppointment Booked Successfully!")?;
                writeln!(
                    self.output,
                    "Reference: {}... (booked {})",
                    &appointment.appointment_id[..8],
                    appointment.booked_at.format("%Y-%m-%d %H:%M")
                )?;
                self.view_appointments()?;
                self.print_slots(&appointment.doctor_id)?;
                Ok(())
            }
            Err(e) => writeln!(self.output, "\nError: {}", e),
        }
    }

    fn cancel_appointment(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Cancel Appointment ---")?;

        let Some(patient_id) = self.get_input("Enter Patient ID to cancel appointment")? else {
            self.running = false;
            return Ok(());
        };

        let freed_doctor = match self.ledger.cancel(&patient_id) {
            Ok(appointment) => {
                writeln!(self.output, "\nAppointment Cancelled Successfully.")?;
                writeln!(
                    self.output,
                    "Slot {} is now available again",
                    appointment.time_slot
                )?;
                Some(appointment.doctor_id)
            }
            Err(e) => {
                writeln!(self.output, "\n{}", e)?;
                None
            }
        };

        self.view_appointments()?;
        if let Some(doctor_id) = freed_doctor {
            self.print_slots(&doctor_id)?;
        }
        Ok(())
    }

    fn run(&mut self) -> io::Result<()> {
        self.print_header()?;

        while self.running {
            self.print_menu()?;

            let Some(choice) = self.get_input("Enter choice")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.list_doctors()?,
                "2" => self.view_available_slots()?,
                "3" => self.book_appointment()?,
                "4" => self.cancel_appointment()?,
                "5" => self.view_appointments()?,
                "6" => self.running = false,
                _ => writeln!(self.output, "Invalid choice")?,
            }
        }

        tracing::info!(ledger = %self.ledger, "session ended");
        writeln!(self.output, "\nGoodbye!")
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let stdin = io::stdin();
    let mut cli = BookingCli::new(BookingLedger::seeded(), stdin.lock(), io::stdout());
    if let Err(e) = cli.run() {
        tracing::error!(error = %e, "terminal I/O failed");
        std::process::exit(1);
    }
}
