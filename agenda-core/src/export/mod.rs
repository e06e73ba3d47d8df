//! Agenda export to PDF and ICS.

mod ics;
mod pdf;

pub use ics::generate_agenda_ics;
pub use pdf::{render_pdf, write_pdf};
