//! Line-oriented console input with prompts.

use std::io::{BufRead, Write};

use super::{InputSource, validate_registration_number};
use crate::domain::VehicleType;
use crate::error::ParkingError;

/// Reads answers line by line from `reader`, writing a prompt to `writer`
/// before each question.
///
/// The shell binary wraps stdin/stdout; tests wrap in-memory buffers.
#[derive(Debug)]
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead + Send, W: Write + Send> ConsoleInput<R, W> {
    /// Creates a console input over the given reader and writer.
    #[must_use]
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consumes the console, returning the reader and writer.
    #[must_use]
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Writes a line of output to the console.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::Internal`] if the writer fails.
    pub fn say(&mut self, message: &str) -> Result<(), ParkingError> {
        writeln!(self.writer, "{message}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| ParkingError::Internal(format!("console write failed: {e}")))
    }

    /// Reads one line, without its trailing newline.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidInput`] if the reader fails.
    pub fn read_line(&mut self) -> Result<Option<String>, ParkingError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| ParkingError::InvalidInput(format!("error reading input: {e}")))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Reads a numeric menu choice.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidInput`] at end of input or when the
    /// line is not a number.
    pub fn read_selection(&mut self) -> Result<i32, ParkingError> {
        let Some(line) = self.read_line()? else {
            return Err(ParkingError::InvalidInput("input closed".to_string()));
        };
        line.trim().parse().map_err(|_| {
            tracing::warn!(input = %line, "non-numeric selection");
            ParkingError::InvalidInput(format!("{line:?} is not a valid number"))
        })
    }
}

impl<R: BufRead + Send, W: Write + Send> InputSource for ConsoleInput<R, W> {
    fn read_vehicle_type_selection(&mut self) -> Result<VehicleType, ParkingError> {
        self.say("Please select vehicle type from menu")?;
        self.say("1 CAR")?;
        self.say("2 BIKE")?;
        let selection = self.read_selection()?;
        VehicleType::from_selection(selection)
    }

    fn read_registration_number(&mut self) -> Result<String, ParkingError> {
        self.say("Please type the vehicle registration number and press enter key")?;
        let Some(line) = self.read_line()? else {
            return Err(ParkingError::InvalidInput("input closed".to_string()));
        };
        validate_registration_number(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> ConsoleInput<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleInput::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_selection_then_registration() {
        let mut input = console("2\nAB-123-CD\n");
        assert_eq!(
            input.read_vehicle_type_selection().ok(),
            Some(VehicleType::Bike)
        );
        assert_eq!(
            input.read_registration_number().ok().as_deref(),
            Some("AB-123-CD")
        );
    }

    #[test]
    fn prompts_are_written_before_reading() {
        let mut input = console("1\n");
        let _ = input.read_vehicle_type_selection();
        let written = String::from_utf8(input.writer.clone()).unwrap_or_default();
        assert!(written.contains("1 CAR"));
        assert!(written.contains("2 BIKE"));
    }

    #[test]
    fn out_of_menu_selection_is_invalid_vehicle_type() {
        let mut input = console("3\n");
        assert!(matches!(
            input.read_vehicle_type_selection(),
            Err(ParkingError::InvalidVehicleType(_))
        ));
    }

    #[test]
    fn non_numeric_selection_is_invalid_input() {
        let mut input = console("car please\n");
        assert!(matches!(
            input.read_vehicle_type_selection(),
            Err(ParkingError::InvalidInput(_))
        ));
    }

    #[test]
    fn blank_registration_is_rejected() {
        let mut input = console("   \n");
        assert!(input.read_registration_number().is_err());
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = console("");
        assert!(input.read_registration_number().is_err());
        assert!(input.read_selection().is_err());
    }
}
