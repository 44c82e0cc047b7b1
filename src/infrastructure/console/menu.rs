//! Numbered-choice schema menu.

use std::io::{self, BufRead, ErrorKind, Write};

/// Prints a 1-based menu of `schemas` and loops until a line parses as an
/// in-range number. The only exit without a choice is end of input.
pub fn select_schema<R: BufRead, W: Write>(
    schemas: &[String],
    input: &mut R,
    output: &mut W,
) -> io::Result<String> {
    writeln!(output, "\nPlease select a schema to export:")?;
    for (i, schema) in schemas.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, schema)?;
    }

    loop {
        write!(output, "Enter the number of the schema: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                "input closed before a schema was chosen",
            ));
        }

        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=schemas.len()).contains(&choice) => {
                return Ok(schemas[choice - 1].clone());
            }
            Ok(_) => writeln!(output, "Invalid number. Please try again.")?,
            Err(_) => writeln!(output, "Invalid input. Please enter a number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn schemas() -> Vec<String> {
        vec!["FINANCE".to_string(), "HR".to_string(), "SALES".to_string()]
    }

    #[test]
    fn accepts_a_valid_first_choice() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let choice = select_schema(&schemas(), &mut input, &mut output).unwrap();
        assert_eq!(choice, "HR");

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("1. FINANCE"));
        assert!(rendered.contains("2. HR"));
        assert!(rendered.contains("3. SALES"));
    }

    #[test]
    fn accepts_the_boundary_indices() {
        let mut output = Vec::new();
        let first = select_schema(&schemas(), &mut Cursor::new("1\n"), &mut output).unwrap();
        assert_eq!(first, "FINANCE");
        let last = select_schema(&schemas(), &mut Cursor::new("3\n"), &mut output).unwrap();
        assert_eq!(last, "SALES");
    }

    #[test]
    fn rejects_everything_else_until_a_valid_choice() {
        // non-numeric, zero, negative, beyond the count, then valid
        let mut input = Cursor::new("abc\n0\n-1\n4\n3\n");
        let mut output = Vec::new();
        let choice = select_schema(&schemas(), &mut input, &mut output).unwrap();
        assert_eq!(choice, "SALES");

        let rendered = String::from_utf8(output).unwrap();
        // "abc" and "-1" fail to parse, "0" and "4" fail the range check
        assert_eq!(rendered.matches("Invalid input").count(), 2);
        assert_eq!(rendered.matches("Invalid number").count(), 2);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let mut input = Cursor::new("  2  \n");
        let mut output = Vec::new();
        let choice = select_schema(&schemas(), &mut input, &mut output).unwrap();
        assert_eq!(choice, "HR");
    }

    #[test]
    fn end_of_input_is_an_error_not_a_choice() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let err = select_schema(&schemas(), &mut input, &mut output).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }
}
