//! Interactive text shell: ask for a number of generations, run them, then
//! offer the display menu.

use crate::ecosystem::Ecosystem;
use crate::habitat::Habitat;
use std::io::{self, BufRead, Write};

/// Print the number of organisms in each habitat
pub fn print_wildlife_totals<W: Write>(ecosystem: &Ecosystem, out: &mut W) -> io::Result<()> {
    for (name, count) in ecosystem.wildlife_totals() {
        writeln!(out, "{}:  {}", name, count)?;
    }
    Ok(())
}

/// Print every organism living in a habitat
pub fn print_wildlife<W: Write>(habitat: &Habitat, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}:", habitat.name)?;
    for organism in habitat.wildlife() {
        writeln!(out, "  {}", organism)?;
    }
    Ok(())
}

/// Menu-driven front end over any input/output pair
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user enters 0 at the generations prompt or input ends
    pub fn run(&mut self, ecosystem: &mut Ecosystem) -> io::Result<()> {
        writeln!(self.output, "Evolution Simulator\n")?;

        loop {
            writeln!(self.output, "\nHow many generations would you like to progress?")?;
            writeln!(self.output, "Type 0 to quit.")?;
            let Some(generations) = self.read_number("Enter choice: ")? else {
                return Ok(());
            };
            if generations == 0 {
                return Ok(());
            }

            ecosystem.run(generations);
            log::info!("Advanced to generation {}", ecosystem.generation);
            if ecosystem.is_extinct() {
                writeln!(self.output, "\nEvery habitat is empty: life has died out.")?;
            }

            if !self.display_menu(ecosystem)? {
                return Ok(());
            }
        }
    }

    /// Returns false when input ended
    fn display_menu(&mut self, ecosystem: &Ecosystem) -> io::Result<bool> {
        loop {
            writeln!(self.output, "\nChoose one of the following:")?;
            writeln!(self.output, "0 - Back to generations.")?;
            writeln!(self.output, "1 - Print number of organisms in each habitat.")?;
            writeln!(self.output, "2 - Print wildlife in each habitat.")?;

            let Some(choice) = self.read_number("Enter selection: ")? else {
                return Ok(false);
            };
            match choice {
                0 => return Ok(true),
                1 => {
                    writeln!(self.output, "\nTotal Wildlife in Each Habitat: ")?;
                    print_wildlife_totals(ecosystem, &mut self.output)?;
                }
                2 => {
                    writeln!(self.output, "\nOrganisms in Each Habitat: ")?;
                    for habitat in &ecosystem.habitats {
                        print_wildlife(habitat, &mut self.output)?;
                    }
                }
                _ => writeln!(self.output, "Unknown selection: {}", choice)?,
            }
        }
    }

    /// Prompt until a whole number is entered. `None` at end of input.
    fn read_number(&mut self, prompt: &str) -> io::Result<Option<u64>> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim().parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }
}
