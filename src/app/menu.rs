//! Interactive text menu over a [`CarPark`].
//!
//! The session reads whole lines from any `BufRead` and writes prompts and
//! results to any `Write`, so it runs the same on a terminal and in tests.
//! Input is validated and upper-cased here before the core sees it.

use crate::app::report;
use crate::core::engine::CarPark;
use crate::domain::model::SlotKind;
use crate::domain::ports::Clock;
use crate::utils::error::{ParkingError, Result};
use crate::utils::validation::{self, MAX_SLOTS_PER_KIND};
use std::io::{BufRead, Write};

const MENU: &str = "\nMenu:\n\
1. Add a parking slot\n\
2. Delete a parking slot\n\
3. List all slots\n\
4. Delete all unoccupied parking slots\n\
5. Park a car into a slot\n\
6. Find a car by registration number\n\
7. Remove a car by registration number\n\
8. Exit\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddSlot,
    DeleteSlot,
    ListSlots,
    DeleteUnoccupied,
    Park,
    Find,
    Remove,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddSlot),
            "2" => Some(MenuChoice::DeleteSlot),
            "3" => Some(MenuChoice::ListSlots),
            "4" => Some(MenuChoice::DeleteUnoccupied),
            "5" => Some(MenuChoice::Park),
            "6" => Some(MenuChoice::Find),
            "7" => Some(MenuChoice::Remove),
            "8" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub struct MenuSession<R, W, C> {
    input: R,
    output: W,
    clock: C,
    car_park: CarPark,
}

impl<R: BufRead, W: Write, C: Clock> MenuSession<R, W, C> {
    pub fn new(input: R, output: W, clock: C, car_park: CarPark) -> Self {
        Self {
            input,
            output,
            clock,
            car_park,
        }
    }

    pub fn car_park(&self) -> &CarPark {
        &self.car_park
    }

    pub fn into_car_park(self) -> CarPark {
        self.car_park
    }

    /// Replaces the inventory with freshly seeded slots, keeping the fee schedule.
    pub fn reseed(&mut self, staff: usize, visitor: usize) {
        self.car_park = CarPark::with_counts(staff, visitor, *self.car_park.fee_schedule());
    }

    /// Asks for whichever counts are not already known. `None` means input ended.
    pub fn prompt_slot_counts(
        &mut self,
        staff: Option<usize>,
        visitor: Option<usize>,
    ) -> Result<Option<(usize, usize)>> {
        let staff = match staff {
            Some(n) => n,
            None => match self.prompt_count("Enter number of staff slots: ")? {
                Some(n) => n,
                None => return Ok(None),
            },
        };
        let visitor = match visitor {
            Some(n) => n,
            None => match self.prompt_count("Enter number of visitor slots: ")? {
                Some(n) => n,
                None => return Ok(None),
            },
        };
        Ok(Some((staff, visitor)))
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                tracing::debug!("Input closed, ending session");
                return Ok(());
            };

            let finished = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Program end!")?;
                    return Ok(());
                }
                Some(choice) => self.dispatch(choice)?,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    false
                }
            };
            if finished {
                return Ok(());
            }
        }
    }

    /// Returns `true` when input ran out mid-action.
    fn dispatch(&mut self, choice: MenuChoice) -> Result<bool> {
        let completed = match choice {
            MenuChoice::AddSlot => self.add_slot()?,
            MenuChoice::DeleteSlot => self.delete_slot()?,
            MenuChoice::ListSlots => {
                let listing = report::render_listing(&self.car_park, self.clock.now());
                write!(self.output, "\n{}", listing)?;
                Some(())
            }
            MenuChoice::DeleteUnoccupied => {
                let removed = self.car_park.remove_all_unoccupied();
                writeln!(
                    self.output,
                    "All unoccupied parking slots have been deleted ({} removed).",
                    removed
                )?;
                Some(())
            }
            MenuChoice::Park => self.park()?,
            MenuChoice::Find => self.find()?,
            MenuChoice::Remove => self.remove()?,
            MenuChoice::Exit => Some(()),
        };
        Ok(completed.is_none())
    }

    fn add_slot(&mut self) -> Result<Option<()>> {
        let Some(id) = self.prompt_valid(
            "Enter slot ID (e.g., S01 or V01): ",
            validation::validate_slot_id,
        )?
        else {
            return Ok(None);
        };
        let Some(kind_text) = self.prompt("Enter slot type (staff/visitor): ")? else {
            return Ok(None);
        };
        let Ok(kind) = kind_text.parse::<SlotKind>() else {
            writeln!(
                self.output,
                "Invalid slot type. Must be either 'staff' or 'visitor'."
            )?;
            return Ok(Some(()));
        };

        match self.car_park.add_slot(&id, kind) {
            Ok(()) => writeln!(self.output, "Parking slot added successfully.")?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Some(()))
    }

    fn delete_slot(&mut self) -> Result<Option<()>> {
        let Some(id) = self.prompt("Enter slot ID to delete: ")? else {
            return Ok(None);
        };
        let id = id.trim().to_ascii_uppercase();

        match self.car_park.remove_slot(&id) {
            Ok(()) => writeln!(self.output, "Parking slot deleted successfully.")?,
            Err(ParkingError::SlotOccupied { id }) => writeln!(
                self.output,
                "Slot {} is currently occupied and cannot be deleted.",
                id
            )?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Some(()))
    }

    fn park(&mut self) -> Result<Option<()>> {
        let Some(slot_id) =
            self.prompt_valid("Enter slot ID to park in: ", validation::validate_slot_id)?
        else {
            return Ok(None);
        };

        // Fail early before asking for car details.
        let rejected = match self.car_park.registry().find_by_id(&slot_id) {
            Ok(slot) if slot.is_occupied() => Some(ParkingError::SlotOccupied {
                id: slot.id().to_string(),
            }),
            Ok(_) => None,
            Err(e) => Some(e),
        };
        if let Some(e) = rejected {
            self.report_error(&e)?;
            return Ok(Some(()));
        }

        let Some(registration) = self.prompt_registration()? else {
            return Ok(None);
        };
        let Some(owner_name) = self.prompt_valid(
            "Enter car owner name: ",
            validation::validate_owner_name,
        )?
        else {
            return Ok(None);
        };
        let Some(answer) = self.prompt("Is the owner a staff member? (yes/no): ")? else {
            return Ok(None);
        };
        let owner_kind = if answer.trim().eq_ignore_ascii_case("yes") {
            SlotKind::Staff
        } else {
            SlotKind::Visitor
        };

        let now = self.clock.now();
        match self
            .car_park
            .park(&slot_id, &registration, &owner_name, owner_kind, now)
        {
            Ok(receipt) => writeln!(
                self.output,
                "Car {} parked successfully in slot {} at {}",
                registration,
                receipt.slot_id,
                report::format_timestamp(receipt.parked_at)
            )?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Some(()))
    }

    fn find(&mut self) -> Result<Option<()>> {
        let Some(registration) = self.prompt_registration()? else {
            return Ok(None);
        };

        match self.car_park.find(&registration, self.clock.now()) {
            Ok(location) => {
                writeln!(
                    self.output,
                    "Car found in slot: {}, Owner: {}",
                    location.slot_id, location.owner_name
                )?;
                writeln!(
                    self.output,
                    "Parked Time: {}",
                    report::format_elapsed(&location.elapsed)
                )?;
                writeln!(
                    self.output,
                    "Parking Fee: {}",
                    report::format_fee(location.fee)
                )?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Some(()))
    }

    fn remove(&mut self) -> Result<Option<()>> {
        let Some(registration) = self.prompt_registration()? else {
            return Ok(None);
        };

        match self.car_park.remove(&registration) {
            Ok(slot_id) => writeln!(
                self.output,
                "Car removed successfully from slot {}.",
                slot_id
            )?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Some(()))
    }

    fn prompt_registration(&mut self) -> Result<Option<String>> {
        self.prompt_valid(
            "Enter car registration number (e.g., T2345): ",
            validation::validate_registration,
        )
    }

    fn prompt_count(&mut self, text: &str) -> Result<Option<usize>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(n) if n <= MAX_SLOTS_PER_KIND => return Ok(Some(n)),
                _ => writeln!(
                    self.output,
                    "Please enter a whole number between 0 and {}.",
                    MAX_SLOTS_PER_KIND
                )?,
            }
        }
    }

    /// Re-prompts until `validate` accepts the line.
    fn prompt_valid<F>(&mut self, text: &str, validate: F) -> Result<Option<String>>
    where
        F: Fn(&str) -> Result<String>,
    {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match validate(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{}", e.user_friendly_message())?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report_error(&mut self, error: &ParkingError) -> Result<()> {
        tracing::debug!("Operation failed: {} ({:?})", error, error.category());
        writeln!(self.output, "{}", error.user_friendly_message())?;
        Ok(())
    }
}
