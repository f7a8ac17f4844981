//! Menu loop.
//!
//! Generic over the input and output streams so a whole session can be driven
//! from memory.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use bestbuy_core::{DomainError, ProductId};
use bestbuy_store::{OrderLine, Store};

const SEPARATOR: &str = "------";

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListProducts,
    ShowTotal,
    MakeOrder,
    Quit,
}

impl MenuChoice {
    /// Parses the number typed at the menu prompt.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().parse::<u8>().ok()? {
            1 => Some(MenuChoice::ListProducts),
            2 => Some(MenuChoice::ShowTotal),
            3 => Some(MenuChoice::MakeOrder),
            4 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Outcome of asking for one order line.
enum LinePrompt {
    Line(OrderLine),
    Skip,
    Done,
}

pub struct Menu<R, W> {
    store: Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn into_parts(self) -> (Store, R, W) {
        (self.store, self.input, self.output)
    }

    /// Runs until the user quits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(raw) = self.prompt("Please choose a number: ")? else {
                debug!("input closed at menu prompt");
                return Ok(());
            };

            let choice = MenuChoice::parse(&raw);
            debug!(?choice, "menu choice");
            match choice {
                Some(MenuChoice::ListProducts) => {
                    self.list_products()?;
                }
                Some(MenuChoice::ShowTotal) => self.show_total()?,
                Some(MenuChoice::MakeOrder) => self.make_order()?,
                Some(MenuChoice::Quit) => {
                    writeln!(self.output, "Have a nice day!")?;
                    return Ok(());
                }
                None => writeln!(self.output, "Enter a number between 1 and 4.")?,
            }
            writeln!(self.output)?;
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "   Store Menu")?;
        writeln!(self.output, "   ----------")?;
        writeln!(self.output, "1. List all products in store")?;
        writeln!(self.output, "2. Show total amount in store")?;
        writeln!(self.output, "3. Make an order")?;
        writeln!(self.output, "4. Quit")
    }

    /// Writes `label`, then reads one line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints the numbered active products and returns their ids in the
    /// same order.
    fn list_products(&mut self) -> io::Result<Vec<ProductId>> {
        let listed: Vec<(ProductId, String)> = self
            .store
            .active_products()
            .into_iter()
            .map(|p| (p.id_typed(), p.show()))
            .collect();

        writeln!(self.output, "{SEPARATOR}")?;
        for (number, (_, line)) in listed.iter().enumerate() {
            writeln!(self.output, "{}. {line}", number + 1)?;
        }
        writeln!(self.output, "{SEPARATOR}")?;

        Ok(listed.into_iter().map(|(id, _)| id).collect())
    }

    fn show_total(&mut self) -> io::Result<()> {
        writeln!(self.output, "Total of {} in store.", self.store.total_quantity())
    }

    fn make_order(&mut self) -> io::Result<()> {
        let listed = self.list_products()?;
        writeln!(self.output, "When you want to finish order, enter empty text.")?;

        let mut lines: Vec<OrderLine> = Vec::new();
        let mut pending: HashMap<ProductId, i64> = HashMap::new();

        loop {
            match self.prompt_line(&listed, &pending)? {
                LinePrompt::Line(line) => {
                    *pending.entry(line.product_id).or_insert(0) += line.quantity;
                    lines.push(line);
                    writeln!(self.output, "Product added to list!")?;
                }
                LinePrompt::Skip => continue,
                LinePrompt::Done => break,
            }
        }

        match self.store.order(&lines) {
            Ok(total) => {
                info!(lines = lines.len(), total, "order placed");
                writeln!(self.output, "Order made! Total payment: ${total:.2}")
            }
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "order rejected");
                writeln!(self.output, "Order failed: {}", err.message())
            }
        }
    }

    fn prompt_line(
        &mut self,
        listed: &[ProductId],
        pending: &HashMap<ProductId, i64>,
    ) -> io::Result<LinePrompt> {
        let raw = match self.prompt("Which product number do you want? ")? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(LinePrompt::Done),
        };
        let Ok(number) = raw.parse::<usize>() else {
            writeln!(self.output, "Invalid input.")?;
            return Ok(LinePrompt::Skip);
        };
        let Some(product_id) = number.checked_sub(1).and_then(|i| listed.get(i)).copied() else {
            writeln!(self.output, "Invalid input. Pick a number from the list.")?;
            return Ok(LinePrompt::Skip);
        };

        let raw = match self.prompt("Which amount do you want? ")? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(LinePrompt::Done),
        };
        let Ok(quantity) = raw.parse::<i64>() else {
            writeln!(self.output, "Invalid input.")?;
            return Ok(LinePrompt::Skip);
        };

        let line = OrderLine::new(product_id, quantity);
        // The combined line adds what this order already holds for the product.
        let already = pending.get(&product_id).copied().unwrap_or(0);
        let combined = OrderLine::new(product_id, already.saturating_add(quantity));
        let checked = self
            .store
            .check_line(&line)
            .and_then(|()| self.store.check_line(&combined));
        if let Err(err) = checked {
            self.reject_line(&err)?;
            return Ok(LinePrompt::Skip);
        }

        Ok(LinePrompt::Line(line))
    }

    fn reject_line(&mut self, err: &DomainError) -> io::Result<()> {
        debug!(error = %err, "order line rejected");
        writeln!(self.output, "Product was not added: {}", err.message())
    }
}
