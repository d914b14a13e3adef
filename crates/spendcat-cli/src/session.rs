//! Interactive categorization session
//!
//! One cycle: read merchant and description, read a payment method until it
//! is valid, read an amount until it parses, categorize, show the result,
//! append it to the ledger, then ask whether to continue. Any failure after
//! input collection aborts only the current transaction.

use std::io::Write;

use spendcat_core::{parse_amount, Categorization, Categorizer, PaymentMethod, Transaction};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// User answered something other than `y` to a continue prompt
    Declined,
    /// Input stream closed
    InputClosed,
}

pub struct Session<R, W> {
    categorizer: Categorizer,
    input: R,
    out: W,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(categorizer: Categorizer, input: R, out: W) -> Self {
        Self {
            categorizer,
            input,
            out,
        }
    }

    pub async fn run(&mut self) -> std::io::Result<SessionEnd> {
        writeln!(self.out, "Personal Finance Transaction Categorizer")?;
        writeln!(self.out, "{}", "=".repeat(40))?;

        loop {
            let Some(transaction) = self.collect_transaction().await? else {
                return Ok(SessionEnd::InputClosed);
            };

            let question = match self.process(&transaction).await {
                Ok(_) => "\nEnter another transaction? (y/n): ",
                Err(e) => {
                    tracing::debug!(error = ?e, "Transaction failed");
                    writeln!(self.out, "\nError: {}", e)?;
                    "Try again? (y/n): "
                }
            };

            match self.read_line(question).await? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
                Some(_) => return Ok(SessionEnd::Declined),
                None => return Ok(SessionEnd::InputClosed),
            }
        }
    }

    /// Prompt for all transaction fields; `None` if input closes midway
    async fn collect_transaction(&mut self) -> std::io::Result<Option<Transaction>> {
        writeln!(self.out, "Enter transaction details:")?;

        let Some(merchant) = self.read_line("Merchant: ").await? else {
            return Ok(None);
        };
        let Some(description) = self.read_line("Description: ").await? else {
            return Ok(None);
        };

        let payment_method = loop {
            writeln!(
                self.out,
                "Valid payment methods: {}",
                PaymentMethod::accepted_list()
            )?;
            let Some(input) = self.read_line("Payment method: ").await? else {
                return Ok(None);
            };
            match input.parse::<PaymentMethod>() {
                Ok(method) => break method,
                Err(e) => writeln!(self.out, "Error: {}", e)?,
            }
        };

        let amount = loop {
            let Some(input) = self.read_line("Amount: $").await? else {
                return Ok(None);
            };
            match parse_amount(&input) {
                Ok(amount) => break amount,
                Err(_) => writeln!(self.out, "Error: Please enter a valid number for amount")?,
            }
        };

        Ok(Some(Transaction::new(
            merchant,
            description,
            payment_method,
            amount,
        )))
    }

    /// Categorize, display and persist one transaction
    async fn process(&mut self, transaction: &Transaction) -> spendcat_core::Result<Categorization> {
        writeln!(self.out, "\nCategorizing transaction...")?;
        let result = self.categorizer.categorize(transaction).await?;

        writeln!(self.out, "\nCategory: {}", result.category)?;
        writeln!(self.out, "Confidence: {}", result.confidence)?;
        writeln!(self.out, "Reasoning: {}", result.reasoning)?;

        let ledger = self.categorizer.ledger();
        ledger.append(transaction, &result)?;
        writeln!(self.out, "\nTransaction saved to {}", ledger.path().display())?;

        Ok(result)
    }

    /// Show `label`, read one line and trim it; `None` at end of input
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD rather than an error.
    async fn read_line(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}
