use super::ui;
use crate::core::transaction::TransactionSource;
use anyhow::{Context, Result};
use comfy_table::Cell;

pub async fn run(store: &dyn TransactionSource) -> Result<()> {
    let transactions = store
        .list_transactions()
        .await
        .context("Failed to fetch transactions")?;

    println!(
        "{}\n",
        ui::style_text("Transaction History", ui::StyleType::Title)
    );

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Transaction ID"),
        ui::header_cell("Amount"),
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Status"),
        ui::header_cell("Created"),
    ]);

    for tx in &transactions {
        table.add_row(vec![
            Cell::new(&tx.transaction_id),
            ui::amount_cell(tx.amount, &tx.currency),
            Cell::new(&tx.from_account),
            Cell::new(&tx.to_account),
            ui::status_cell(&tx.status),
            Cell::new(tx.created_at.as_deref().unwrap_or("N/A")),
        ]);
    }

    println!("{table}");
    println!(
        "\n{}",
        ui::style_text(
            &format!("{} transactions", transactions.len()),
            ui::StyleType::Subtle
        )
    );

    Ok(())
}
