use super::ui;
use crate::core::aggregate::{self, Aggregator, RetryOutcome};
use crate::core::currency::{CountrySource, CurrencyRecord, CurrencyResolver};
use anyhow::Result;
use chrono::Local;
use comfy_table::Cell;
use indicatif::ProgressBar;

fn display_table(records: &[CurrencyRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Country"),
        ui::header_cell("Name"),
        ui::header_cell("Currency"),
        ui::header_cell("Currency Name"),
        ui::header_cell("Service"),
        ui::header_cell("Fetched"),
        ui::header_cell("Error"),
    ]);

    for record in records {
        let fetched = record
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();
        table.add_row(vec![
            Cell::new(&record.country_code),
            Cell::new(&record.country_name),
            ui::currency_code_cell(&record.currency_code),
            Cell::new(&record.currency_name),
            Cell::new(&record.service),
            Cell::new(fetched),
            Cell::new(record.error.as_deref().unwrap_or("")),
        ]);
    }

    table.to_string()
}

fn track(pb: &ProgressBar, done: usize, total: usize) {
    pb.set_length(total as u64);
    pb.set_position(done as u64);
}

pub async fn run(
    source: &dyn CountrySource,
    resolver: &dyn CurrencyResolver,
    retry_failed: bool,
) -> Result<()> {
    let mut aggregator = Aggregator::new(source, resolver);

    let pb = ui::new_progress_bar(aggregate::MAX_COUNTRIES as u64, true);
    pb.set_message("Fetching currencies...");
    aggregator
        .refresh_all(&|done, total| track(&pb, done, total))
        .await;
    pb.finish_and_clear();

    if retry_failed {
        let pb = ui::new_progress_bar(aggregator.failure_count() as u64, true);
        pb.set_message("Retrying failed lookups...");
        let outcome = aggregator
            .retry_failed(&|done, total| track(&pb, done, total))
            .await;
        pb.finish_and_clear();

        if let RetryOutcome::Retried {
            recovered,
            still_failing,
        } = outcome
        {
            println!(
                "{}",
                ui::style_text(
                    &format!("Retry: {recovered} recovered, {still_failing} still failing"),
                    ui::StyleType::Subtle
                )
            );
        }
    }

    println!(
        "{}\n",
        ui::style_text("Currency Information", ui::StyleType::Title)
    );
    println!("{}", display_table(aggregator.result()));

    let stats = format!(
        "{} / {} successful",
        aggregator.success_count(),
        aggregator.result().len()
    );
    if aggregator.failure_count() == 0 {
        println!("\n{}", ui::style_text(&stats, ui::StyleType::Success));
    } else {
        println!(
            "\n{} {}",
            ui::style_text(&stats, ui::StyleType::Subtle),
            ui::style_text(
                &format!("({} errors)", aggregator.failure_count()),
                ui::StyleType::Error
            )
        );
    }

    if let Some(last_error) = &aggregator.last_error {
        println!("{}", ui::style_text(last_error, ui::StyleType::Error));
    }

    Ok(())
}
