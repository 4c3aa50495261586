use super::ui;
use crate::core::error::FetchError;
use crate::core::payment::{PaymentGateway, PaymentRequest};
use anyhow::Result;

pub async fn run(gateway: &dyn PaymentGateway, request: &PaymentRequest) -> Result<()> {
    println!(
        "Sending payment of {:.2} {} from {} to {}...",
        request.amount, request.currency, request.from_account, request.to_account
    );

    match gateway.process_payment(request).await {
        Ok(receipt) => {
            println!(
                "\n{}",
                ui::style_text("Payment processed", ui::StyleType::Success)
            );
            println!("Transaction ID: {}", receipt.transaction_id);
            println!("Status:         {}", styled_status(&receipt.status));
            println!("Amount:         {:.2} {}", receipt.amount, receipt.currency);
            if let Some(message) = &receipt.message {
                println!("Message:        {message}");
            }
            Ok(())
        }
        Err(err) => {
            // upstream error text is shown verbatim
            eprintln!(
                "{}",
                ui::style_text(&format!("Payment failed: {err}"), ui::StyleType::Error)
            );
            if matches!(err, FetchError::Unreachable(_)) {
                eprintln!(
                    "{}",
                    ui::style_text(
                        "Check that the gateway is running on port 8090.",
                        ui::StyleType::Subtle
                    )
                );
            }
            Err(err.into())
        }
    }
}

fn styled_status(status: &str) -> String {
    let style_type = match status.to_uppercase().as_str() {
        "COMPLETED" | "SUCCESS" => ui::StyleType::Success,
        "BLOCKED" | "FAILED" => ui::StyleType::Error,
        _ => ui::StyleType::Subtle,
    };
    ui::style_text(status, style_type)
}
