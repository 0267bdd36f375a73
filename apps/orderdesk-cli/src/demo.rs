//! # Demo Scenarios
//!
//! Three walkthroughs against a seeded store:
//!
//! ```text
//! ===== ORDER PROCESSING DEMO =====   Alice buys 2 laptops, 15 mice, report
//! ===== CUSTOMER OBJECT DEMO =====    Bob earns points, sees his tier
//! ===== STOCK CHECK DEMO =====        check keyboards, then order 10
//! ```
//!
//! Output goes to any `io::Write` so tests can capture it.

use std::io::Write;
use tracing::info;

use orderdesk_core::{
    Customer, LoyaltyPoints, Money, OrderProcessor, PricingConfig, RecordingNotifier,
};

use crate::config::{AppConfig, ReportFormat};
use crate::error::AppResult;

const LAPTOP: usize = 0;
const MOUSE: usize = 1;
const KEYBOARD: usize = 2;

/// Builds the processor with the three demo products and Alice as the
/// active customer.
pub fn seeded_processor(config: PricingConfig) -> AppResult<OrderProcessor<RecordingNotifier>> {
    let mut processor = OrderProcessor::with_notifier(config, RecordingNotifier::new())?;

    processor.add_product("Laptop", Money::from_major_minor(999, 99), 50)?;
    processor.add_product("Mouse", Money::from_major_minor(29, 99), 200)?;
    processor.add_product("Keyboard", Money::from_major_minor(59, 99), 150)?;

    processor.set_customer(
        Customer::new(
            "Alice Johnson",
            "alice@example.com",
            "123 Elm Street, Dhaka",
            67,
        )
        .with_loyalty_points(LoyaltyPoints::from_whole(850)),
    );

    Ok(processor)
}

/// Runs every scenario in order.
pub fn run<W: Write>(config: &AppConfig, out: &mut W) -> AppResult<()> {
    let mut processor = seeded_processor(config.pricing.clone())?;

    order_processing(&mut processor, config.report_format, out)?;
    customer_object(&processor, out)?;
    stock_check(&mut processor, out)?;

    info!(
        orders = processor.ledger().total_orders_processed(),
        revenue = %processor.ledger().total_revenue(),
        "Demo finished"
    );
    Ok(())
}

fn order_processing<W: Write>(
    processor: &mut OrderProcessor<RecordingNotifier>,
    format: ReportFormat,
    out: &mut W,
) -> AppResult<()> {
    writeln!(out, "===== ORDER PROCESSING DEMO =====")?;
    writeln!(out)?;

    place_and_print(processor, LAPTOP, 2, out)?;
    writeln!(out)?;
    place_and_print(processor, MOUSE, 15, out)?;
    writeln!(out)?;

    let report = processor.generate_report()?;
    match format {
        ReportFormat::Text => writeln!(out, "{}", report)?,
        ReportFormat::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    Ok(())
}

fn customer_object<W: Write>(
    processor: &OrderProcessor<RecordingNotifier>,
    out: &mut W,
) -> AppResult<()> {
    writeln!(out)?;
    writeln!(out, "===== CUSTOMER OBJECT DEMO =====")?;
    writeln!(out)?;

    let pricing = processor.pricing();
    let senior_min_age = pricing.config().age.senior_min_age;

    let mut bob = Customer::new("Bob Smith", "bob@example.com", "456 Oak Ave", 22);
    bob.accrue_points(LoyaltyPoints::from_whole(250));
    bob.update_membership_tier(&pricing.config().tiers);

    writeln!(out, "Name: {}", bob.name())?;
    writeln!(out, "Email: {}", bob.email())?;
    writeln!(out, "Points: {}", bob.loyalty_points())?;
    writeln!(out, "Tier: {}", bob.membership_tier())?;
    writeln!(out, "Greeting: {}", bob.greeting(senior_min_age))?;

    let quote = processor.quote(MOUSE, 1, &bob)?;
    writeln!(out, "One Mouse would cost: {}", quote.total)?;
    Ok(())
}

fn stock_check<W: Write>(
    processor: &mut OrderProcessor<RecordingNotifier>,
    out: &mut W,
) -> AppResult<()> {
    writeln!(out)?;
    writeln!(out, "===== STOCK CHECK DEMO =====")?;
    writeln!(out)?;

    if processor.check_stock(KEYBOARD, 10)? {
        writeln!(out, "Keyboards in stock - placing order.")?;
        place_and_print(processor, KEYBOARD, 10, out)?;
    } else {
        writeln!(out, "Not enough keyboards in stock.")?;
    }
    Ok(())
}

/// Places an order and prints the confirmation it produced.
fn place_and_print<W: Write>(
    processor: &mut OrderProcessor<RecordingNotifier>,
    index: usize,
    quantity: u32,
    out: &mut W,
) -> AppResult<()> {
    let outcome = processor.place_order(index, quantity)?;

    writeln!(
        out,
        "Order placed: {} x{} (discount {}, total {})",
        outcome.product_name, outcome.quantity, outcome.price.applied_discount, outcome.price.total
    )?;
    for confirmation in processor.notifier_mut().drain() {
        writeln!(out, "{}", confirmation)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(config: &AppConfig) -> String {
        let mut out = Vec::new();
        run(config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_demo_output() {
        let output = run_to_string(&AppConfig::default());

        assert!(output.starts_with("===== ORDER PROCESSING DEMO =====\n"));
        assert!(output.contains("Order placed: Laptop x2 (discount 17.00%, total $1792.78)"));
        assert!(output.contains("Dear Senior Customer Alice Johnson,"));
        assert!(output.contains("Loyalty points balance: 867.93"));
        assert!(output.contains("Order placed: Mouse x15 (discount 27.00%, total $354.66)"));
        assert!(output.contains("=== REPORT ==="));
        assert!(output.contains("Customer: Alice Johnson [Silver]"));
        assert!(output.contains("Total Revenue: $2147.44"));
        assert!(output.contains("Avg Order Value: $1073.72"));

        assert!(output.contains("Name: Bob Smith"));
        assert!(output.contains("Points: 250.00"));
        assert!(output.contains("Tier: Standard"));
        assert!(output.contains("Greeting: Hello Bob Smith"));
        assert!(output.contains("One Mouse would cost: $32.39"));

        assert!(output.contains("Keyboards in stock - placing order."));
        assert!(output.contains("Order placed: Keyboard x10 (discount 17.00%, total $537.75)"));
    }

    #[test]
    fn test_json_report_output() {
        let config = AppConfig {
            report_format: ReportFormat::Json,
            ..AppConfig::default()
        };
        let output = run_to_string(&config);

        assert!(output.contains("\"total_revenue\": 214744"));
        assert!(output.contains("\"status\": \"silver\""));
        assert!(!output.contains("=== REPORT ==="));
    }

    #[test]
    fn test_seeded_processor() {
        let processor = seeded_processor(PricingConfig::default()).unwrap();
        assert_eq!(processor.catalog().len(), 3);
        assert_eq!(processor.customer().unwrap().name(), "Alice Johnson");
    }
}
