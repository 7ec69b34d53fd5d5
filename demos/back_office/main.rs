//! Back-office walkthrough on the in-memory store

use orchard::prelude::*;
use orchard::report::REPORTS_TITLE;
use orchard::telemetry::init_tracing;

fn print_page(page: &RecordEditor) {
    println!("\n== {} ==", page.schema().title);
    if page.list().is_empty() {
        println!("   {}", page.list().empty_message());
        return;
    }
    println!("   {}", page.list().headers().join(" | "));
    for row in page.list().rows() {
        let cells: Vec<_> = row.cells.iter().map(|c| c.text.as_str()).collect();
        println!("   {}", cells.join(" | "));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("orchard=info");
    println!("🍎 Orchard back office\n");

    let gateway: Arc<dyn PersistenceGateway> =
        Arc::new(InMemoryGateway::new().with_schemas(catalog()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    println!("📋 Menu");
    for group in menu() {
        let entries: Vec<_> = group
            .entries
            .iter()
            .map(|(name, route)| format!("{} ({})", name, route))
            .collect();
        println!("   {}: {}", group.name, entries.join(", "));
    }

    // Fruit master
    let mut fruits = RecordEditor::for_entity::<Fruit>(gateway.clone(), clock.clone()).await;
    print_page(&fruits);
    for (name, price) in [("Mango", "3.5"), ("Kiwi", "0.8"), ("Pear", "1.25")] {
        fruits.update_field("fruit_name", name)?;
        fruits.update_field("price", price)?;
        fruits.submit().await?;
    }
    fruits.update_field("fruit_name", "Durian")?;
    fruits.update_field("price", "-1")?;
    if fruits.submit().await.is_err() {
        for error in fruits.form().field_errors() {
            println!("⚠️  {}", error.message);
        }
        fruits.cancel_edit();
    }
    print_page(&fruits);

    // Sales invoices reference fruits
    let mut invoices =
        RecordEditor::for_entity::<SalesInvoice>(gateway.clone(), clock.clone()).await;
    let options = invoices.reference_options("fruit_id").await?;
    for (option, price) in options.iter().zip(["12", "40", "7.5"]) {
        invoices.update_field("fruit_id", option.value.to_string())?;
        invoices.update_field("price", price)?;
        invoices.update_field("gst_percent", "18")?;
        if let Some(total) = invoices.form().preview_total() {
            println!("🧾 {} invoice total preview: ${:.2}", option.label, total);
        }
        invoices.submit().await?;
    }
    print_page(&invoices);

    // Payments and deliveries
    let mut payments = RecordEditor::for_entity::<Payment>(gateway.clone(), clock.clone()).await;
    for (customer, amount, status) in [("Lee", "59.00", "Success"), ("Ana", "", "Declined")] {
        payments.update_field("customer_name", customer)?;
        payments.update_field("amount", amount)?;
        payments.update_field("status", status)?;
        payments.submit().await?;
    }
    print_page(&payments);

    let mut deliveries = RecordEditor::for_entity::<Delivery>(gateway.clone(), clock).await;
    for (order, status) in [("ORD-1001", "Pending"), ("ORD-1002", "Delivered")] {
        deliveries.update_field("delivery_name", order)?;
        deliveries.update_field("status", status)?;
        deliveries.submit().await?;
    }
    let delivered = deliveries.list().records()[0].id;
    deliveries
        .delete(&delivered, &|prompt: &str| {
            println!("❓ {} yes", prompt);
            true
        })
        .await?;
    print_page(&deliveries);

    // Reports
    println!("\n== {} ==", REPORTS_TITLE);
    let summary = SummaryCalculator::new(gateway.clone()).load().await;
    println!("   Total Revenue: {}", summary.summary.revenue_text());
    println!("   Total Orders: {}", summary.summary.total_orders);
    println!("   Successful Payments: {}", summary.summary.successful_payments);
    println!("   Pending Deliveries: {}", summary.summary.pending_deliveries);

    let request = ReportRequest::new(ReportType::Sales).status(StatusFilter::Active);
    let table = ReportGenerator::new(gateway).generate(&request).await?;
    println!("\n   {}", table.heading());
    println!("   {}", table.headers.join(" | "));
    for row in &table.rows {
        println!("   {}", row.join(" | "));
    }

    Ok(())
}
