//! Record editor behaviour against the in-memory store and mocked gateways

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use orchard::prelude::*;
use tokio::sync::Notify;

mock! {
    Gateway {}

    #[async_trait]
    impl PersistenceGateway for Gateway {
        async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Record>, GatewayError>;
        async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<Record>, GatewayError>;
        async fn create(&self, collection: &str, fields: FieldMap) -> Result<Record, GatewayError>;
        async fn update(&self, collection: &str, id: &Uuid, fields: FieldMap) -> Result<(), GatewayError>;
        async fn delete(&self, collection: &str, id: &Uuid) -> Result<(), GatewayError>;
    }
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::at_millis(1_718_000_123_456))
}

fn memory() -> Arc<dyn PersistenceGateway> {
    Arc::new(InMemoryGateway::with_clock(clock()).with_schemas(catalog()))
}

fn stored_fruit(name: &str, price: f64) -> Record {
    let fields = FieldMap::from([
        ("fruit_name".to_string(), FieldValue::String(name.to_string())),
        ("image_url".to_string(), FieldValue::Null),
        ("price".to_string(), FieldValue::Float(price)),
        ("description".to_string(), FieldValue::Null),
        ("active".to_string(), FieldValue::Boolean(true)),
    ]);
    Record::new(Uuid::new_v4(), Utc::now(), fields)
}

// =============================================================================
// Create and edit
// =============================================================================

#[tokio::test]
async fn test_create_fruit_stores_typed_fields() {
    let gateway = memory();
    let mut page = RecordEditor::for_entity::<Fruit>(gateway.clone(), clock()).await;
    assert!(page.list().is_empty());
    assert_eq!(page.list().empty_message(), "No fruits found. Add your first fruit!");

    page.update_field("fruit_name", "Mango").unwrap();
    page.update_field("price", "3.5").unwrap();
    page.update_field("description", "").unwrap();

    let outcome = page.submit().await.unwrap();
    let SubmitOutcome::Created(record) = outcome else {
        panic!("expected a created record");
    };
    assert_eq!(record.get_str("fruit_name"), Some("Mango"));
    assert_eq!(record.get("price"), Some(&FieldValue::Float(3.5)));
    assert_eq!(record.get("description"), Some(&FieldValue::Null));
    assert_eq!(record.get("active"), Some(&FieldValue::Boolean(true)));

    // Form is reset and the list reloaded
    assert_eq!(page.form().mode(), EditMode::Creating);
    assert_eq!(page.form().draft().text("fruit_name"), "");
    assert_eq!(page.list().records().len(), 1);

    let fruits = Collection::<Fruit>::new(gateway).list(&ListQuery::new()).await.unwrap();
    assert_eq!(fruits[0].fruit_name, "Mango");
    assert_eq!(fruits[0].price, 3.5);
}

#[tokio::test]
async fn test_submit_issues_exactly_one_create() {
    let mut gateway = MockGateway::new();
    gateway.expect_list().returning(|_, _| Ok(vec![]));
    gateway
        .expect_create()
        .withf(|collection, fields| {
            collection == "fruits" && fields.get("price") == Some(&FieldValue::Float(3.5))
        })
        .times(1)
        .returning(|_, fields| Ok(Record::new(Uuid::new_v4(), Utc::now(), fields)));
    gateway.expect_update().never();

    let mut page = RecordEditor::for_entity::<Fruit>(Arc::new(gateway), clock()).await;
    page.update_field("fruit_name", "Mango").unwrap();
    page.update_field("price", "3.5").unwrap();
    assert!(matches!(page.submit().await.unwrap(), SubmitOutcome::Created(_)));
}

#[tokio::test]
async fn test_edit_updates_same_record() {
    let stored = stored_fruit("Pear", 2.0);
    let id = stored.id;

    let mut gateway = MockGateway::new();
    gateway
        .expect_list()
        .returning(move |_, _| Ok(vec![stored.clone()]));
    gateway.expect_create().never();
    gateway
        .expect_update()
        .withf(move |collection, updated, fields| {
            collection == "fruits"
                && *updated == id
                && fields.get("price") == Some(&FieldValue::Float(2.25))
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let mut page = RecordEditor::for_entity::<Fruit>(Arc::new(gateway), clock()).await;
    page.edit(&id).unwrap();
    assert_eq!(page.form().mode(), EditMode::Editing(id));
    assert_eq!(page.form().draft().text("price"), "2");

    page.update_field("price", "2.25").unwrap();
    assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Updated(id));
    assert_eq!(page.form().mode(), EditMode::Creating);
}

#[tokio::test]
async fn test_edit_then_cancel() {
    let gateway = memory();
    let mut page = RecordEditor::for_entity::<Basket>(gateway, clock()).await;
    page.update_field("basket_name", "Gift").unwrap();
    page.update_field("quantity", "3").unwrap();
    page.update_field("weight", "1.5").unwrap();
    page.submit().await.unwrap();

    let id = page.list().records()[0].id;
    page.edit(&id).unwrap();
    assert_eq!(page.form().draft().text("basket_name"), "Gift");

    page.cancel_edit();
    assert_eq!(page.form().mode(), EditMode::Creating);
    assert_eq!(page.form().draft().text("basket_name"), "");

    assert!(page.edit(&Uuid::new_v4()).is_err());
}

#[tokio::test]
async fn test_blank_optional_amount_is_stored_as_null() {
    let gateway = memory();
    let mut page = RecordEditor::for_entity::<Payment>(gateway.clone(), clock()).await;
    page.update_field("customer_name", "Lee").unwrap();
    page.update_field("amount", "").unwrap();
    page.update_field("status", "Declined").unwrap();
    page.submit().await.unwrap();

    let payments = Collection::<Payment>::new(gateway).list(&ListQuery::new()).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, None);

    let row = &page.list().rows()[0];
    assert_eq!(page.list().headers(), vec!["Customer", "Amount", "Status", "Remark", "Date"]);
    assert_eq!(row.cells[1].text, "N/A");
    assert_eq!(row.cells[2].text, "Declined");
    assert_eq!(row.cells[3].text, "-");
    assert_eq!(row.cells[4].text, "2024-06-10");
}

#[tokio::test]
async fn test_clearing_amount_on_edit_stores_null() {
    let gateway = memory();
    let mut page = RecordEditor::for_entity::<Payment>(gateway.clone(), clock()).await;
    page.update_field("customer_name", "Ana").unwrap();
    page.update_field("amount", "25").unwrap();
    page.update_field("status", "Success").unwrap();
    page.submit().await.unwrap();

    let id = page.list().records()[0].id;
    page.edit(&id).unwrap();
    assert_eq!(page.form().draft().text("amount"), "25");
    page.update_field("amount", "").unwrap();
    assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Updated(id));

    let stored = gateway.get("payments", &id).await.unwrap().unwrap();
    assert_eq!(stored.get("amount"), Some(&FieldValue::Null));
    assert_eq!(stored.get_str("customer_name"), Some("Ana"));
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_invalid_submit_keeps_draft_and_reports_each_field() {
    let mut gateway = MockGateway::new();
    gateway.expect_list().returning(|_, _| Ok(vec![]));
    gateway.expect_create().never();

    let mut page = RecordEditor::for_entity::<Fruit>(Arc::new(gateway), clock()).await;
    page.update_field("price", "0").unwrap();

    let err = page.submit().await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert_eq!(page.form().error_for("fruit_name"), Some("Fruit Name is required"));
    assert!(page.form().error_for("price").is_some());
    assert_eq!(page.form().draft().text("price"), "0");
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let mut page = RecordEditor::for_entity::<Fruit>(memory(), clock()).await;
    assert!(page.update_field("colour", "red").is_err());
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_declined_delete_never_reaches_gateway() {
    let stored = stored_fruit("Fig", 1.0);
    let id = stored.id;

    let mut gateway = MockGateway::new();
    gateway
        .expect_list()
        .returning(move |_, _| Ok(vec![stored.clone()]));
    gateway.expect_delete().never();

    let mut page = RecordEditor::for_entity::<Fruit>(Arc::new(gateway), clock()).await;
    let outcome = page.delete(&id, &|_: &str| false).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(page.list().records().len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_removes_record_and_resets_edit() {
    let gateway = memory();
    let mut page = RecordEditor::for_entity::<Delivery>(gateway.clone(), clock()).await;
    page.update_field("delivery_name", "ORD-1").unwrap();
    page.update_field("status", "Pending").unwrap();
    page.submit().await.unwrap();

    let id = page.list().records()[0].id;
    page.edit(&id).unwrap();

    let outcome = page
        .delete(&id, &|message: &str| {
            assert_eq!(message, "Are you sure you want to delete this delivery record?");
            true
        })
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(page.list().is_empty());
    assert_eq!(page.form().mode(), EditMode::Creating);
}

// =============================================================================
// Gateway failures
// =============================================================================

#[tokio::test]
async fn test_gateway_failure_keeps_draft() {
    let mut gateway = MockGateway::new();
    gateway.expect_list().returning(|_, _| Ok(vec![]));
    gateway
        .expect_create()
        .times(1)
        .returning(|_, _| Err(GatewayError::Unavailable("connection refused".to_string())));

    let mut page = RecordEditor::for_entity::<Fruit>(Arc::new(gateway), clock()).await;
    page.update_field("fruit_name", "Mango").unwrap();
    page.update_field("price", "3.5").unwrap();

    let err = page.submit().await.unwrap_err();
    assert!(matches!(err, OrchardError::Gateway(GatewayError::Unavailable(_))));
    assert_eq!(page.form().draft().text("fruit_name"), "Mango");
    assert!(page.list().last_error().is_some());
}

#[tokio::test]
async fn test_failed_load_is_recorded_on_the_list() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_list()
        .returning(|_, _| Err(GatewayError::Unavailable("timeout".to_string())));

    let page = RecordEditor::for_entity::<Refund>(Arc::new(gateway), clock()).await;
    assert!(!page.list().is_loading());
    assert!(page.list().last_error().unwrap().contains("timeout"));
    assert!(page.list().is_empty());
}

/// Gateway whose reads wait until released
struct SlowGateway {
    inner: InMemoryGateway,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl PersistenceGateway for SlowGateway {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Record>, GatewayError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.list(collection, query).await
    }

    async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<Record>, GatewayError> {
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: &str, fields: FieldMap) -> Result<Record, GatewayError> {
        self.inner.create(collection, fields).await
    }

    async fn update(&self, collection: &str, id: &Uuid, fields: FieldMap) -> Result<(), GatewayError> {
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &Uuid) -> Result<(), GatewayError> {
        self.inner.delete(collection, id).await
    }
}

#[tokio::test]
async fn test_fetch_finishing_after_unmount_is_discarded() {
    let inner = InMemoryGateway::new();
    inner
        .create("fruits", stored_fruit("Kiwi", 1.0).fields)
        .await
        .unwrap();

    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let gateway = SlowGateway {
        inner,
        entered: entered.clone(),
        release: release.clone(),
    };

    let mut page = RecordEditor::new(Fruit::schema(), Arc::new(gateway), clock());
    let scope = page.scope();
    let pending = tokio::spawn(async move {
        let result = page.refresh().await;
        (page, result)
    });

    entered.notified().await;
    scope.unmount();
    release.notify_one();

    let (page, result) = pending.await.unwrap();
    assert!(result.is_ok());
    assert!(page.list().records().is_empty());
    assert!(!page.list().is_loading());
    assert!(!scope.is_mounted());
}

// =============================================================================
// References
// =============================================================================

#[tokio::test]
async fn test_invoice_references_active_fruits_only() {
    let gateway = memory();
    let fruits = Collection::<Fruit>::new(gateway.clone());
    let apple = fruits
        .insert(&Fruit::new("Apple".into(), None, 1.0, None, true))
        .await
        .unwrap();
    let banana = fruits
        .insert(&Fruit::new("Banana".into(), None, 0.5, None, false))
        .await
        .unwrap();

    let mut page = RecordEditor::for_entity::<SalesInvoice>(gateway.clone(), clock()).await;
    let options = page.reference_options("fruit_id").await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "Apple");
    assert!(page.reference_options("price").await.is_err());

    page.update_field("fruit_id", banana.id.to_string()).unwrap();
    page.update_field("price", "10").unwrap();
    assert!(page.submit().await.is_err());
    assert_eq!(
        page.form().error_for("fruit_id"),
        Some("Fruit refers to an inactive record")
    );

    page.update_field("fruit_id", apple.id.to_string()).unwrap();
    page.update_field("gst_percent", "5").unwrap();
    page.submit().await.unwrap();

    let rows = page.list().rows();
    assert_eq!(rows.len(), 1);
    let cells: Vec<_> = rows[0].cells.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(cells[1], "2024-06-10");
    assert_eq!(&cells[2..], &["Apple", "$10.00", "5%", "$10.50"]);
    assert!(cells[0].starts_with("SI-"));
}

async fn invoice_for_new_fruit(
    gateway: &Arc<dyn PersistenceGateway>,
) -> (RecordEditor, Fruit, Uuid) {
    let fruit = Collection::<Fruit>::new(gateway.clone())
        .insert(&Fruit::new("Apple".into(), None, 1.0, None, true))
        .await
        .unwrap();

    let mut page = RecordEditor::for_entity::<SalesInvoice>(gateway.clone(), clock()).await;
    page.update_field("fruit_id", fruit.id.to_string()).unwrap();
    page.update_field("price", "10").unwrap();
    let SubmitOutcome::Created(invoice) = page.submit().await.unwrap() else {
        panic!("expected a created invoice");
    };
    (page, fruit, invoice.id)
}

#[tokio::test]
async fn test_edit_invoice_after_its_fruit_was_deactivated() {
    let gateway = memory();
    let (mut page, fruit, id) = invoice_for_new_fruit(&gateway).await;

    let inactive = FieldMap::from([("active".to_string(), FieldValue::Boolean(false))]);
    gateway.update("fruits", &fruit.id, inactive).await.unwrap();
    page.refresh().await.unwrap();

    page.edit(&id).unwrap();
    assert_eq!(page.form().draft().text("fruit_id"), fruit.id.to_string());
    page.update_field("price", "12").unwrap();
    assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Updated(id));

    let stored = gateway.get("sales_invoices", &id).await.unwrap().unwrap();
    assert_eq!(stored.get("price"), Some(&FieldValue::Float(12.0)));
    assert_eq!(stored.get("fruit_id"), Some(&FieldValue::Uuid(fruit.id)));

    // Switching to another inactive fruit is still refused
    page.edit(&id).unwrap();
    let other = Collection::<Fruit>::new(gateway.clone())
        .insert(&Fruit::new("Quince".into(), None, 2.0, None, false))
        .await
        .unwrap();
    page.update_field("fruit_id", other.id.to_string()).unwrap();
    assert!(page.submit().await.is_err());
    assert_eq!(
        page.form().error_for("fruit_id"),
        Some("Fruit refers to an inactive record")
    );
}

#[tokio::test]
async fn test_edit_invoice_after_its_fruit_was_deleted() {
    let gateway = memory();
    let (mut page, fruit, id) = invoice_for_new_fruit(&gateway).await;

    gateway.delete("fruits", &fruit.id).await.unwrap();
    page.refresh().await.unwrap();

    page.edit(&id).unwrap();
    page.update_field("gst_percent", "5").unwrap();
    assert_eq!(page.submit().await.unwrap(), SubmitOutcome::Updated(id));

    let stored = gateway.get("sales_invoices", &id).await.unwrap().unwrap();
    assert_eq!(stored.get("gst_percent"), Some(&FieldValue::Float(5.0)));
    assert_eq!(stored.get("fruit_id"), Some(&FieldValue::Uuid(fruit.id)));
}

#[tokio::test]
async fn test_purchase_order_numbers() {
    let gateway = memory();
    let fruit = Collection::<Fruit>::new(gateway.clone())
        .insert(&Fruit::new("Mango".into(), None, 3.0, None, true))
        .await
        .unwrap();
    let mut page = RecordEditor::for_entity::<PurchaseOrder>(gateway.clone(), clock()).await;
    assert_eq!(page.form().draft().text("po_date"), "2024-06-10");

    page.update_field("fruit_id", fruit.id.to_string()).unwrap();
    page.update_field("price", "40").unwrap();
    let SubmitOutcome::Created(generated) = page.submit().await.unwrap() else {
        panic!("expected a created purchase order");
    };
    assert_eq!(generated.get_str("po_number"), Some("PO-00123456"));

    page.update_field("po_number", "PO-2024-001").unwrap();
    page.update_field("fruit_id", fruit.id.to_string()).unwrap();
    page.update_field("price", "15").unwrap();
    let SubmitOutcome::Created(supplied) = page.submit().await.unwrap() else {
        panic!("expected a created purchase order");
    };
    assert_eq!(supplied.get_str("po_number"), Some("PO-2024-001"));

    // Editing keeps the stored number
    page.edit(&supplied.id).unwrap();
    assert_eq!(page.form().draft().text("po_number"), "PO-2024-001");
    page.update_field("price", "16").unwrap();
    page.submit().await.unwrap();

    let stored = Collection::<PurchaseOrder>::new(gateway)
        .get(&supplied.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.po_number, "PO-2024-001");
    assert_eq!(stored.price, 16.0);
}

#[tokio::test]
async fn test_image_upload_fills_the_form() {
    let mut page = RecordEditor::for_entity::<Fruit>(memory(), clock()).await;
    let upload = page
        .upload_image("image_url", "kiwi.png", "image/png", b"\x89PNG")
        .unwrap();
    assert_eq!(page.form().draft().text("image_url"), upload.data_url);

    assert!(
        page.upload_image("image_url", "kiwi.gif", "image/gif", b"GIF89a")
            .is_err()
    );
    assert!(
        page.upload_image("price", "kiwi.png", "image/png", b"\x89PNG")
            .is_err()
    );
}
