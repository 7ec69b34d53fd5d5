use crate::core::schema::{EntitySchema, FieldDef};
use crate::impl_record_entity;

fn schema() -> EntitySchema {
    EntitySchema::new("basket", "baskets", "Basket Master")
        .field(FieldDef::text("basket_name", "Basket Name").required())
        .field(FieldDef::integer("quantity", "Quantity").required().min(1.0))
        .field(
            FieldDef::decimal("weight", "Weight (lbs)")
                .column("Weight")
                .required()
                .min(0.01),
        )
        .field(
            FieldDef::boolean("active", "Active")
                .column("Status")
                .default_flag(true),
        )
        .empty_message("No baskets found. Add your first basket!")
}

impl_record_entity!(
    /// A basket stock line
    Basket,
    schema(),
    {
        basket_name: String,
        quantity: i64,
        weight: f64,
        active: bool,
    }
);
