use crate::core::schema::{EntitySchema, FieldDef};
use crate::impl_record_entity;

/// Collection name of fruits, the target of every fruit reference
pub const FRUITS: &str = "fruits";

fn schema() -> EntitySchema {
    EntitySchema::new("fruit", FRUITS, "Fruit Master")
        .field(FieldDef::text("fruit_name", "Fruit Name").required())
        .field(FieldDef::image("image_url", "Fruit Image").column("Image"))
        .field(
            FieldDef::currency("price", "Price (USD)")
                .column("Price")
                .required()
                .min(0.01),
        )
        .field(
            FieldDef::free_text("description", "Description")
                .max_len(300)
                .unlisted(),
        )
        .field(
            FieldDef::boolean("active", "Active")
                .column("Status")
                .default_flag(true),
        )
        .empty_message("No fruits found. Add your first fruit!")
}

impl_record_entity!(
    /// A fruit offered in baskets
    Fruit,
    schema(),
    {
        fruit_name: String,
        image_url: Option<String>,
        price: f64,
        description: Option<String>,
        active: bool,
    }
);
