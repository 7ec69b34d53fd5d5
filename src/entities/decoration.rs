use crate::core::schema::{EntitySchema, FieldDef};
use crate::core::status::DecorationType;
use crate::impl_record_entity;

fn schema() -> EntitySchema {
    EntitySchema::new("decoration", "decorations", "Decoration Master")
        .field(FieldDef::text("decoration_name", "Decoration Name").required())
        .field(
            FieldDef::choice("decoration_type", "Decoration Type", DecorationType::VALUES)
                .column("Type")
                .required(),
        )
        .field(
            FieldDef::currency("price", "Price (USD)")
                .column("Price")
                .required()
                .min(0.01),
        )
        .field(
            FieldDef::boolean("active", "Active")
                .column("Status")
                .default_flag(true),
        )
        .empty_message("No decorations found.")
}

impl_record_entity!(
    /// A basket decoration
    Decoration,
    schema(),
    {
        decoration_name: String,
        decoration_type: String,
        price: f64,
        active: bool,
    }
);

impl Decoration {
    /// Parsed decoration type; `None` for values outside the known set
    pub fn kind(&self) -> Option<DecorationType> {
        self.decoration_type.parse().ok()
    }
}
