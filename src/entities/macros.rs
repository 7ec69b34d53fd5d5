//! Macros for reducing boilerplate when defining entities

/// Create a record-backed entity with its [`Entity`](crate::core::entity::Entity)
/// implementation.
///
/// The struct gets the store-assigned `id` and `created_at` followed by the
/// listed fields. The schema expression is evaluated once, on first use.
///
/// # Example
///
/// ```rust,ignore
/// use orchard::prelude::*;
///
/// impl_record_entity!(
///     /// A gift card
///     GiftCard,
///     EntitySchema::new("gift_card", "gift_cards", "Gift Cards")
///         .field(FieldDef::text("code", "Code").required())
///         .field(FieldDef::currency("balance", "Balance").required()),
///     {
///         code: String,
///         balance: f64,
///     }
/// );
///
/// let card = GiftCard::new("XMAS-24".to_string(), 25.0);
/// assert_eq!(GiftCard::collection(), "gift_cards");
/// ```
#[macro_export]
macro_rules! impl_record_entity {
    (
        $(#[$meta:meta])*
        $type:ident,
        $schema:expr,
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier assigned by the store
            pub id: ::uuid::Uuid,

            /// When the store created this record
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            $( $(#[$field_meta])* pub $field : $field_type ),*
        }

        impl $crate::core::entity::Entity for $type {
            fn schema() -> &'static $crate::core::schema::EntitySchema {
                static SCHEMA: ::std::sync::OnceLock<$crate::core::schema::EntitySchema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| $schema)
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }
        }

        impl $type {
            /// Create an unsaved instance; the store replaces `id` and
            /// `created_at` on insert
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $field_type ),*) -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    created_at: ::chrono::Utc::now(),
                    $( $field ),*
                }
            }
        }
    };
}
