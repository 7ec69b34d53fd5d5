//! Page routes and the grouped navigation menu

use std::fmt;

use crate::core::entity::Entity;
use crate::core::schema::EntitySchema;
use crate::entities::{
    Basket, Decoration, Delivery, Fruit, Payment, PurchaseOrder, Refund, SalesInvoice,
};
use crate::report::REPORTS_TITLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Fruits,
    Basket,
    Decoration,
    PurchaseOrder,
    SalesInvoice,
    Payment,
    Refund,
    Delivery,
    Reports,
}

/// Dropdown of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub name: &'static str,
    /// (entry name, route)
    pub entries: Vec<(&'static str, Route)>,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::Fruits,
        Route::Basket,
        Route::Decoration,
        Route::PurchaseOrder,
        Route::SalesInvoice,
        Route::Payment,
        Route::Refund,
        Route::Delivery,
        Route::Reports,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Fruits => "/fruits",
            Route::Basket => "/basket",
            Route::Decoration => "/decoration",
            Route::PurchaseOrder => "/purchase-order",
            Route::SalesInvoice => "/sales-invoice",
            Route::Payment => "/payment",
            Route::Refund => "/refund",
            Route::Delivery => "/delivery",
            Route::Reports => "/reports",
        }
    }

    /// Schema edited on this page; `None` for pages without a record editor
    pub fn schema(&self) -> Option<&'static EntitySchema> {
        match self {
            Route::Fruits => Some(Fruit::schema()),
            Route::Basket => Some(Basket::schema()),
            Route::Decoration => Some(Decoration::schema()),
            Route::PurchaseOrder => Some(PurchaseOrder::schema()),
            Route::SalesInvoice => Some(SalesInvoice::schema()),
            Route::Payment => Some(Payment::schema()),
            Route::Refund => Some(Refund::schema()),
            Route::Delivery => Some(Delivery::schema()),
            Route::Home | Route::Reports => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Reports => REPORTS_TITLE,
            other => other.schema().map_or("", |s| s.title),
        }
    }

    /// Menu entry name and its group; the home page is not in the menu
    pub fn menu_entry(&self) -> Option<(&'static str, &'static str)> {
        let entry = match self {
            Route::Home => return None,
            Route::Fruits => ("Master", "Fruits"),
            Route::Basket => ("Master", "Basket"),
            Route::Decoration => ("Master", "Decoration"),
            Route::PurchaseOrder => ("Inventory Management", "Purchase Order"),
            Route::SalesInvoice => ("Inventory Management", "Sales Invoice"),
            Route::Payment => ("Payment Management", "User Payment"),
            Route::Refund => ("Payment Management", "Refund Status"),
            Route::Delivery => ("Order Management", "Order Status"),
            Route::Reports => ("Report", "Report List"),
        };
        Some(entry)
    }

    /// Route of a path; a trailing slash is ignored
    pub fn resolve(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Navigation menu, groups and entries in display order
pub fn menu() -> Vec<MenuGroup> {
    let mut groups: Vec<MenuGroup> = Vec::new();
    for route in Route::ALL {
        let Some((group, entry)) = route.menu_entry() else {
            continue;
        };
        match groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.entries.push((entry, route)),
            None => groups.push(MenuGroup {
                name: group,
                entries: vec![(entry, route)],
            }),
        }
    }
    groups
}
