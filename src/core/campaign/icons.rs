//! Prize icon catalog.
//!
//! Fixed, process-wide mapping from icon key to display label. Prize entries
//! reference icons by key; the key is what goes over the wire.

/// A single icon option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconOption {
    pub key: &'static str,
    pub label: &'static str,
}

const fn icon(key: &'static str, label: &'static str) -> IconOption {
    IconOption { key, label }
}

/// All selectable prize icons, in display order.
pub const ICON_CATALOG: &[IconOption] = &[
    icon("Phone", "Phone"),
    icon("Email", "Email"),
    icon("Star", "Star"),
    icon("ShoppingCart", "Shopping Cart"),
    icon("GiftCard", "Gift Card"),
    icon("Smartphone", "Smartphone"),
    icon("Laptop", "Laptop"),
    icon("Headphones", "Headphones"),
    icon("Watch", "Watch"),
    icon("Subscription", "Subscription"),
    icon("GamingConsole", "Gaming Console"),
    icon("KitchenAppliance", "Kitchen Appliance"),
    icon("Speaker", "Speaker"),
    icon("BeautyProducts", "Beauty Products"),
    icon("TravelVoucher", "Travel Voucher"),
    icon("FashionAccessories", "Fashion Accessories"),
    icon("HomeAutomation", "Home Automation"),
    icon("OutdoorGear", "Outdoor Gear"),
    icon("Books", "Books"),
    icon("PetSupplies", "Pet Supplies"),
    icon("Camera", "Camera"),
    icon("SnackBox", "Snack Box"),
    icon("Car", "Car"),
    icon("Fitness", "Fitness"),
    icon("Restaurant", "Restaurant"),
    icon("ShoppingMall", "Shopping Mall"),
    icon("Movies", "Movies"),
    icon("Bar", "Bar"),
    icon("Spa", "Spa"),
    icon("Airplane", "Airplane"),
    icon("Boat", "Boat"),
    icon("Bike", "Bike"),
    icon("Bus", "Bus"),
    icon("Bed", "Bed"),
    icon("Hospital", "Hospital"),
    icon("Desktop", "Desktop"),
    icon("Tablet", "Tablet"),
    icon("Toys", "Toys"),
    icon("Music", "Music"),
    icon("Art", "Art"),
    icon("Flash", "Flash"),
    icon("Healing", "Healing"),
    icon("Nature", "Nature"),
    icon("Palette", "Palette"),
    icon("Beach", "Beach"),
    icon("Bug", "Bug"),
    icon("Code", "Code"),
    icon("Power", "Power"),
    icon("Workout", "Workout"),
    icon("Others", "Others"),
];

/// Look up the display label for an icon key.
pub fn icon_label(key: &str) -> Option<&'static str> {
    ICON_CATALOG.iter().find(|o| o.key == key).map(|o| o.label)
}

/// Position of an icon key in the catalog.
pub fn icon_position(key: &str) -> Option<usize> {
    ICON_CATALOG.iter().position(|o| o.key == key)
}
