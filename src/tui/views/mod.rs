pub mod create_fundraising;
pub mod fundraisers;
pub mod ticket_purchase;
