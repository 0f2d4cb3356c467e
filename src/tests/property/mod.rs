//! Property-based tests for Fundraffle
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Test Modules
//!
//! - `draft_props`: fundraiser draft editing
//!   - Prize ranks always equal list position + 1
//!   - The prize list never empties
//!   - Any ticket price edit yields a price of at least 1
//!
//! - `purchase_props`: ticket purchase
//!   - Quantity always stays within 1-10
//!   - Total price is derived from quantity and unit price
//!
//! - `helpers_props`: membership toggles
//!   - Toggling twice restores membership
//!   - Toggling never duplicates an id
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod draft_props;
mod helpers_props;
mod purchase_props;
