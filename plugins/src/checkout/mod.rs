pub mod ledger;

pub use ledger::LedgerCheckout;
