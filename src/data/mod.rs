pub mod connectors;

pub use connectors::BnfConnector;
