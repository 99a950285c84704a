mod bnf;

pub use bnf::BnfConnector;
